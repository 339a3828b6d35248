//! 撮影画像の検査
//!
//! アップロード前に、ファイルの存在・拡張子・画像としての読み込み可否を確認する。

mod exif;

use crate::error::{Result, ShelfAuditError};
use chrono::{DateTime, Local};
use shelf_audit_common::ImageMeta;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub date: Option<String>,
    /// (幅, 高さ) px
    pub dimensions: (u32, u32),
}

impl ImageInfo {
    pub fn to_meta(&self) -> ImageMeta {
        ImageMeta {
            file_name: self.file_name.clone(),
            file_path: self.path.display().to_string(),
            date: self.date.clone().unwrap_or_default(),
        }
    }

    /// multipart送信用のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match extension_of(&self.path).as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        }
    }
}

const EXIF_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// EXIFと同じ書式のファイル更新日時
fn modified_date(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format(EXIF_DATE_FORMAT).to_string())
}

/// 画像ファイルを検査してメタデータを返す
pub fn inspect_image(path: &Path) -> Result<ImageInfo> {
    if !path.is_file() {
        return Err(ShelfAuditError::FileNotFound(path.display().to_string()));
    }

    let supported = extension_of(path).map(|e| is_image_extension(&e)).unwrap_or(false);
    if !supported {
        return Err(ShelfAuditError::UnsupportedImage(path.display().to_string()));
    }

    let dimensions = image::image_dimensions(path)
        .map_err(|e| ShelfAuditError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let date = match exif::extract_date(path) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("EXIF日時なし ({}): {}", file_name, e);
            modified_date(path)
        }
    };

    Ok(ImageInfo {
        path: path.to_path_buf(),
        file_name,
        date,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
    }

    #[test]
    fn test_inspect_missing_file() {
        let result = inspect_image(Path::new("/nonexistent/shelf.jpg"));
        assert!(matches!(result, Err(ShelfAuditError::FileNotFound(_))));
    }

    #[test]
    fn test_inspect_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        File::create(&path).unwrap().write_all(b"text").unwrap();

        let result = inspect_image(&path);
        assert!(matches!(result, Err(ShelfAuditError::UnsupportedImage(_))));
    }

    #[test]
    fn test_inspect_broken_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        File::create(&path).unwrap().write_all(b"dummy").unwrap();

        let result = inspect_image(&path);
        assert!(matches!(result, Err(ShelfAuditError::ImageLoad(_))));
    }

    #[test]
    fn test_inspect_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.png");
        image::RgbImage::new(40, 30).save(&path).unwrap();

        let info = inspect_image(&path).unwrap();
        assert_eq!(info.file_name, "shelf.png");
        assert_eq!(info.dimensions, (40, 30));
        // EXIFがないので更新日時
        let date = info.date.clone().unwrap();
        assert_eq!(date.len(), 19);
        assert_eq!(&date[4..5], "-");
        assert_eq!(info.mime_type(), "image/png");
        assert_eq!(info.to_meta().file_name, "shelf.png");
    }
}
