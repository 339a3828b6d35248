//! 検出サービスへのmultipart送信
//!
//! フィールド `image` に画像ファイルを1つ付けてPOSTする。

use crate::error::{Result, ShelfAuditError};
use crate::scanner::ImageInfo;
use reqwest::multipart;
use shelf_audit_common::{parse_detections, DetectionRecord};

pub async fn upload_multipart(endpoint: &str, image: &ImageInfo) -> Result<Vec<DetectionRecord>> {
    let bytes = tokio::fs::read(&image.path).await?;
    log::debug!("送信サイズ: {} bytes → {}", bytes.len(), endpoint);

    let file_part = multipart::Part::bytes(bytes)
        .file_name(image.file_name.clone())
        .mime_str(image.mime_type())
        .map_err(|e| ShelfAuditError::Upload(e.to_string()))?;

    let form = multipart::Form::new().part("image", file_part);

    let response = reqwest::Client::new()
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ShelfAuditError::Upload(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ShelfAuditError::Upload(e.to_string()))?;

    if !status.is_success() {
        log::warn!("検出サービスがエラーを返しました: HTTP {}", status);
        return Err(ShelfAuditError::Upload(format!("HTTP {}: {}", status, body.trim())));
    }

    let parsed = parse_detections(&body).map_err(|e| ShelfAuditError::ApiParse(e.to_string()))?;
    if !parsed.assigned_ids.is_empty() {
        log::warn!("IDのないレコードに仮IDを割り当てました: {:?}", parsed.assigned_ids);
    }
    Ok(parsed.records)
}
