//! 検出枠の描画
//!
//! 撮影画像にアラートの枠を重ねたコピーを書き出す。
//! 未対応アラートは赤、除外済みは灰色。番号はアラート一覧の順（1始まり）。

use crate::error::{Result, ShelfAuditError};
use image::{Rgba, RgbaImage};
use shelf_audit_common::{alert_list, BoundingBox, DetectionRecord};
use std::path::Path;

const ALERT_COLOR: Rgba<u8> = Rgba([244, 67, 54, 255]);
const OMITTED_COLOR: Rgba<u8> = Rgba([158, 158, 158, 255]);
const LINE_WIDTH: u32 = 2;

/// 描画した枠（凡例用）
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMark {
    /// 一覧上の番号（1始まり）
    pub number: usize,
    pub id: i64,
    pub omitted: bool,
}

/// 枠付き画像を書き出し、描画した枠の一覧を返す
pub fn render_overlay(image_path: &Path, records: &[DetectionRecord], output: &Path) -> Result<Vec<OverlayMark>> {
    let mut canvas = image::open(image_path)
        .map_err(|e| ShelfAuditError::ImageLoad(format!("{}: {}", image_path.display(), e)))?
        .to_rgba8();

    let mut marks = Vec::new();
    for (idx, record) in alert_list(records).into_iter().enumerate() {
        // 欠品などで枠がないものは番号だけ進める
        let Some(bbox) = record.bbox else {
            continue;
        };
        let omitted = record.status.is_omitted();
        let color = if omitted { OMITTED_COLOR } else { ALERT_COLOR };
        draw_box(&mut canvas, &bbox, color);
        marks.push(OverlayMark {
            number: idx + 1,
            id: record.id,
            omitted,
        });
    }

    canvas
        .save(output)
        .map_err(|e| ShelfAuditError::ImageLoad(format!("{}: {}", output.display(), e)))?;

    log::debug!("枠付き画像を保存: {} ({}件)", output.display(), marks.len());
    Ok(marks)
}

fn draw_box(canvas: &mut RgbaImage, bbox: &BoundingBox, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let clamp = |v: f64, max: u32| -> u32 { v.max(0.0).min((max - 1) as f64) as u32 };
    let x1 = clamp(bbox.x1().min(bbox.x2()), width);
    let x2 = clamp(bbox.x1().max(bbox.x2()), width);
    let y1 = clamp(bbox.y1().min(bbox.y2()), height);
    let y2 = clamp(bbox.y1().max(bbox.y2()), height);

    for offset in 0..LINE_WIDTH {
        for x in x1..=x2 {
            put(canvas, x, y1 + offset, color);
            put(canvas, x, y2.saturating_sub(offset), color);
        }
        for y in y1..=y2 {
            put(canvas, x1 + offset, y, color);
            put(canvas, x2.saturating_sub(offset), y, color);
        }
    }
}

fn put(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_audit_common::{sample_records, DetectionStatus, OmitReason, apply_omit};

    #[test]
    fn test_render_overlay_marks_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shelf.png");
        let output = dir.path().join("shelf.marked.png");
        RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255])).save(&input).unwrap();

        let mut records = sample_records();
        apply_omit(&mut records, 2, &OmitReason::SinInventario);

        let marks = render_overlay(&input, &records, &output).unwrap();
        assert_eq!(
            marks,
            vec![
                OverlayMark { number: 1, id: 1, omitted: false },
                OverlayMark { number: 2, id: 2, omitted: true },
                OverlayMark { number: 3, id: 4, omitted: false },
            ]
        );

        let rendered = image::open(&output).unwrap().to_rgba8();
        assert_eq!(*rendered.get_pixel(30, 30), ALERT_COLOR);
        assert_eq!(*rendered.get_pixel(80, 80), OMITTED_COLOR);
        assert_eq!(*rendered.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_overlay_skips_missing_bbox() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shelf.png");
        let output = dir.path().join("out.png");
        RgbaImage::new(20, 20).save(&input).unwrap();

        let records = vec![
            DetectionRecord::new(1, "a", None, DetectionStatus::alert("Producto faltante")),
            DetectionRecord::new(2, "b", Some(BoundingBox::new(-5.0, -5.0, 500.0, 500.0)), DetectionStatus::alert("x")),
        ];
        let marks = render_overlay(&input, &records, &output).unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].number, 2);
    }
}
