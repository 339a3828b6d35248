//! 端末表示用の整形
//!
//! 結果画面（集計・アラート一覧）と店舗マップを文字列にする。

use shelf_audit_common::{
    CaptureSession, DetectionStatus, SegmentColor, SegmentStatusMap, Statistics, StoreLayout,
};

/// 集計の1行表示
pub fn format_statistics(stats: &Statistics) -> String {
    format!(
        "Total: {} | Alertas: {} | Completado: {}%",
        stats.total, stats.bad, stats.percentage
    )
}

/// 結果画面
pub fn format_results(session: &CaptureSession) -> String {
    let mut out = String::new();
    let stats = session.statistics();

    out.push_str(&format!("Segmento: {}\n", session.segment));
    if !session.image.file_name.is_empty() {
        out.push_str(&format!("Imagen: {}\n", session.image.file_name));
    }
    out.push_str(&format_statistics(&stats));
    out.push('\n');

    let buckets = session.buckets();
    out.push_str(&format!(
        "Faltantes: {} | Otras alertas: {} | Correctos: {}\n",
        buckets.missing.len(),
        buckets.regular.len(),
        buckets.correct.len()
    ));

    let alerts = session.alerts();
    if alerts.is_empty() {
        out.push_str("\nSin alertas\n");
        return out;
    }

    out.push('\n');
    for (idx, record) in alerts.iter().enumerate() {
        let line = match &record.status {
            DetectionStatus::Omitted { reason, original } => {
                format!("Motivo: {} | ~~{}~~", reason, original)
            }
            other => other.to_string(),
        };
        out.push_str(&format!("  {:>2}. [id {}] {} - {}\n", idx + 1, record.id, record.name, line));
    }

    out
}

fn color_symbol(color: SegmentColor) -> char {
    match color {
        SegmentColor::Success => '●',
        SegmentColor::Warning => '◐',
        SegmentColor::Error => '○',
        SegmentColor::Unvisited => '·',
    }
}

/// 店舗マップ（セグメントは頭文字と状態記号）
pub fn format_layout(layout: &StoreLayout, statuses: &SegmentStatusMap) -> String {
    let mut out = String::new();

    for row in &layout.rows {
        for cell in row {
            match cell {
                Some(name) => {
                    let initial = name.chars().next().unwrap_or('?');
                    out.push(initial);
                    out.push(color_symbol(statuses.color_of(name)));
                }
                None => out.push_str("  "),
            }
            out.push(' ');
        }
        out.push('\n');
    }

    out.push('\n');
    for name in layout.segments() {
        match statuses.get(name) {
            Some(status) => out.push_str(&format!(
                "  {} {}: {}% ({})\n",
                color_symbol(status.color),
                name,
                status.percentage,
                status.color.hex()
            )),
            None => out.push_str(&format!("  {} {}: sin revisar\n", color_symbol(SegmentColor::Unvisited), name)),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_audit_common::{sample_records, ColorPolicy, ImageMeta, OmitReason};

    #[test]
    fn test_format_results() {
        let mut session = CaptureSession::new("Hogar", ImageMeta::default(), sample_records()).unwrap();
        session.omit(2, &OmitReason::SinInventario);

        let text = format_results(&session);
        assert!(text.contains("Segmento: Hogar"));
        assert!(text.contains("Total: 4 | Alertas: 2 | Completado: 50%"));
        assert!(text.contains("Motivo: Sin inventario | ~~Producto faltante~~"));
        assert!(text.contains("[id 4]"));
        assert!(!text.contains("[id 3]"));
    }

    #[test]
    fn test_format_layout() {
        let layout = StoreLayout::default();
        let mut statuses = SegmentStatusMap::new();
        statuses.record("Hogar", 85, &ColorPolicy::default());

        let text = format_layout(&layout, &statuses);
        assert!(text.contains("H●"));
        assert!(text.contains("A·"));
        assert!(text.contains("Hogar: 85% (#4caf50)"));
        assert!(text.contains("Alimentos: sin revisar"));
    }
}
