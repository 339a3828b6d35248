//! アラート除外（Omitir）
//!
//! IDで指定したアラートを理由付きで除外済みに書き換える。
//! 元のアラート文言は `Omitted.original` に保持され、表示時に取り消し線で示す。

use crate::types::{DetectionRecord, DetectionStatus};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// 改行・タブ・制御文字を含む空白の連続
    static ref SPACING_RE: Regex = Regex::new(r"[\s\p{Cc}]+").expect("valid spacing regex");
}

/// 除外理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmitReason {
    SinInventario,
    ProductoCaducado,
    ProductoNoExistente,
    AlertaErronea,
    /// 自由記述（「Otro」）
    Other(String),
}

impl OmitReason {
    /// 選択肢に並ぶ定型理由
    pub const PRESETS: [OmitReason; 4] = [
        OmitReason::SinInventario,
        OmitReason::ProductoCaducado,
        OmitReason::ProductoNoExistente,
        OmitReason::AlertaErronea,
    ];

    /// 「Otro」の選択肢ラベル
    pub const OTHER_LABEL: &'static str = "Otro";

    /// 自由記述の理由を作成（空白のみは理由として扱わない）
    ///
    /// ステータス文字列は1行で保存するので、改行や制御文字は空白1つにまとめる。
    pub fn other(text: &str) -> Option<Self> {
        let normalized = SPACING_RE.replace_all(text, " ");
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(OmitReason::Other(trimmed.to_string()))
        }
    }

    /// ラベル文字列から作成（定型理由に一致しなければ自由記述）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|p| p.label() == label.trim())
            .cloned()
            .or_else(|| Self::other(label))
    }

    pub fn label(&self) -> &str {
        match self {
            OmitReason::SinInventario => "Sin inventario",
            OmitReason::ProductoCaducado => "Producto caducado",
            OmitReason::ProductoNoExistente => "Producto no existente",
            OmitReason::AlertaErronea => "Alerta errónea",
            OmitReason::Other(text) => text,
        }
    }
}

impl fmt::Display for OmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 除外操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitOutcome {
    /// 除外済みに書き換えた
    Applied,
    /// 該当IDなし（何もしない）
    NotFound,
    /// すでに除外済み（二重除外はしない）
    AlreadyOmitted,
    /// 正常な商品なので除外対象外
    NotAnAlert,
}

/// IDで指定したアラートを除外済みにする
///
/// 該当しない場合は何も変更せず、結果だけを返す（エラーにはしない）。
pub fn apply_omit(records: &mut [DetectionRecord], id: i64, reason: &OmitReason) -> OmitOutcome {
    let Some(record) = records.iter_mut().find(|r| r.id == id) else {
        return OmitOutcome::NotFound;
    };

    match &record.status {
        DetectionStatus::Correct => OmitOutcome::NotAnAlert,
        DetectionStatus::Omitted { .. } => OmitOutcome::AlreadyOmitted,
        DetectionStatus::Alert(label) => {
            let original = label.clone();
            record.status = DetectionStatus::Omitted {
                reason: reason.label().to_string(),
                original,
            };
            OmitOutcome::Applied
        }
    }
}

/// `apply_omit` の非破壊版: 書き換え後の配列を返す
pub fn with_omit(records: &[DetectionRecord], id: i64, reason: &OmitReason) -> Vec<DetectionRecord> {
    let mut updated = records.to_vec();
    apply_omit(&mut updated, id, reason);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_statistics;
    use crate::types::STATUS_MISSING;

    fn sample() -> Vec<DetectionRecord> {
        vec![
            DetectionRecord::new(1, "a", None, DetectionStatus::Correct),
            DetectionRecord::new(2, "b", None, DetectionStatus::alert(STATUS_MISSING)),
            DetectionRecord::new(3, "c", None, DetectionStatus::alert("Producto mal acomodado")),
        ]
    }

    #[test]
    fn test_apply_omit() {
        let mut records = sample();
        let outcome = apply_omit(&mut records, 2, &OmitReason::SinInventario);

        assert_eq!(outcome, OmitOutcome::Applied);
        assert_eq!(
            records[1].status.to_string(),
            "Omitido: Sin inventario - [Producto faltante]"
        );

        let stats = compute_statistics(&records);
        assert_eq!(stats.good, 2);
        assert_eq!(stats.percentage, 67);
    }

    #[test]
    fn test_apply_omit_leaves_others_untouched() {
        let before = sample();
        let after = with_omit(&before, 3, &OmitReason::AlertaErronea);

        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
        assert_ne!(after[2], before[2]);
        assert_eq!(after[2].name, before[2].name);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut records = sample();
        let before = records.clone();
        assert_eq!(apply_omit(&mut records, 99, &OmitReason::SinInventario), OmitOutcome::NotFound);
        assert_eq!(records, before);
    }

    #[test]
    fn test_double_omit_is_rejected() {
        let mut records = sample();
        apply_omit(&mut records, 2, &OmitReason::SinInventario);
        let once = records.clone();

        let outcome = apply_omit(&mut records, 2, &OmitReason::ProductoCaducado);
        assert_eq!(outcome, OmitOutcome::AlreadyOmitted);
        assert_eq!(records, once);
    }

    #[test]
    fn test_other_reason_is_single_line() {
        assert_eq!(
            OmitReason::other("  linea1\n\tlinea2\r\n"),
            Some(OmitReason::Other("linea1 linea2".into()))
        );
        assert_eq!(OmitReason::other("\n\u{7}\t"), None);
    }

    #[test]
    fn test_correct_record_cannot_be_omitted() {
        let mut records = sample();
        assert_eq!(apply_omit(&mut records, 1, &OmitReason::SinInventario), OmitOutcome::NotAnAlert);
        assert!(records[0].status.is_correct());
    }

    #[test]
    fn test_other_reason() {
        assert_eq!(OmitReason::other("   "), None);
        assert_eq!(
            OmitReason::other("  exhibidor roto "),
            Some(OmitReason::Other("exhibidor roto".into()))
        );
    }

    #[test]
    fn test_from_label() {
        assert_eq!(OmitReason::from_label("Producto caducado"), Some(OmitReason::ProductoCaducado));
        assert_eq!(OmitReason::from_label("Alerta errónea"), Some(OmitReason::AlertaErronea));
        assert_eq!(
            OmitReason::from_label("cliente lo tomó"),
            Some(OmitReason::Other("cliente lo tomó".into()))
        );
        assert_eq!(OmitReason::from_label(""), None);
    }
}
