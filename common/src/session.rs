//! 撮影セッション
//!
//! 1枚の撮影画像と、その検出結果の並びを保持する。
//! 再撮影時は丸ごと置き換え、結果画面を離れると破棄される。

use crate::error::{Error, Result};
use crate::filter::{alert_list, categorize, AlertBuckets};
use crate::omit::{apply_omit, OmitOutcome, OmitReason};
use crate::stats::{compute_statistics, Statistics};
use crate::types::DetectionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 画像メタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageMeta {
    pub file_name: String,
    pub file_path: String,
    /// 撮影日時（EXIF）。取得できなければ空文字
    pub date: String,
}

/// 撮影セッション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub image: ImageMeta,
    pub records: Vec<DetectionRecord>,
}

impl CaptureSession {
    /// セッションを作成（IDの重複はエラー）
    pub fn new(segment: impl Into<String>, image: ImageMeta, records: Vec<DetectionRecord>) -> Result<Self> {
        ensure_unique_ids(&records)?;
        Ok(Self {
            segment: segment.into(),
            image,
            records,
        })
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let session: Self = serde_json::from_str(json)?;
        ensure_unique_ids(&session.records)?;
        Ok(session)
    }

    pub fn statistics(&self) -> Statistics {
        compute_statistics(&self.records)
    }

    pub fn buckets(&self) -> AlertBuckets<'_> {
        categorize(&self.records)
    }

    pub fn alerts(&self) -> Vec<&DetectionRecord> {
        alert_list(&self.records)
    }

    pub fn record(&self, id: i64) -> Option<&DetectionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn omit(&mut self, id: i64, reason: &OmitReason) -> OmitOutcome {
        apply_omit(&mut self.records, id, reason)
    }
}

/// 撮影内でIDが一意であることを確認
pub fn ensure_unique_ids(records: &[DetectionRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id) {
            return Err(Error::Parse(format!("ID duplicado: {}", record.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionStatus, STATUS_MISSING};

    fn records() -> Vec<DetectionRecord> {
        vec![
            DetectionRecord::new(1, "a", None, DetectionStatus::Correct),
            DetectionRecord::new(2, "b", None, DetectionStatus::alert(STATUS_MISSING)),
        ]
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let mut dup = records();
        dup.push(DetectionRecord::new(2, "c", None, DetectionStatus::Correct));
        let result = CaptureSession::new("Hogar", ImageMeta::default(), dup);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_omit_recomputes_statistics() {
        let mut session = CaptureSession::new("Hogar", ImageMeta::default(), records()).unwrap();
        assert_eq!(session.statistics().percentage, 50);

        assert_eq!(session.omit(2, &OmitReason::SinInventario), OmitOutcome::Applied);
        assert_eq!(session.statistics().percentage, 100);
        assert!(session.record(2).unwrap().status.is_omitted());
    }

    #[test]
    fn test_json_roundtrip_keeps_wire_format() {
        let session = CaptureSession::new(
            "Alimentos",
            ImageMeta {
                file_name: "shelf.jpg".into(),
                ..Default::default()
            },
            records(),
        )
        .unwrap();

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"fileName\":\"shelf.jpg\""));
        assert!(json.contains("\"alerta\":\"Producto faltante\""));

        let loaded = CaptureSession::from_json(&json).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_free_text_omission_survives_reload() {
        for text in ["caja - [rota]", "linea1\nlinea2"] {
            let mut session = CaptureSession::new("Hogar", ImageMeta::default(), records()).unwrap();
            let reason = OmitReason::other(text).unwrap();
            assert_eq!(session.omit(2, &reason), OmitOutcome::Applied);

            let json = serde_json::to_string(&session).unwrap();
            let loaded = CaptureSession::from_json(&json).unwrap();

            let status = &loaded.record(2).unwrap().status;
            assert_eq!(status.omit_reason(), Some(reason.label()));
            assert_eq!(status.alert_label(), Some(STATUS_MISSING));
            assert_eq!(loaded, session);
        }
    }
}
