//! 分類フィルタ
//!
//! 検出結果を「欠品」「通常アラート」「正常」に振り分ける。元の配列は変更しない。

use crate::types::DetectionRecord;

/// 分類結果（入力順を保持した参照）
#[derive(Debug, Default)]
pub struct AlertBuckets<'a> {
    /// 未対応の欠品アラート
    pub missing: Vec<&'a DetectionRecord>,
    /// その他のアラート（除外済みの欠品を含む）
    pub regular: Vec<&'a DetectionRecord>,
    /// 正常
    pub correct: Vec<&'a DetectionRecord>,
}

impl AlertBuckets<'_> {
    /// アラート一覧に出す件数
    pub fn alert_count(&self) -> usize {
        self.missing.len() + self.regular.len()
    }
}

/// 検出結果を分類
pub fn categorize(records: &[DetectionRecord]) -> AlertBuckets<'_> {
    let mut buckets = AlertBuckets::default();

    for record in records {
        if record.status.is_correct() {
            buckets.correct.push(record);
        } else if record.status.is_missing() {
            buckets.missing.push(record);
        } else {
            buckets.regular.push(record);
        }
    }

    buckets
}

/// 正常以外の検出結果（画面のアラート一覧・画像上の番号付け順）
pub fn alert_list(records: &[DetectionRecord]) -> Vec<&DetectionRecord> {
    records.iter().filter(|r| !r.status.is_correct()).collect()
}
