//! 集計モジュール
//!
//! 検出結果から総数・正常数・達成率を算出する。結果はキャッシュせず毎回再計算する。

use crate::types::DetectionRecord;
use serde::Serialize;

/// 検出結果の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    /// 未対応アラート以外の件数（正常 + 除外済み）
    pub good: usize,
    /// 未対応アラートの件数
    pub bad: usize,
    /// 達成率（0-100）
    pub percentage: u8,
}

/// 集計を計算
///
/// 未対応アラートが0件なら100%、それ以外は `good / total` を四捨五入する。
pub fn compute_statistics(records: &[DetectionRecord]) -> Statistics {
    let total = records.len();
    let bad = records.iter().filter(|r| r.status.is_live_alert()).count();
    let good = total - bad;

    let percentage = if bad == 0 {
        100
    } else {
        // 整数演算で0.5を切り上げ。アラートが残る限り100には届かない
        let rounded = (good * 200 + total) / (total * 2);
        rounded.min(99) as u8
    };

    Statistics {
        total,
        good,
        bad,
        percentage,
    }
}
