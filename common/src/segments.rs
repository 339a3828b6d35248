//! セグメント状態の集約
//!
//! 結果画面から戻るたびに、セグメントごとの達成率と色分類を更新する。
//! 状態はビューコントローラが所有し、グローバルには持たない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 色分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentColor {
    Success,
    Warning,
    Error,
    /// まだ撮影していない
    Unvisited,
}

impl SegmentColor {
    /// 表示用の色コード
    pub fn hex(&self) -> &'static str {
        match self {
            SegmentColor::Success => "#4caf50",
            SegmentColor::Warning => "#ff9800",
            SegmentColor::Error => "#f44336",
            SegmentColor::Unvisited => "lightgray",
        }
    }
}

/// 色分けの閾値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPolicy {
    /// これ以上なら Success
    pub high: u8,
    /// これ以上なら Warning、未満は Error
    pub mid: u8,
}

impl ColorPolicy {
    pub const DEFAULT_HIGH: u8 = 70;
    pub const DEFAULT_MID: u8 = 40;

    pub fn new(high: u8, mid: u8) -> Result<Self> {
        if mid > high || high > 100 {
            return Err(Error::Config(format!(
                "umbrales inválidos: high={} mid={} (0 <= mid <= high <= 100)",
                high, mid
            )));
        }
        Ok(Self { high, mid })
    }

    pub fn classify(&self, percentage: u8) -> SegmentColor {
        if percentage >= self.high {
            SegmentColor::Success
        } else if percentage >= self.mid {
            SegmentColor::Warning
        } else {
            SegmentColor::Error
        }
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self {
            high: Self::DEFAULT_HIGH,
            mid: Self::DEFAULT_MID,
        }
    }
}

/// セグメントの最新状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStatus {
    pub percentage: u8,
    pub color: SegmentColor,
}

/// セグメント名 → 最新状態
#[derive(Debug, Clone, Default)]
pub struct SegmentStatusMap {
    entries: BTreeMap<String, SegmentStatus>,
}

impl SegmentStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 達成率を記録（既存エントリは上書き）
    pub fn record(&mut self, segment: &str, percentage: u8, policy: &ColorPolicy) -> SegmentStatus {
        let percentage = percentage.min(100);
        let status = SegmentStatus {
            percentage,
            color: policy.classify(percentage),
        };
        self.entries.insert(segment.to_string(), status);
        status
    }

    pub fn get(&self, segment: &str) -> Option<&SegmentStatus> {
        self.entries.get(segment)
    }

    /// 表示色（未訪問なら Unvisited）
    pub fn color_of(&self, segment: &str) -> SegmentColor {
        self.entries
            .get(segment)
            .map(|s| s.color)
            .unwrap_or(SegmentColor::Unvisited)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentStatus)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
