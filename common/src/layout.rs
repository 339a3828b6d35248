//! 店舗レイアウトモジュール
//!
//! 選択画面に並ぶセグメントのグリッド。`None` は通路（選択不可）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 店舗レイアウト（行 × 列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLayout {
    pub rows: Vec<Vec<Option<String>>>,
}

impl StoreLayout {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        if layout.segments().is_empty() {
            return Err(Error::Config("la distribución no tiene segmentos".into()));
        }
        Ok(layout)
    }

    /// セグメント名一覧（重複除去、出現順）
    pub fn segments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.rows.iter().flatten().flatten() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.rows.iter().flatten().flatten().any(|s| s == segment)
    }

    /// グリッドサイズ（行数, 最大列数）
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        (self.rows.len(), cols)
    }
}

impl Default for StoreLayout {
    fn default() -> Self {
        let x = || Some("x".to_string());
        let seg = |name: &str| Some(name.to_string());
        Self {
            rows: vec![
                vec![x(), x(), x(), x(), x(), x(), x(), x(), x()],
                vec![x(), None, None, None, None, None, None, None, x()],
                vec![x(), None, seg("Alimentos"), seg("Hogar"), None, x(), x(), None, None],
                vec![x(), None, x(), x(), None, x(), x(), None, None],
                vec![x(), None, x(), x(), None, x(), x(), None, None],
                vec![x(), None, x(), x(), None, x(), x(), None, None],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_segments() {
        let layout = StoreLayout::default();
        assert_eq!(layout.segments(), vec!["x", "Alimentos", "Hogar"]);
        assert_eq!(layout.dimensions(), (6, 9));
        assert!(layout.contains("Hogar"));
        assert!(!layout.contains("Bebidas"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"rows": [["Bebidas", null, "Limpieza"], [null, "Bebidas", null]]}"#;
        let layout = StoreLayout::from_json(json).unwrap();
        assert_eq!(layout.segments(), vec!["Bebidas", "Limpieza"]);
    }

    #[test]
    fn test_from_json_without_segments() {
        let json = r#"{"rows": [[null, null]]}"#;
        assert!(StoreLayout::from_json(json).is_err());
    }
}
