use crate::error::{Result, ShelfAuditError};
use serde::{Deserialize, Serialize};
use shelf_audit_common::{ColorPolicy, StoreLayout};
use std::path::PathBuf;

/// 検出サービスURLを上書きする環境変数
pub const ENDPOINT_ENV: &str = "SHELF_AUDIT_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 検出サービスのアップロードURL
    pub endpoint: Option<String>,
    /// サンプルデータ使用時の擬似待ち時間
    pub simulated_delay_ms: u64,
    /// 色分けの閾値
    pub color_policy: ColorPolicy,
    /// 店舗レイアウトJSON（省略時は組み込みレイアウト）
    pub layout_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            simulated_delay_ms: 1500,
            color_policy: ColorPolicy::default(),
            layout_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("設定を読み込みました: {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ShelfAuditError::Config("no se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("shelf-audit").join("config.json"))
    }

    pub fn get_endpoint(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(url) = std::env::var(ENDPOINT_ENV) {
            if !url.trim().is_empty() {
                return Ok(url);
            }
        }

        self.endpoint.clone().ok_or(ShelfAuditError::MissingEndpoint)
    }

    pub fn set_endpoint(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ShelfAuditError::Config(format!("URL inválida: {}", url)));
        }
        self.endpoint = Some(url);
        self.save()
    }

    /// 店舗レイアウトを読み込み
    pub fn layout(&self) -> Result<StoreLayout> {
        match &self.layout_path {
            Some(path) => Ok(StoreLayout::from_file(path)?),
            None => Ok(StoreLayout::default()),
        }
    }

    /// 閾値を検証して返す
    pub fn policy(&self) -> Result<ColorPolicy> {
        Ok(ColorPolicy::new(self.color_policy.high, self.color_policy.mid)?)
    }
}
