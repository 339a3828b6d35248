//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Error de formato: {0}")]
    Parse(String),

    #[error("Segmento desconocido: {0}")]
    UnknownSegment(String),

    #[error("Transición inválida: no se puede {action} en {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
