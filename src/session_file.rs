//! 結果JSONファイルの読み書き

use crate::error::{Result, ShelfAuditError};
use shelf_audit_common::CaptureSession;
use std::path::Path;

pub fn load_session(path: &Path) -> Result<CaptureSession> {
    if !path.is_file() {
        return Err(ShelfAuditError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(CaptureSession::from_json(&content)?)
}

pub fn save_session(path: &Path, session: &CaptureSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json)?;
    log::debug!("結果を保存: {}", path.display());
    Ok(())
}
