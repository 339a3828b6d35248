//! shelf-audit
//!
//! 棚セグメントの撮影画像を検出サービスに送り、結果の確認と誤検知の除外を行う。
//! 状態ロジックは `shelf_audit_common` にあり、このクレートは入出力と端末操作を担う。

pub mod backend;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod overlay;
pub mod report;
pub mod scanner;
pub mod session_file;
pub mod upload;
