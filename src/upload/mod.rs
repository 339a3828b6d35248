//! アップロード境界
//!
//! 撮影画像を検出サービスへ送り、検出結果を受け取る。
//! タイムアウトやキャンセルは行わない。失敗はすべて同じ扱い（画面にメッセージを出して再試行）。

mod http;
mod sample;

use crate::backend::UploadBackend;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageInfo;
use shelf_audit_common::DetectionRecord;

pub use http::upload_multipart;
pub use sample::sample_detections;

/// 画像をアップロードして検出結果を取得
pub async fn upload_image(
    image: &ImageInfo,
    backend: UploadBackend,
    config: &Config,
) -> Result<Vec<DetectionRecord>> {
    log::info!("アップロード開始: {} (backend={})", image.file_name, backend.label());

    let records = match backend {
        UploadBackend::Sample => sample_detections(config.simulated_delay_ms).await,
        UploadBackend::Http => {
            let endpoint = config.get_endpoint()?;
            upload_multipart(&endpoint, image).await?
        }
    };

    log::info!("検出結果: {}件", records.len());
    Ok(records)
}
