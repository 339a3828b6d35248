use shelf_audit_common::{sample_records, DetectionRecord};
use std::time::Duration;

/// 擬似的な待ち時間のあとにサンプルデータを返す
pub async fn sample_detections(delay_ms: u64) -> Vec<DetectionRecord> {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
    sample_records()
}
