//! サンプル検出結果
//!
//! 検出サービスを使わない場合に返す固定データ。

use crate::types::{BoundingBox, DetectionRecord, DetectionStatus, STATUS_MISSING};

pub fn sample_records() -> Vec<DetectionRecord> {
    vec![
        DetectionRecord::new(
            1,
            "Papel Regio Rinde 4pz",
            Some(BoundingBox::new(30.0, 30.0, 60.0, 60.0)),
            DetectionStatus::alert("Producto mal acomodado"),
        ),
        DetectionRecord::new(
            2,
            "Shampoo KleenBebe Manzanilla 250ml",
            Some(BoundingBox::new(80.0, 80.0, 110.0, 110.0)),
            DetectionStatus::alert(STATUS_MISSING),
        ),
        DetectionRecord::new(
            3,
            "Shampoo KleenBebe Manzanilla 250ml",
            Some(BoundingBox::new(130.0, 130.0, 160.0, 160.0)),
            DetectionStatus::Correct,
        ),
        DetectionRecord::new(
            4,
            "Shampoo KleenBebe Manzanilla 250ml",
            Some(BoundingBox::new(130.0, 130.0, 160.0, 160.0)),
            DetectionStatus::alert(STATUS_MISSING),
        ),
    ]
}
