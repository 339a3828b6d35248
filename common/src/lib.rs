//! Shelf Audit Common Library
//!
//! CLIとダッシュボードで共有される型と状態ロジック:
//! 検出結果・集計・分類・除外・セグメント状態・画面遷移

pub mod types;
pub mod error;
pub mod stats;
pub mod filter;
pub mod omit;
pub mod segments;
pub mod layout;
pub mod session;
pub mod parser;
pub mod sample;
pub mod view;

pub use types::{BoundingBox, DetectionRecord, DetectionStatus, STATUS_CORRECT, STATUS_MISSING};
pub use error::{Error, Result};
pub use stats::{compute_statistics, Statistics};
pub use filter::{alert_list, categorize, AlertBuckets};
pub use omit::{apply_omit, with_omit, OmitOutcome, OmitReason};
pub use segments::{ColorPolicy, SegmentColor, SegmentStatus, SegmentStatusMap};
pub use layout::StoreLayout;
pub use session::{CaptureSession, ImageMeta};
pub use parser::{parse_detection_response, parse_detections, ParsedResponse};
pub use sample::sample_records;
pub use view::{View, ViewController};
