//! 画面遷移（ビューコントローラ）
//!
//! 遷移:
//! - Selection → Capture: セグメント選択
//! - Capture → Loading: アップロード開始（処理中は次の撮影を受け付けない）
//! - Loading → Results: 解析成功（前回のセッションは置き換え）
//! - Loading → Capture: 解析失敗（エラーメッセージを表示して再試行可能）
//! - Results → Capture: 再撮影（現在のセッションは `previous` として保持）
//! - Results → Selection: 戻る（達成率をセグメント状態に反映）
//!
//! 終端状態はなく、セッション中は循環し続ける。

use crate::error::{Error, Result};
use crate::layout::StoreLayout;
use crate::omit::{OmitOutcome, OmitReason};
use crate::segments::{ColorPolicy, SegmentStatus, SegmentStatusMap};
use crate::session::{CaptureSession, ImageMeta};
use crate::types::DetectionRecord;

/// 表示中の画面
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// 店舗マップからセグメントを選ぶ
    Selection,
    /// 撮影・アップロード待ち
    Capture {
        segment: String,
        /// 直前のアップロード失敗メッセージ
        error: Option<String>,
        /// 再撮影中なら元の結果
        previous: Option<CaptureSession>,
    },
    /// 解析中
    Loading {
        segment: String,
        previous: Option<CaptureSession>,
    },
    /// 結果表示
    Results { session: CaptureSession },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Selection => "selection",
            View::Capture { .. } => "capture",
            View::Loading { .. } => "loading",
            View::Results { .. } => "results",
        }
    }
}

/// 画面遷移と状態の所有者
#[derive(Debug, Clone)]
pub struct ViewController {
    view: View,
    layout: StoreLayout,
    policy: ColorPolicy,
    segments: SegmentStatusMap,
}

impl ViewController {
    pub fn new(layout: StoreLayout, policy: ColorPolicy) -> Self {
        Self {
            view: View::Selection,
            layout,
            policy,
            segments: SegmentStatusMap::new(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn policy(&self) -> &ColorPolicy {
        &self.policy
    }

    pub fn segments(&self) -> &SegmentStatusMap {
        &self.segments
    }

    /// 結果画面のセッション
    pub fn session(&self) -> Option<&CaptureSession> {
        match &self.view {
            View::Results { session } => Some(session),
            _ => None,
        }
    }

    /// 作業中のセグメント名
    pub fn current_segment(&self) -> Option<&str> {
        match &self.view {
            View::Selection => None,
            View::Capture { segment, .. } | View::Loading { segment, .. } => Some(segment.as_str()),
            View::Results { session } => Some(session.segment.as_str()),
        }
    }

    /// Selection → Capture
    pub fn select_segment(&mut self, segment: &str) -> Result<()> {
        if !matches!(self.view, View::Selection) {
            return Err(self.invalid("seleccionar un segmento"));
        }
        if !self.layout.contains(segment) {
            return Err(Error::UnknownSegment(segment.to_string()));
        }
        self.view = View::Capture {
            segment: segment.to_string(),
            error: None,
            previous: None,
        };
        Ok(())
    }

    /// Capture → Selection（再撮影中なら元の結果に戻る）
    pub fn cancel_capture(&mut self) -> Result<()> {
        match self.take_view() {
            View::Capture { previous, .. } => {
                self.view = match previous {
                    Some(session) => View::Results { session },
                    None => View::Selection,
                };
                Ok(())
            }
            other => Err(self.restore(other, "cancelar la captura")),
        }
    }

    /// Capture → Loading
    pub fn begin_upload(&mut self) -> Result<()> {
        match self.take_view() {
            View::Capture { segment, previous, .. } => {
                self.view = View::Loading { segment, previous };
                Ok(())
            }
            other => Err(self.restore(other, "iniciar la carga")),
        }
    }

    /// Loading → Results
    ///
    /// IDが重複した結果は失敗扱いとし、Capture に戻してエラーを返す。
    pub fn upload_succeeded(&mut self, image: ImageMeta, records: Vec<DetectionRecord>) -> Result<()> {
        match self.take_view() {
            View::Loading { segment, previous } => {
                match CaptureSession::new(segment.clone(), image, records) {
                    Ok(session) => {
                        self.view = View::Results { session };
                        Ok(())
                    }
                    Err(e) => {
                        self.view = View::Capture {
                            segment,
                            error: Some(e.to_string()),
                            previous,
                        };
                        Err(e)
                    }
                }
            }
            other => Err(self.restore(other, "completar la carga")),
        }
    }

    /// Loading → Capture（エラーメッセージ付き）
    pub fn upload_failed(&mut self, message: impl Into<String>) -> Result<()> {
        match self.take_view() {
            View::Loading { segment, previous } => {
                self.view = View::Capture {
                    segment,
                    error: Some(message.into()),
                    previous,
                };
                Ok(())
            }
            other => Err(self.restore(other, "marcar la carga como fallida")),
        }
    }

    /// Results → Capture（再撮影）
    pub fn retake(&mut self) -> Result<()> {
        match self.take_view() {
            View::Results { session } => {
                self.view = View::Capture {
                    segment: session.segment.clone(),
                    error: None,
                    previous: Some(session),
                };
                Ok(())
            }
            other => Err(self.restore(other, "tomar otra foto")),
        }
    }

    /// 結果画面でアラートを除外
    pub fn omit(&mut self, id: i64, reason: &OmitReason) -> Result<OmitOutcome> {
        if let View::Results { session } = &mut self.view {
            return Ok(session.omit(id, reason));
        }
        Err(self.invalid("omitir una alerta"))
    }

    /// Results → Selection
    ///
    /// セッションの達成率をセグメント状態に記録し、セッションは破棄する。
    pub fn back_to_selection(&mut self) -> Result<(String, SegmentStatus)> {
        match self.take_view() {
            View::Results { session } => {
                let percentage = session.statistics().percentage;
                let status = self.segments.record(&session.segment, percentage, &self.policy);
                self.view = View::Selection;
                Ok((session.segment, status))
            }
            other => Err(self.restore(other, "volver al mapa")),
        }
    }

    fn take_view(&mut self) -> View {
        std::mem::replace(&mut self.view, View::Selection)
    }

    fn restore(&mut self, view: View, action: &'static str) -> Error {
        self.view = view;
        self.invalid(action)
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            state: self.view.name(),
            action,
        }
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(StoreLayout::default(), ColorPolicy::default())
    }
}
