//! 検出結果の型定義
//!
//! CLIとダッシュボードで共有される型:
//! - BoundingBox: 検出領域（左上・右下の2点）
//! - DetectionStatus: 検出状態（正常 / アラート / 除外済み）
//! - DetectionRecord: 1商品分の検出結果
//!
//! ワイヤ形式は検出サービスのJSON（`id`, `nombre`, `bbox`, `alerta`）に合わせる。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 正常（アラートなし）を示すステータス文字列
pub const STATUS_CORRECT: &str = "Producto correcto";

/// 検出サービス側の「正常配置」クラス名
pub const STATUS_WELL_PLACED: &str = "Bien acomodado";

/// 欠品アラート
pub const STATUS_MISSING: &str = "Producto faltante";

/// 除外済みステータスの接頭辞
pub const OMITTED_PREFIX: &str = "Omitido:";

/// 除外理由と元のアラートの区切り
const OMITTED_SEPARATOR: &str = " - [";

/// 検出領域 `[x1, y1, x2, y2]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self([x1, y1, x2, y2])
    }

    /// 中心座標とサイズから生成（検出モデルの予測形式）
    pub fn from_center(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self([
            x - width / 2.0,
            y - height / 2.0,
            x + width / 2.0,
            y + height / 2.0,
        ])
    }

    pub fn x1(&self) -> f64 {
        self.0[0]
    }

    pub fn y1(&self) -> f64 {
        self.0[1]
    }

    pub fn x2(&self) -> f64 {
        self.0[2]
    }

    pub fn y2(&self) -> f64 {
        self.0[3]
    }

    pub fn width(&self) -> f64 {
        self.x2() - self.x1()
    }

    pub fn height(&self) -> f64 {
        self.y2() - self.y1()
    }
}

/// 検出状態
///
/// ワイヤ上は従来どおり文字列で表現される:
/// - `"Producto correcto"` → `Correct`
/// - `"Omitido: <理由> - [<元のアラート>]"` → `Omitted`
/// - それ以外 → `Alert`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DetectionStatus {
    /// 正しく陳列されている
    Correct,
    /// 未対応のアラート（ラベルはそのまま保持）
    Alert(String),
    /// ユーザーが理由付きで除外したアラート
    Omitted { reason: String, original: String },
}

impl DetectionStatus {
    pub fn alert(label: impl Into<String>) -> Self {
        DetectionStatus::Alert(label.into())
    }

    /// ステータス文字列を解釈
    ///
    /// 入れ子になった旧形式（`Omitido: B - [Omitido: A - [X]]`）は
    /// 外側の理由と最も内側のアラートに畳み込む。
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed == STATUS_CORRECT || trimmed == STATUS_WELL_PLACED {
            return DetectionStatus::Correct;
        }

        if let Some(rest) = trimmed.strip_prefix(OMITTED_PREFIX) {
            let body = rest.strip_prefix(' ').unwrap_or(rest);
            if let Some((reason, inner)) = split_omitted(body) {
                let original = match DetectionStatus::parse(inner) {
                    DetectionStatus::Omitted { original, .. } => original,
                    DetectionStatus::Alert(label) => label,
                    DetectionStatus::Correct => STATUS_CORRECT.to_string(),
                };
                return DetectionStatus::Omitted {
                    reason: reason.to_string(),
                    original,
                };
            }

            // 括弧なしの除外表記: 元のアラートは復元できない
            return DetectionStatus::Omitted {
                reason: body.trim().to_string(),
                original: String::new(),
            };
        }

        DetectionStatus::Alert(trimmed.to_string())
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, DetectionStatus::Correct)
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, DetectionStatus::Omitted { .. })
    }

    /// 未対応のアラートか（正常でも除外済みでもない）
    pub fn is_live_alert(&self) -> bool {
        matches!(self, DetectionStatus::Alert(_))
    }

    /// 未対応の欠品アラートか
    pub fn is_missing(&self) -> bool {
        matches!(self, DetectionStatus::Alert(label) if label == STATUS_MISSING)
    }

    /// 元のアラート文言（除外済みなら括弧内の値）
    pub fn alert_label(&self) -> Option<&str> {
        match self {
            DetectionStatus::Correct => None,
            DetectionStatus::Alert(label) => Some(label),
            DetectionStatus::Omitted { original, .. } => Some(original),
        }
    }

    pub fn omit_reason(&self) -> Option<&str> {
        match self {
            DetectionStatus::Omitted { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// `<理由> - [<元のアラート>]` を末尾から分解する
///
/// 末尾の `]` と対応する `[` を探すので、理由に ` - [` や改行が含まれていても
/// 元のアラートは取り出せる。入れ子の旧形式では外側の括弧が対象になる。
fn split_omitted(body: &str) -> Option<(&str, &str)> {
    let inner = body.strip_suffix(']')?;
    let mut depth = 0usize;

    for (idx, ch) in inner.char_indices().rev() {
        match ch {
            ']' => depth += 1,
            '[' if depth > 0 => depth -= 1,
            '[' => {
                let reason = body[..=idx].strip_suffix(OMITTED_SEPARATOR)?;
                return Some((reason, &inner[idx + 1..]));
            }
            _ => {}
        }
    }

    None
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionStatus::Correct => write!(f, "{}", STATUS_CORRECT),
            DetectionStatus::Alert(label) => write!(f, "{}", label),
            DetectionStatus::Omitted { reason, original } => {
                write!(f, "{} {} - [{}]", OMITTED_PREFIX, reason, original)
            }
        }
    }
}

impl From<String> for DetectionStatus {
    fn from(raw: String) -> Self {
        DetectionStatus::parse(&raw)
    }
}

impl From<DetectionStatus> for String {
    fn from(status: DetectionStatus) -> Self {
        status.to_string()
    }
}

/// 1商品分の検出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// 撮影内で一意なID
    pub id: i64,

    #[serde(rename = "nombre", alias = "name", default)]
    pub name: String,

    /// 欠品の場合は `None`（ワイヤ上は空配列）
    #[serde(
        default,
        alias = "boundingBox",
        serialize_with = "serialize_bbox",
        deserialize_with = "deserialize_bbox"
    )]
    pub bbox: Option<BoundingBox>,

    #[serde(rename = "alerta", alias = "status", alias = "clase")]
    pub status: DetectionStatus,
}

impl DetectionRecord {
    pub fn new(id: i64, name: impl Into<String>, bbox: Option<BoundingBox>, status: DetectionStatus) -> Self {
        Self {
            id,
            name: name.into(),
            bbox,
            status,
        }
    }
}

fn serialize_bbox<S>(bbox: &Option<BoundingBox>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bbox {
        Some(b) => b.0.serialize(serializer),
        None => Vec::<f64>::new().serialize(serializer),
    }
}

fn deserialize_bbox<'de, D>(deserializer: D) -> Result<Option<BoundingBox>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<f64>> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if v.len() == 4 => Ok(Some(BoundingBox([v[0], v[1], v[2], v[3]]))),
        Some(v) => Err(serde::de::Error::invalid_length(v.len(), &"0 or 4 coordinates")),
    }
}
