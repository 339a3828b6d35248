//! 検出サービスのレスポンスパーサー
//!
//! 受け付ける形式:
//! 1. 生の `[...]` 配列
//! 2. `{"boxes": [...]}` / `{"results": [...]}` / `{"detections": [...]}`
//!
//! `{"error": "..."}` はサービス側エラーとして扱う。
//!
//! 検出サービスは商品マスタに見つからない商品を `"id": null` で返す。
//! こうしたレコードも表示・除外できるよう、レスポンス内の最大IDの次から仮IDを振る。

use crate::error::{Error, Result};
use crate::session::ensure_unique_ids;
use crate::types::DetectionRecord;
use serde_json::Value;

/// 配列を包むキー（優先順）
const WRAPPER_KEYS: &[&str] = &["boxes", "results", "detections"];

/// パース結果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub records: Vec<DetectionRecord>,
    /// IDがなかったため仮IDを振ったレコードのID
    pub assigned_ids: Vec<i64>,
}

/// レスポンスをパースして検出結果の配列を返す
///
/// # Examples
/// ```
/// use shelf_audit_common::parse_detection_response;
///
/// let body = r#"[{"id": 1, "nombre": "Papel", "bbox": [], "alerta": "Producto faltante"}]"#;
/// let records = parse_detection_response(body).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub fn parse_detection_response(body: &str) -> Result<Vec<DetectionRecord>> {
    parse_detections(body).map(|parsed| parsed.records)
}

/// レスポンスをパースし、仮IDを振ったレコードも報告する
pub fn parse_detections(body: &str) -> Result<ParsedResponse> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("JSON inválido: {}", e)))?;

    let array = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => {
            if let Some(message) = map.get("error").and_then(Value::as_str) {
                return Err(Error::Parse(format!("error del servicio de detección: {}", message)));
            }
            WRAPPER_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .ok_or_else(|| Error::Parse("la respuesta no contiene detecciones".into()))?
        }
        _ => return Err(Error::Parse("las detecciones no son un arreglo".into())),
    };

    let mut items = match array {
        Value::Array(items) => items,
        _ => return Err(Error::Parse("las detecciones no son un arreglo".into())),
    };
    let assigned_ids = assign_missing_ids(&mut items);

    let records: Vec<DetectionRecord> = serde_json::from_value(Value::Array(items))
        .map_err(|e| Error::Parse(format!("formato de detección inválido: {}", e)))?;

    ensure_unique_ids(&records)?;
    Ok(ParsedResponse {
        records,
        assigned_ids,
    })
}

/// `id` が null または欠けているオブジェクトに仮IDを書き込む
fn assign_missing_ids(items: &mut [Value]) -> Vec<i64> {
    let mut next = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1;

    let mut assigned = Vec::new();
    for item in items.iter_mut() {
        let Value::Object(map) = item else {
            continue;
        };
        if map.get("id").map_or(true, Value::is_null) {
            map.insert("id".to_string(), Value::from(next));
            assigned.push(next);
            next += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_parse_bare_array() {
        let body = r#"[
            {"id": 1, "nombre": "Papel Regio Rinde 4pz", "bbox": [30, 30, 60, 60], "alerta": "Producto mal acomodado"},
            {"id": 2, "nombre": "Shampoo", "bbox": [], "alerta": "Producto faltante"}
        ]"#;

        let records = parse_detection_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bbox, Some(BoundingBox::new(30.0, 30.0, 60.0, 60.0)));
        assert_eq!(records[1].bbox, None);
        assert!(records[1].status.is_missing());
    }

    #[test]
    fn test_parse_wrapped() {
        let body = r#"{"boxes": [{"id": 3, "nombre": "x", "alerta": "Producto correcto"}]}"#;
        let records = parse_detection_response(body).unwrap();
        assert_eq!(records[0].id, 3);
        assert!(records[0].status.is_correct());
    }

    #[test]
    fn test_parse_backend_classes() {
        let body = r#"{"results": [
            {"id": 10, "nombre": "a", "bbox": [1, 2, 3, 4], "clase": "Mal charola"},
            {"id": 11, "nombre": "b", "bbox": [1, 2, 3, 4], "clase": "Bien acomodado"}
        ]}"#;
        let records = parse_detection_response(body).unwrap();
        assert!(records[0].status.is_live_alert());
        assert!(records[1].status.is_correct());
    }

    #[test]
    fn test_parse_service_error() {
        let body = r#"{"error": "No image provided"}"#;
        let err = parse_detection_response(body).unwrap_err();
        assert!(err.to_string().contains("No image provided"));
    }

    #[test]
    fn test_parse_without_records() {
        let body = r#"{"result": "No anomalies detected"}"#;
        assert!(matches!(parse_detection_response(body), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_duplicate_ids() {
        let body = r#"[
            {"id": 1, "nombre": "a", "alerta": "Producto correcto"},
            {"id": 1, "nombre": "b", "alerta": "Producto correcto"}
        ]"#;
        assert!(parse_detection_response(body).is_err());
    }

    #[test]
    fn test_parse_null_ids_get_provisional_ids() {
        let body = r#"{"results": [
            {"id": 7, "nombre": "Leche", "bbox": [1, 2, 3, 4], "clase": "Mal Estante"},
            {"id": null, "nombre": "Pan", "bbox": [], "clase": "Producto faltante"},
            {"nombre": "Jugo", "bbox": [], "clase": "Producto faltante"}
        ]}"#;

        let parsed = parse_detections(body).unwrap();
        assert_eq!(parsed.assigned_ids, vec![8, 9]);
        let ids: Vec<i64> = parsed.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
        assert!(parsed.records[1].status.is_missing());
    }

    #[test]
    fn test_parse_all_ids_missing() {
        let body = r#"[{"id": null, "nombre": "a", "clase": "Producto faltante"}]"#;
        let records = parse_detection_response(body).unwrap();
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_detection_response("not json").is_err());
        assert!(parse_detection_response("42").is_err());
    }
}
