//! Response envelope decoding.
//!
//! Two backend conventions are supported (see [`EnvelopeStyle`]): the coded
//! `{code, message, data}` envelope and plain HTTP statuses with a JSON
//! error body. Decoding happens once, in the transport, so callers only ever
//! see the payload or a typed [`ApiError`].

use crate::config::EnvelopeStyle;
use crate::error::ApiError;
use crate::security::ERROR_BODY_PREVIEW_LIMIT;
use http::StatusCode;
use serde_json::Value;

/// Decode a completed response into its payload value.
pub(crate) fn decode(
    style: EnvelopeStyle,
    status: StatusCode,
    body: &[u8],
) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }

    let value = parse_body(body)?;
    match style {
        EnvelopeStyle::Coded => decode_coded(value),
        EnvelopeStyle::Plain => Ok(unwrap_data(value)),
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.is_empty() {
        // 204-style responses carry no payload.
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Protocol(format!("invalid JSON body: {e}")))
}

fn decode_coded(value: Value) -> Result<Value, ApiError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let Some(object) = value.as_object() else {
        return Err(ApiError::Protocol(
            "expected a coded envelope object".to_owned(),
        ));
    };
    let Some(code) = object.get("code").and_then(Value::as_i64) else {
        return Err(ApiError::Protocol(
            "envelope is missing an integer `code` field".to_owned(),
        ));
    };
    if code == 0 {
        return Ok(object.get("data").cloned().unwrap_or(Value::Null));
    }
    Err(ApiError::Rejected {
        code,
        message: object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_owned(),
    })
}

/// Plain style: some endpoints wrap the payload in a `data` field, others
/// return it bare; prefer the wrapped form when present.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(ref object) if object.contains_key("data") => {
            object.get("data").cloned().unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });

    let body_preview = if body.len() > ERROR_BODY_PREVIEW_LIMIT {
        "<body too large for preview>".to_owned()
    } else {
        String::from_utf8_lossy(body).into_owned()
    };

    ApiError::Status {
        status: status.as_u16(),
        message,
        body_preview,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn coded(status: u16, body: &Value) -> Result<Value, ApiError> {
        decode(
            EnvelopeStyle::Coded,
            StatusCode::from_u16(status).unwrap(),
            body.to_string().as_bytes(),
        )
    }

    fn plain(status: u16, body: &Value) -> Result<Value, ApiError> {
        decode(
            EnvelopeStyle::Plain,
            StatusCode::from_u16(status).unwrap(),
            body.to_string().as_bytes(),
        )
    }

    #[test]
    fn test_coded_success_yields_data() {
        let value = coded(200, &json!({"code": 0, "message": "success", "data": {"id": 7}}));
        assert_eq!(value.unwrap(), json!({"id": 7}));
    }

    #[test]
    fn test_coded_success_without_data_is_null() {
        assert_eq!(coded(200, &json!({"code": 0})).unwrap(), Value::Null);
    }

    #[test]
    fn test_coded_nonzero_code_is_rejected() {
        let err = coded(200, &json!({"code": 1002, "message": "product sold out"})).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                code: 1002,
                message: "product sold out".to_owned()
            }
        );
    }

    #[test]
    fn test_coded_missing_code_is_protocol_error() {
        let err = coded(200, &json!({"data": 1})).unwrap_err();
        assert!(matches!(err, ApiError::Protocol(_)));
    }

    #[test]
    fn test_coded_non_object_is_protocol_error() {
        let err = coded(200, &json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ApiError::Protocol(_)));
    }

    #[test]
    fn test_plain_prefers_wrapped_data() {
        let value = plain(200, &json!({"data": {"balance": 12.5}})).unwrap();
        assert_eq!(value, json!({"balance": 12.5}));
    }

    #[test]
    fn test_plain_bare_body_passes_through() {
        let value = plain(200, &json!({"balance": 12.5})).unwrap();
        assert_eq!(value, json!({"balance": 12.5}));
    }

    #[test]
    fn test_status_error_message_from_body() {
        let err = plain(404, &json!({"message": "order not found"})).unwrap_err();
        match err {
            ApiError::Status {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "order not found");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_error_field() {
        let err = plain(500, &json!({"error": "boom"})).unwrap_err();
        assert!(matches!(err, ApiError::Status { message, .. } if message == "boom"));
    }

    #[test]
    fn test_status_error_without_body_uses_reason() {
        let err = decode(EnvelopeStyle::Coded, StatusCode::BAD_GATEWAY, b"").unwrap_err();
        assert!(matches!(err, ApiError::Status { message, .. } if message == "Bad Gateway"));
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(
            decode(EnvelopeStyle::Plain, StatusCode::NO_CONTENT, b"").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_malformed_json_is_protocol_error() {
        let err = decode(EnvelopeStyle::Coded, StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::Protocol(_)));
    }

    #[test]
    fn test_large_error_body_preview_is_capped() {
        let body = vec![b'x'; ERROR_BODY_PREVIEW_LIMIT + 1];
        let err = decode(EnvelopeStyle::Plain, StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err.unwrap_err() {
            ApiError::Status { body_preview, .. } => {
                assert_eq!(body_preview, "<body too large for preview>");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
