//! Interpretation of simplification service replies.
//!
//! The service answers with a JSON document whose `status` field selects the
//! outcome. Anything that is not a well-formed `"success"` or `"blocked"`
//! document becomes [`SimplifyOutcome::Error`] with the best message available.

use crate::domain::{Result, SimplifierError, SimplifyOutcome};
use crate::service::ServiceReply;
use serde::Deserialize;
use serde_json::Value;

const STATUS_SUCCESS: &str = "success";
const STATUS_BLOCKED: &str = "blocked";
const BLOCKED_DEFAULT_MESSAGE: &str = "Text was blocked by the simplification service";

/// Error text as sent by the service: either a bare string or a structured
/// `{ "code": .., "message": .. }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detail { message: String },
    Other(Value),
}

impl ErrorField {
    fn into_message(self) -> Option<String> {
        match self {
            Self::Text(text) | Self::Detail { message: text } => {
                let text = text.trim().to_string();
                (!text.is_empty()).then_some(text)
            }
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SimplifyResponse {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    simplified_text: Option<String>,
    #[serde(default)]
    simplification_map: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ErrorField>,
}

/// Maps a simplify reply to its outcome.
///
/// # Rules
///
/// - `status == "blocked"` → `Blocked` with the service message
/// - `status == "success"` → `Success` with the simplified text and the term
///   map in service order
/// - any other status → `Error` with the service error text, or
///   `"Unrecognized response status: <status>"`
/// - non-JSON body → `Error` with the transport or decode failure
///
/// # Example
///
/// ```
/// use medsimplifier::service::{interpret_simplify_reply, RequestKind, ServiceReply};
/// use medsimplifier::SimplifyOutcome;
///
/// let reply = ServiceReply {
///     kind: RequestKind::Simplify,
///     status: 400,
///     body: br#"{"status":"blocked","message":"M"}"#.to_vec(),
///     trace_context: None,
/// };
/// assert_eq!(
///     interpret_simplify_reply(&reply),
///     SimplifyOutcome::Blocked { message: "M".to_string() }
/// );
/// ```
#[must_use]
pub fn interpret_simplify_reply(reply: &ServiceReply) -> SimplifyOutcome {
    match parse_response(reply) {
        Ok(response) => outcome_from_response(response),
        Err(e) => SimplifyOutcome::Error {
            message: e.to_string(),
        },
    }
}

/// Parses the reply body, classifying non-JSON bodies as transport failures
/// when the host reported a failing status.
fn parse_response(reply: &ServiceReply) -> Result<SimplifyResponse> {
    match serde_json::from_slice::<Value>(&reply.body) {
        Ok(value @ Value::Object(_)) => Ok(serde_json::from_value(value)?),
        Ok(_) if reply.is_success_status() => Ok(SimplifyResponse::default()),
        Ok(_) => Err(transport_error(reply)),
        Err(e) if reply.is_success_status() => Err(SimplifierError::Decode(e)),
        Err(_) => Err(transport_error(reply)),
    }
}

fn transport_error(reply: &ServiceReply) -> SimplifierError {
    SimplifierError::Service {
        status: reply.status,
        body: String::from_utf8_lossy(&reply.body).into_owned(),
    }
}

fn outcome_from_response(response: SimplifyResponse) -> SimplifyOutcome {
    let status = match &response.status {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    match status.as_str() {
        STATUS_BLOCKED => SimplifyOutcome::Blocked {
            message: response
                .message
                .filter(|m| !m.trim().is_empty())
                .or_else(|| response.error.and_then(ErrorField::into_message))
                .unwrap_or_else(|| BLOCKED_DEFAULT_MESSAGE.to_string()),
        },
        STATUS_SUCCESS => SimplifyOutcome::Success {
            simplified_text: response.simplified_text.unwrap_or_default(),
            term_map: term_pairs(response.simplification_map),
        },
        other => {
            let label = if other.is_empty() { "(missing)" } else { other };
            SimplifyOutcome::Error {
                message: response
                    .error
                    .and_then(ErrorField::into_message)
                    .or_else(|| response.message.filter(|m| !m.trim().is_empty()))
                    .unwrap_or_else(|| format!("Unrecognized response status: {label}")),
            }
        }
    }
}

/// Extracts ordered term pairs. Relies on `serde_json`'s `preserve_order`
/// so object iteration follows the document order.
fn term_pairs(map: Option<Value>) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = map else {
        return Vec::new();
    };

    map.into_iter()
        .map(|(original, simplified)| {
            let simplified = match simplified {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (original, simplified)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::RequestKind;

    fn reply(status: u16, body: &str) -> ServiceReply {
        ServiceReply {
            kind: RequestKind::Simplify,
            status,
            body: body.as_bytes().to_vec(),
            trace_context: None,
        }
    }

    #[test]
    fn success_keeps_term_order() {
        let outcome = interpret_simplify_reply(&reply(
            200,
            r#"{"status":"success","simplified_text":"X",
                "simplification_map":{"takikardia":"jantung berdebar","hipertensi":"darah tinggi","anemia":"kurang darah"}}"#,
        ));

        assert_eq!(
            outcome,
            SimplifyOutcome::Success {
                simplified_text: "X".to_string(),
                term_map: vec![
                    ("takikardia".to_string(), "jantung berdebar".to_string()),
                    ("hipertensi".to_string(), "darah tinggi".to_string()),
                    ("anemia".to_string(), "kurang darah".to_string()),
                ],
            }
        );
    }

    #[test]
    fn success_without_map_has_no_pairs() {
        let outcome = interpret_simplify_reply(&reply(
            200,
            r#"{"status":"success","simplified_text":"X","simplification_map":{}}"#,
        ));
        assert_eq!(
            outcome,
            SimplifyOutcome::Success {
                simplified_text: "X".to_string(),
                term_map: vec![],
            }
        );
    }

    #[test]
    fn blocked_uses_service_message_regardless_of_http_status() {
        let outcome = interpret_simplify_reply(&reply(
            400,
            r#"{"status":"blocked","message":"Tidak ada istilah medis yang dikenali.","recognized_terms":[]}"#,
        ));
        assert_eq!(
            outcome,
            SimplifyOutcome::Blocked {
                message: "Tidak ada istilah medis yang dikenali.".to_string()
            }
        );
    }

    #[test]
    fn blocked_without_message_gets_default() {
        let outcome = interpret_simplify_reply(&reply(400, r#"{"status":"blocked"}"#));
        assert_eq!(
            outcome,
            SimplifyOutcome::Blocked {
                message: BLOCKED_DEFAULT_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn error_status_prefers_service_error_text() {
        let outcome = interpret_simplify_reply(&reply(
            500,
            r#"{"status":"error","error":"Model processing failed: boom"}"#,
        ));
        assert_eq!(
            outcome,
            SimplifyOutcome::Error {
                message: "Model processing failed: boom".to_string()
            }
        );
    }

    #[test]
    fn structured_error_object_is_unwrapped() {
        let outcome = interpret_simplify_reply(&reply(
            404,
            r#"{"status":"error","error":{"code":"NOT_FOUND","message":"Endpoint not found"}}"#,
        ));
        assert_eq!(
            outcome,
            SimplifyOutcome::Error {
                message: "Endpoint not found".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_without_error_text_is_unrecognized() {
        let outcome = interpret_simplify_reply(&reply(200, r#"{"status":"pending"}"#));
        assert_eq!(
            outcome,
            SimplifyOutcome::Error {
                message: "Unrecognized response status: pending".to_string()
            }
        );
    }

    #[test]
    fn error_without_status_field_uses_error_text() {
        let outcome = interpret_simplify_reply(&reply(503, r#"{"error":"Model not loaded. Please try again later."}"#));
        assert_eq!(
            outcome,
            SimplifyOutcome::Error {
                message: "Model not loaded. Please try again later.".to_string()
            }
        );
    }

    #[test]
    fn transport_failure_reports_status_and_body() {
        let outcome = interpret_simplify_reply(&reply(400, "error sending request: connection refused"));
        assert_eq!(
            outcome,
            SimplifyOutcome::Error {
                message: "Request failed with status 400: error sending request: connection refused"
                    .to_string()
            }
        );
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let outcome = interpret_simplify_reply(&reply(200, "<html>oops</html>"));
        match outcome {
            SimplifyOutcome::Error { message } => {
                assert!(message.starts_with("Invalid response from service"));
            }
            other => panic!("expected error outcome, got {other:?}"),
        }
    }
}
