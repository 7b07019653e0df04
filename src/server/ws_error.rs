/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Every error carries a code, a human-readable message and an optional context
/// (usually the player id).
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

/// Formats a WebSocket error frame, shaped like any other `ServerWsMessage`.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MESSAGE").
/// - `message`: Human-readable error message.
/// - `context`: Optional context (e.g. player_id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "Error",
        "data": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let body = json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    });
    HttpResponse::build(status).content_type("application/json").body(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::game_session::messages::ServerWsMessage;

    #[test]
    fn test_ws_error_message_shape() {
        let raw = ws_error_message("INVALID_MESSAGE", "Invalid \"client\" message", Some("alice"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["code"], "INVALID_MESSAGE");
        assert_eq!(value["data"]["message"], "Invalid \"client\" message");
        assert_eq!(value["data"]["context"], "alice");
    }

    #[test]
    fn test_ws_error_message_is_a_server_message() {
        let raw = ws_error_message("JOIN_FAILED", "Game manager unavailable", None);
        let msg: ServerWsMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            msg,
            ServerWsMessage::Error {
                code: "JOIN_FAILED".to_string(),
                message: "Game manager unavailable".to_string(),
                context: String::new(),
            }
        );
    }

    #[test]
    fn test_http_error_response_status() {
        let resp = http_error_response("MISSING_PLAYER", "Missing player", None, StatusCode::BAD_REQUEST);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
