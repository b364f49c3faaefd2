use serde::Deserialize;
use serde_json::Value;

/// Pulls a readable message out of an error body. Handles the OpenAI-style
/// `{"error": {...}}` envelope and the flat `{"code": .., "message": ..}` shape.
pub(crate) fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Debug, Deserialize)]
    struct ErrorEnvelope {
        error: Option<EnvelopeError>,
    }
    #[derive(Debug, Deserialize)]
    struct EnvelopeError {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        code: Option<Value>,
    }
    #[derive(Debug, Deserialize)]
    struct FlatError {
        message: Option<String>,
        code: Option<Value>,
    }

    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(err) = parsed.error
    {
        let message = err.message.unwrap_or_else(|| "unknown error".to_string());
        let kind = err.kind.unwrap_or_else(|| "unknown".to_string());
        let code = render_code(err.code);
        return Some(format!("{} (type={}, code={})", message, kind, code));
    }
    if let Ok(parsed) = serde_json::from_str::<FlatError>(body)
        && let Some(message) = parsed.message
    {
        return Some(format!("{} (code={})", message, render_code(parsed.code)));
    }
    Some(body.to_string())
}

fn render_code(code: Option<Value>) -> String {
    match code {
        Some(Value::String(code)) => code,
        Some(Value::Null) | None => "none".to_string(),
        Some(other) => other.to_string(),
    }
}
