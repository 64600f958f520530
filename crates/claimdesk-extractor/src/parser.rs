//! Parse LLM output into record fields

use crate::error::ExtractorError;
use serde_json::{Map, Value};

/// Diagnostic stored on a record whose model output could not be parsed
pub const INVALID_JSON: &str = "Invalid JSON returned";

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Strip a surrounding markdown code fence from a model response
///
/// Handles a leading ```` ```json ```` (any case) or bare ```` ``` ```` and a
/// trailing ```` ``` ````. Unfenced text is returned trimmed.
///
/// # Examples
///
/// ```
/// use claimdesk_extractor::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let mut text = response.trim();

    let has_json_fence = text
        .get(..JSON_FENCE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(JSON_FENCE));
    if has_json_fence {
        text = &text[JSON_FENCE.len()..];
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Parse a model response into a JSON object
///
/// Fails when the response is not JSON after fence stripping, or is JSON
/// but not an object.
pub fn parse_record_fields(response: &str) -> Result<Map<String, Value>, ExtractorError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))?;

    match json {
        Value::Object(fields) => Ok(fields),
        other => Err(ExtractorError::InvalidFormat(format!(
            "Expected JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
