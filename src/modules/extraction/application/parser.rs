/// Defensive parsing of free-form inference responses
///
/// The API contract guarantees nothing about the response body beyond
/// "probably contains one JSON object". The parser pulls out the first
/// balanced `{...}` block, tolerating any surrounding prose, and maps the
/// recognized fields with null defaults for anything missing or mangled.
use crate::modules::extraction::domain::entities::ExtractedFields;
use serde_json::Value;

/// Extract the first balanced `{...}` block from free-form text
///
/// Brace counting skips over string literals so embedded braces in field
/// values cannot unbalance the scan.
pub(crate) fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse the recognized card fields out of a raw model response
///
/// Returns None only when no parseable JSON object exists at all; a parsed
/// object with unusable members still succeeds with those members null.
pub(crate) fn parse_card_fields(raw: &str) -> Option<ExtractedFields> {
    let block = extract_json_block(raw)?;
    let value: Value = serde_json::from_str(block).ok()?;
    let obj = value.as_object()?;

    Some(ExtractedFields {
        player: string_field(obj, "player"),
        year: obj.get("year").and_then(Value::as_i64).map(|y| y as i32),
        card_number: string_field(obj, "card_number"),
        set_name: string_field(obj, "set_name"),
        condition_estimate: string_field(obj, "condition_estimate"),
        is_parallel: obj.get("is_parallel").and_then(Value::as_bool),
        parallel_type: string_field(obj, "parallel_type"),
        confidence: obj.get("confidence").and_then(Value::as_f64),
    })
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
