// ── Lenient JSON scalar coercion ──
//
// The host never enforces a schema: numbers arrive as floats, integers or
// numeric strings, booleans as `true`, `1` or `"on"`. These helpers coerce a
// single `Value` into the scalar a field expects, returning `None` when the
// value cannot represent it. `null` is always `None`.

use serde_json::Value;

/// Largest magnitude accepted when truncating a float into an `i64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn truncate(f: f64) -> Option<i64> {
    (f.is_finite() && f.abs() <= MAX_SAFE_INTEGER).then(|| f.trunc() as i64)
}

/// Integer reading: integral numbers, floats (truncated) and numeric strings.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Floating-point reading: any finite number or numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Boolean reading: JSON booleans, `0`/`1` style numbers and the usual
/// textual spellings.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Text reading: non-empty strings, and numbers rendered as text.
///
/// An empty string counts as absent so that text fields fall through to the
/// next candidate in their resolution chain.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// List of integer readings. Elements that cannot be coerced become `0` so
/// the list keeps its positional meaning.
pub fn as_i64_list(value: &Value) -> Option<Vec<i64>> {
    value
        .as_array()
        .map(|items| items.iter().map(|v| as_i64(v).unwrap_or(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_accept_floats_and_numeric_text() {
        assert_eq!(as_i64(&json!(42)), Some(42));
        assert_eq!(as_i64(&json!(42.9)), Some(42));
        assert_eq!(as_i64(&json!("-7")), Some(-7));
        assert_eq!(as_i64(&json!(" 12.5 ")), Some(12));
        assert_eq!(as_i64(&json!("abc")), None);
        assert_eq!(as_i64(&json!(null)), None);
        assert_eq!(as_i64(&json!(true)), None);
    }

    #[test]
    fn zero_is_a_reading_not_an_absence() {
        assert_eq!(as_i64(&json!(0)), Some(0));
        assert_eq!(as_f64(&json!(0.0)), Some(0.0));
        assert_eq!(as_bool(&json!(0)), Some(false));
        assert_eq!(as_bool(&json!(false)), Some(false));
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(as_bool(&json!(true)), Some(true));
        assert_eq!(as_bool(&json!(1)), Some(true));
        assert_eq!(as_bool(&json!("On")), Some(true));
        assert_eq!(as_bool(&json!("off")), Some(false));
        assert_eq!(as_bool(&json!("maybe")), None);
    }

    #[test]
    fn empty_text_counts_as_absent() {
        assert_eq!(as_text(&json!("")), None);
        assert_eq!(as_text(&json!("mowing")), Some("mowing".into()));
        assert_eq!(as_text(&json!(3.5)), Some("3.5".into()));
        assert_eq!(as_text(&json!([1])), None);
    }

    #[test]
    fn integer_lists_keep_positions() {
        assert_eq!(as_i64_list(&json!([1, "x", 3])), Some(vec![1, 0, 3]));
        assert_eq!(as_i64_list(&json!("1,2")), None);
    }
}
