//! Cleaning of raw cell and JSON values.
//!
//! Nothing in here fails: anything that can not be understood becomes `None`.

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A scalar as it was read from a source, before any cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl RawValue {
    pub fn text<S: Into<String>>(text: S) -> Self {
        RawValue::Text(text.into())
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RawValue::Missing,
            Value::Bool(flag) => RawValue::Bool(flag),
            Value::Number(number) => match number.as_i64() {
                Some(int) => RawValue::Int(int),
                None => number.as_f64().map_or(RawValue::Missing, RawValue::Float),
            },
            Value::String(text) => RawValue::Text(text),
            other => RawValue::Text(other.to_string()),
        }
    }
}

/// Trims text and drops the "empty" markers: the missing marker, `""`, `"-"`
/// and `NaN`. Trimming happens first, so `"  - "` is empty as well.
pub fn normalize(raw: RawValue) -> Option<RawValue> {
    match raw {
        RawValue::Missing => None,
        RawValue::Float(value) if value.is_nan() => None,
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed == "-" {
                None
            } else if trimmed.len() == text.len() {
                Some(RawValue::Text(text))
            } else {
                Some(RawValue::Text(trimmed.to_owned()))
            }
        }
        other => Some(other),
    }
}

/// Normalized value rendered as text, for free-text columns.
pub fn normalize_text(raw: RawValue) -> Option<String> {
    match normalize(raw)? {
        RawValue::Text(text) => Some(text),
        RawValue::Int(value) => Some(value.to_string()),
        RawValue::Float(value) => Some(value.to_string()),
        RawValue::Bool(value) => Some(value.to_string()),
        RawValue::Date(date) => Some(date.format(DATE_FORMAT).to_string()),
        RawValue::Missing => None,
    }
}

/// Dates are accepted as native date values or as `YYYY-MM-DD` text.
pub fn parse_date(raw: RawValue) -> Option<NaiveDate> {
    match normalize(raw)? {
        RawValue::Date(date) => Some(date),
        RawValue::Text(text) => NaiveDate::parse_from_str(&text, DATE_FORMAT).ok(),
        _ => None,
    }
}

pub fn parse_float(raw: RawValue) -> Option<f64> {
    let value = match normalize(raw)? {
        RawValue::Int(value) => value as f64,
        RawValue::Float(value) => value,
        RawValue::Text(text) => text.parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Integers; floats are truncated toward zero.
pub fn parse_int(raw: RawValue) -> Option<i64> {
    match normalize(raw)? {
        RawValue::Int(value) => Some(value),
        RawValue::Float(value) if value.is_finite() => Some(value.trunc() as i64),
        RawValue::Text(text) => text
            .parse::<i64>()
            .ok()
            .or_else(|| parse_float(RawValue::Text(text)).map(|value| value.trunc() as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_markers_are_absent() {
        assert_eq!(normalize("".into()), None);
        assert_eq!(normalize("-".into()), None);
        assert_eq!(normalize("  - ".into()), None);
        assert_eq!(normalize("   ".into()), None);
        assert_eq!(normalize(RawValue::Missing), None);
        assert_eq!(normalize(RawValue::Float(f64::NAN)), None);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(normalize(" 바다 ".into()), Some(RawValue::text("바다")));
        assert_eq!(normalize_text("--".into()), Some("--".to_owned()));
    }

    #[test]
    fn non_text_passes_through() {
        assert_eq!(normalize(RawValue::Int(0)), Some(RawValue::Int(0)));
        assert_eq!(normalize(RawValue::Bool(false)), Some(RawValue::Bool(false)));
        assert_eq!(normalize_text(RawValue::Float(12.0)), Some("12".to_owned()));
    }

    #[test]
    fn dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15".into()), expected);
        assert_eq!(parse_date(" 2024-03-15 ".into()), expected);
        assert_eq!(parse_date(RawValue::Date(expected.unwrap())), expected);
        assert_eq!(parse_date("2024/03/15".into()), None);
        assert_eq!(parse_date("-".into()), None);
        assert_eq!(parse_date(RawValue::Int(20240315)), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_float("37.5".into()), Some(37.5));
        assert_eq!(parse_float(RawValue::Int(3)), Some(3.0));
        assert_eq!(parse_float("abc".into()), None);
        assert_eq!(parse_float("NaN".into()), None);
        assert_eq!(parse_int(RawValue::Float(99.9)), Some(99));
        assert_eq!(parse_int(RawValue::Float(-2.7)), Some(-2));
        assert_eq!(parse_int("120".into()), Some(120));
        assert_eq!(parse_int("120.5".into()), Some(120));
        assert_eq!(parse_int("백명".into()), None);
    }

    #[test]
    fn json_values() {
        use serde_json::json;

        assert_eq!(RawValue::from(json!(null)), RawValue::Missing);
        assert_eq!(RawValue::from(json!(35)), RawValue::Int(35));
        assert_eq!(RawValue::from(json!(35.25)), RawValue::Float(35.25));
        assert_eq!(RawValue::from(json!("35.25")), RawValue::text("35.25"));
    }
}
