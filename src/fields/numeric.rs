use serde_json::Value;

/// Tolerant numeric parse for vendor-supplied strings. Strips everything
/// except digits, `.` and `-` before parsing, so "$1,234.50", "15%" and
/// " 12.50 " all come out as numbers. Anything unparsable is `0.0`.
pub fn parse_clean_str(raw: &str) -> f64 {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match clean.parse::<f64>() {
        Ok(num) if num.is_finite() => num,
        _ => 0.0,
    }
}

/// Same coercion over a JSON value: numbers pass through, strings go
/// through `parse_clean_str`, everything else (null, bool, arrays) is `0.0`.
pub fn parse_clean_number(value: &Value) -> f64 {
    match value {
        Value::Number(num) => num.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(raw) => parse_clean_str(raw),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{parse_clean_number, parse_clean_str};

    #[test]
    fn strips_currency_and_separators() {
        assert_eq!(parse_clean_str("$1,234.50"), 1234.5);
        assert_eq!(parse_clean_str("15%"), 15.0);
        assert_eq!(parse_clean_str(" 12.50 "), 12.5);
        assert_eq!(parse_clean_str("-3.25 USD"), -3.25);
    }

    #[test]
    fn parse_matches_pre_stripped_input() {
        for raw in ["$25.00", "1,500", "99 %", "  7.00"] {
            let stripped: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            assert_eq!(parse_clean_str(raw), parse_clean_str(&stripped));
        }
    }

    #[test]
    fn degenerate_input_is_zero() {
        assert_eq!(parse_clean_str(""), 0.0);
        assert_eq!(parse_clean_str("N/A"), 0.0);
        assert_eq!(parse_clean_str("-"), 0.0);
        assert_eq!(parse_clean_str("..."), 0.0);
        assert_eq!(parse_clean_number(&Value::Null), 0.0);
        assert_eq!(parse_clean_number(&json!(true)), 0.0);
    }

    #[test]
    fn json_numbers_pass_through() {
        assert_eq!(parse_clean_number(&json!(42)), 42.0);
        assert_eq!(parse_clean_number(&json!(12.5)), 12.5);
        assert_eq!(parse_clean_number(&json!("$9.99")), 9.99);
    }
}
