//! Conversion of typed values (dates, currency amounts, counts) into replacement text

use crate::constants::format::{
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT, INPUT_DATE_FORMAT, THOUSANDS_SEPARATOR,
};
use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt::Write;

/// Formats a calendar date with a strftime pattern.
///
/// # Errors
/// `Error::ConfigValidation` when the pattern contains an unknown specifier.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::ConfigValidation(format!("invalid date format '{pattern}'")));
    }
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).map_err(|_| {
        Error::ConfigValidation(format!("date format '{pattern}' cannot render {date}"))
    })?;
    Ok(out)
}

/// `format_currency(30000, "$") == "$300.00"`, with thousands separators.
pub fn format_currency(amount_cents: i64, symbol: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let cents = amount_cents.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `format_count(1200) == "1,200"`
pub fn format_count(count: i64) -> String {
    let sign = if count < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(count.unsigned_abs()))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Converts one entry of a values document into replacement text.
///
/// Strings pass through untouched, numbers and booleans use their display
/// form, and the typed objects `{date, format?}`, `{currency, symbol?}` and
/// `{count}` are formatted. Anything else is rejected.
pub fn value_to_text(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Object(map) => typed_value_to_text(name, map),
        Value::Null => Err(invalid(name, "null is not a value; omit the entry instead")),
        Value::Array(_) => Err(invalid(name, "lists are not supported")),
    }
}

fn typed_value_to_text(name: &str, map: &Map<String, Value>) -> Result<String> {
    if let Some(date) = map.get("date") {
        let raw = date.as_str().ok_or_else(|| invalid(name, "date must be a string"))?;
        let date = NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT).map_err(|e| {
            invalid(name, &format!("date '{raw}' is not YYYY-MM-DD ({e})"))
        })?;
        let pattern = match map.get("format") {
            Some(Value::String(pattern)) => pattern.as_str(),
            Some(_) => return Err(invalid(name, "format must be a string")),
            None => DEFAULT_DATE_FORMAT,
        };
        return format_date(date, pattern);
    }

    if let Some(amount) = map.get("currency") {
        let amount =
            amount.as_f64().ok_or_else(|| invalid(name, "currency must be a number"))?;
        let symbol = match map.get("symbol") {
            Some(Value::String(symbol)) => symbol.as_str(),
            Some(_) => return Err(invalid(name, "symbol must be a string")),
            None => DEFAULT_CURRENCY_SYMBOL,
        };
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(invalid(name, &format!("currency amount {amount} is out of range")));
        }
        return Ok(format_currency(cents as i64, symbol));
    }

    if let Some(count) = map.get("count") {
        let count =
            count.as_i64().ok_or_else(|| invalid(name, "count must be an integer"))?;
        return Ok(format_count(count));
    }

    Err(invalid(name, "expected a string or one of {date}, {currency}, {count}"))
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::InvalidValue { name: name.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_currency() {
        assert_eq!(format_currency(30000, "$"), "$300.00");
        assert_eq!(format_currency(125_000_005, "$"), "$1,250,000.05");
        assert_eq!(format_currency(5, "€"), "€0.05");
        assert_eq!(format_currency(-1999, "$"), "-$19.99");
    }

    #[test]
    fn formats_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1200), "1,200");
        assert_eq!(format_count(-1_000_000), "-1,000,000");
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date, DEFAULT_DATE_FORMAT).unwrap(), "January 5, 2026");
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2026-01-05");
        assert!(format_date(date, "%Q").is_err());
    }

    #[test]
    fn scalar_values_use_display_form() {
        assert_eq!(value_to_text("A", &json!("$300.00")).unwrap(), "$300.00");
        assert_eq!(value_to_text("A", &json!(30)).unwrap(), "30");
        assert_eq!(value_to_text("A", &json!(true)).unwrap(), "true");
    }

    #[test]
    fn typed_values() {
        assert_eq!(
            value_to_text("D", &json!({"date": "2026-01-31"})).unwrap(),
            "January 31, 2026"
        );
        assert_eq!(
            value_to_text("D", &json!({"date": "2026-01-31", "format": "%d/%m/%Y"})).unwrap(),
            "31/01/2026"
        );
        assert_eq!(value_to_text("F", &json!({"currency": 300})).unwrap(), "$300.00");
        assert_eq!(
            value_to_text("F", &json!({"currency": 19.5, "symbol": "£"})).unwrap(),
            "£19.50"
        );
        assert_eq!(value_to_text("N", &json!({"count": 1200})).unwrap(), "1,200");
    }

    #[test]
    fn rejects_currency_out_of_range() {
        let err = value_to_text("FEE", &json!({"currency": 1e300})).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref reason, .. } if reason.contains("out of range")));
        let err = value_to_text("FEE", &json!({"currency": -1e17})).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert_eq!(
            value_to_text("FEE", &json!({"currency": 1e15})).unwrap(),
            "$1,000,000,000,000,000.00"
        );
    }

    #[test]
    fn rejects_unsupported_values() {
        for value in [json!(null), json!(["a"]), json!({"unknown": 1}), json!({"date": "31/01/2026"}), json!({"count": 1.5})] {
            let err = value_to_text("X", &value).unwrap_err();
            assert!(matches!(err, Error::InvalidValue { ref name, .. } if name == "X"), "{value}");
        }
    }
}
