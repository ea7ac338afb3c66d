//! Display formatting of cell values.
//!
//! Numbers use the French conventions of the stock template: a space as the
//! thousands separator and, for amounts, a comma as the decimal separator.

use crate::data::CellValue;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// An ISO date, optionally followed by a time of day.
static ISO_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})(?:[ T][0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?)?$")
        .unwrap()
});

/// How a placeholder's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// `100000` → `100 000,00 €`
    #[serde(alias = "monetaire", alias = "monétaire")]
    Currency,
    /// `1234` → `1 234 m²`
    #[serde(alias = "surface")]
    Area,
    /// `2024-03-15` → `15/03/2024`
    Date,
}

/// Format `value` for display, applying `format` when it fits the value.
///
/// A format that does not apply (currency on text, date on a number) falls
/// back to the value's plain text.
pub fn format_value(value: &CellValue, format: Option<ValueFormat>) -> String {
    match (format, value) {
        (_, CellValue::Empty) => String::new(),
        (Some(ValueFormat::Currency), CellValue::Integer(_) | CellValue::Float(_)) => {
            let amount = value.as_f64().unwrap_or_default();
            format_currency(amount)
        }
        (Some(ValueFormat::Area), CellValue::Integer(_) | CellValue::Float(_)) => {
            format!("{} m²", group_number(&value.to_string()))
        }
        (Some(ValueFormat::Date), CellValue::Text(text)) => {
            format_date(text).unwrap_or_else(|| text.clone())
        }
        _ => value.to_string(),
    }
}

fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let grouped = group_number(&fixed);
    format!("{} €", grouped.replace('.', ","))
}

fn format_date(text: &str) -> Option<String> {
    let caps = ISO_DATE_REGEX.captures(text.trim())?;
    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    Some(date.format("%d/%m/%Y").to_string())
}

/// Insert a space every three digits of the integer part of `number`.
fn group_number(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(
            format_value(&CellValue::Integer(100000), Some(ValueFormat::Currency)),
            "100 000,00 €"
        );
        assert_eq!(
            format_value(&CellValue::Float(1234567.891), Some(ValueFormat::Currency)),
            "1 234 567,89 €"
        );
        assert_eq!(
            format_value(&CellValue::Integer(12), Some(ValueFormat::Currency)),
            "12,00 €"
        );
    }

    #[test]
    fn test_area() {
        assert_eq!(
            format_value(&CellValue::Integer(1234), Some(ValueFormat::Area)),
            "1 234 m²"
        );
        assert_eq!(
            format_value(&CellValue::Float(1234.5), Some(ValueFormat::Area)),
            "1 234.5 m²"
        );
        assert_eq!(
            format_value(&CellValue::Integer(999), Some(ValueFormat::Area)),
            "999 m²"
        );
    }

    #[test]
    fn test_format_ignored_for_text() {
        let text = CellValue::Text("non communiqué".into());
        assert_eq!(
            format_value(&text, Some(ValueFormat::Currency)),
            "non communiqué"
        );
        assert_eq!(format_value(&text, Some(ValueFormat::Date)), "non communiqué");
        assert_eq!(format_value(&CellValue::Empty, Some(ValueFormat::Area)), "");
        assert_eq!(format_value(&CellValue::Integer(5), Some(ValueFormat::Date)), "5");
    }

    #[test]
    fn test_date() {
        let date = |s: &str| format_value(&CellValue::Text(s.into()), Some(ValueFormat::Date));
        assert_eq!(date("2024-03-15"), "15/03/2024");
        assert_eq!(date("2024-03-15 00:00:00"), "15/03/2024");
        assert_eq!(date("2024-03-15T10:30"), "15/03/2024");
        assert_eq!(date("2024-02-30"), "2024-02-30");
        assert_eq!(date("2023 - 2024"), "2023 - 2024");
    }

    #[test]
    fn test_plain_display() {
        assert_eq!(format_value(&CellValue::Integer(42), None), "42");
        assert_eq!(format_value(&CellValue::Text("Lyon".into()), None), "Lyon");
    }

    #[test]
    fn test_group_number() {
        assert_eq!(group_number("1"), "1");
        assert_eq!(group_number("1000"), "1 000");
        assert_eq!(group_number("123456"), "123 456");
        assert_eq!(group_number("-1234.50"), "-1 234.50");
    }

    #[test]
    fn test_format_names() {
        let parsed: Vec<ValueFormat> =
            serde_json::from_str(r#"["currency", "monétaire", "surface", "area", "date"]"#)
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                ValueFormat::Currency,
                ValueFormat::Currency,
                ValueFormat::Area,
                ValueFormat::Area,
                ValueFormat::Date
            ]
        );
    }
}
