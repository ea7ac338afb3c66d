//! Tabular input: one row per slide.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Digits with at most one decimal point, e.g. `1200`, `12.5`, `.5`.
static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap());

/// One record: column name → raw cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Raw value of `column`, if the row has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Raw value of `column`, or the empty string.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// Rows in slide order, plus the column names seen.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in sorted order per row, not source order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Parse a JSON array of objects.
    ///
    /// Strings are kept verbatim, numbers and booleans are written out as
    /// text and `null` becomes an empty cell. Every column met in any row is
    /// listed once in `columns`: JSON objects are read as sorted maps, so the
    /// columns of the first row come in byte order of their names, followed
    /// by the ones only later rows have, sorted the same way per row.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(records) = value else {
            return Err(Error::InvalidData(
                "expected a JSON array of objects".to_string(),
            ));
        };

        let mut table = Table::default();
        for (idx, record) in records.into_iter().enumerate() {
            let Value::Object(fields) = record else {
                return Err(Error::InvalidData(format!("row {} is not an object", idx)));
            };

            let mut row = Row::new();
            for (column, cell) in fields {
                if !table.columns.contains(&column) {
                    table.columns.push(column.clone());
                }
                let text = match cell {
                    Value::Null => String::new(),
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
                };
                row.set(column, text);
            }
            table.rows.push(row);
        }

        log::debug!(
            "Loaded {} rows with {} columns",
            table.rows.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Keep at most `max` rows.
    pub fn truncate(&mut self, max: usize) {
        self.rows.truncate(max);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A cell value after type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Turn clearly numeric text into a number; leave everything else as text.
    ///
    /// Only plain digits with an optional single `.` count as numeric, so
    /// identifiers such as `A-12` or `1,5` stay text.
    pub fn coerce(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        if !NUMERIC_REGEX.is_match(raw) {
            return CellValue::Text(raw.to_string());
        }

        if !raw.contains('.') {
            if let Ok(n) = raw.parse::<i64>() {
                return CellValue::Integer(n);
            }
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Empty | CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(x) if x.fract() == 0.0 => write!(f, "{:.1}", x),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_stringifies_cells() {
        let table = Table::from_json(
            r#"[
                {"Ville": "Lyon", "Surface": 1200, "PMR": "x", "Note": null},
                {"Ville": "Caen", "Actif": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("Surface"), Some("1200"));
        assert_eq!(table.rows[0].get("Note"), Some(""));
        assert_eq!(table.rows[1].get("Actif"), Some("true"));
        assert_eq!(table.rows[1].value("Surface"), "");
        assert!(table.columns.contains(&"Actif".to_string()));
        assert_eq!(table.columns.len(), 5);
    }

    #[test]
    fn test_from_json_columns_are_sorted_per_row() {
        let table = Table::from_json(
            r#"[{"Ville": "Lyon", "Surface": 10, "Annee": 2020}, {"Ville": "Nice", "Client": "X", "Budget": 1}]"#,
        )
        .unwrap();
        assert_eq!(
            table.columns,
            vec!["Annee", "Surface", "Ville", "Budget", "Client"]
        );
    }

    #[test]
    fn test_from_json_rejects_non_tables() {
        assert!(matches!(
            Table::from_json(r#"{"a": 1}"#),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            Table::from_json(r#"[1, 2]"#),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(Table::from_json("[{"), Err(Error::JsonError(_))));
    }

    #[test]
    fn test_truncate() {
        let mut table = Table::from_json(r#"[{"a": "1"}, {"a": "2"}, {"a": "3"}]"#).unwrap();
        table.truncate(2);
        assert_eq!(table.len(), 2);
        table.truncate(10);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(CellValue::coerce(""), CellValue::Empty);
        assert_eq!(CellValue::coerce("1200"), CellValue::Integer(1200));
        assert_eq!(CellValue::coerce("007"), CellValue::Integer(7));
        assert_eq!(CellValue::coerce("12.5"), CellValue::Float(12.5));
        assert_eq!(CellValue::coerce(".5"), CellValue::Float(0.5));
        assert_eq!(CellValue::coerce("1,5"), CellValue::Text("1,5".into()));
        assert_eq!(CellValue::coerce("-3"), CellValue::Text("-3".into()));
        assert_eq!(CellValue::coerce(" 12"), CellValue::Text(" 12".into()));
        assert_eq!(CellValue::coerce("1.2.3"), CellValue::Text("1.2.3".into()));
        assert_eq!(
            CellValue::coerce("99999999999999999999"),
            CellValue::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        assert_eq!(CellValue::Float(12.0).to_string(), "12.0");
        assert_eq!(CellValue::Float(12.25).to_string(), "12.25");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
