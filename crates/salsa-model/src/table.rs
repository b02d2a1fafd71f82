// Copyright (c) 2025 the salsa-scheduler authors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A small in-memory tabular value: named columns over rows of loosely typed
//! cells. The data adapters (database, CSV) hand these over already loaded;
//! the normalizer lowercases column names and coerces cell types.

use chrono::NaiveDate;

/// One cell of a raw input table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer coercion: integers pass through, floats round, numeric text
    /// parses. Everything else is `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.is_finite() => Some(v.round() as i64),
            Value::Text(s) => {
                let t = s.trim();
                t.parse::<i64>()
                    .ok()
                    .or_else(|| t.parse::<f64>().ok().map(|f| f.round() as i64))
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Date coercion: dates pass through, text is tried against the formats
    /// the upstream extracts produce.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => {
                let t = s.trim();
                NaiveDate::parse_from_str(t, "%Y-%m-%d")
                    .or_else(|_| NaiveDate::parse_from_str(t, "%Y-%m-%d %H:%M:%S"))
                    .or_else(|_| NaiveDate::parse_from_str(t, "%d/%m/%Y"))
                    .ok()
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

/// A named table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<S: Into<String>>(name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row. Short rows are padded with nulls so that positional
    /// access stays in bounds.
    pub fn push(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn lowercase_columns(&mut self) {
        for c in &mut self.columns {
            *c = c.to_lowercase();
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn cell(&self, row: usize, column: usize) -> &Value {
        &self.rows[row][column]
    }

    /// Cell lookup by column name; `None` when the column does not exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.column_index(column).map(|c| &self.rows[row][c])
    }

    pub fn set(&mut self, row: usize, column: usize, value: Value) {
        self.rows[row][column] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &Vec<Value>> {
        self.rows.iter()
    }

    /// Keeps only the rows matching the predicate; returns how many were
    /// dropped.
    pub fn retain_rows<F: FnMut(&[Value]) -> bool>(&mut self, mut keep: F) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| keep(r));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_value_int_coercions() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Float(6.6).as_i64(), Some(7));
        assert_eq!(Value::text(" 42 ").as_i64(), Some(42));
        assert_eq!(Value::text("2.9").as_i64(), Some(3));
        assert_eq!(Value::text("TIPO_DIA").as_i64(), None);
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn test_value_date_coercions() {
        assert_eq!(Value::Date(d(2025, 3, 9)).as_date(), Some(d(2025, 3, 9)));
        assert_eq!(Value::text("2025-03-09").as_date(), Some(d(2025, 3, 9)));
        assert_eq!(
            Value::text("2025-03-09 00:00:00").as_date(),
            Some(d(2025, 3, 9))
        );
        assert_eq!(Value::text("09/03/2025").as_date(), Some(d(2025, 3, 9)));
        assert_eq!(Value::text("not a date").as_date(), None);
        assert_eq!(Value::Int(5).as_date(), None);
    }

    #[test]
    fn test_table_lowercases_and_indexes_columns() {
        let mut t = Table::new("colaborador", ["MATRICULA", "C2D"]);
        t.push(vec![Value::Int(101), Value::Int(2)]);
        assert!(t.column_index("matricula").is_none());
        t.lowercase_columns();
        assert_eq!(t.column_index("matricula"), Some(0));
        assert_eq!(t.get(0, "c2d"), Some(&Value::Int(2)));
        assert_eq!(t.get(0, "missing"), None);
    }

    #[test]
    fn test_table_pads_short_rows_and_retains() {
        let mut t = Table::new("x", ["a", "b", "c"]);
        t.push(vec![Value::Int(1)]);
        t.push(vec![Value::Int(2), Value::text("keep")]);
        assert_eq!(t.cell(0, 2), &Value::Null);

        let dropped = t.retain_rows(|r| r[0].as_i64() == Some(2));
        assert_eq!(dropped, 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(0, "b").and_then(|v| v.as_str()), Some("keep"));
    }
}
