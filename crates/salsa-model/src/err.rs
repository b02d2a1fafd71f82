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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingTableError {
    table: String,
}

impl MissingTableError {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl std::fmt::Display for MissingTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "required input table `{}` is missing", self.table)
    }
}

impl std::error::Error for MissingTableError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingColumnError {
    table: String,
    column: String,
}

impl MissingColumnError {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl std::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "required column `{}` is missing from table `{}`",
            self.column, self.table
        )
    }
}

impl std::error::Error for MissingColumnError {}

/// Structural failures while validating the three raw input tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizeError {
    MissingTable(MissingTableError),
    MissingColumn(MissingColumnError),
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::MissingTable(e) => write!(f, "{}", e),
            NormalizeError::MissingColumn(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<MissingTableError> for NormalizeError {
    fn from(err: MissingTableError) -> Self {
        NormalizeError::MissingTable(err)
    }
}

impl From<MissingColumnError> for NormalizeError {
    fn from(err: MissingColumnError) -> Self {
        NormalizeError::MissingColumn(err)
    }
}

/// Failures while deriving the frozen problem from normalized tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelError {
    Normalize(NormalizeError),
    /// No employee survived classification.
    EmptyWorkforce,
    /// No calendar day survived classification.
    EmptyHorizon,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Normalize(e) => write!(f, "{}", e),
            ModelError::EmptyWorkforce => {
                write!(f, "no employee remains after input classification")
            }
            ModelError::EmptyHorizon => {
                write!(f, "no calendar day remains after input classification")
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<NormalizeError> for ModelError {
    fn from(err: NormalizeError) -> Self {
        ModelError::Normalize(err)
    }
}

impl From<MissingTableError> for ModelError {
    fn from(err: MissingTableError) -> Self {
        ModelError::Normalize(NormalizeError::MissingTable(err))
    }
}

impl From<MissingColumnError> for ModelError {
    fn from(err: MissingColumnError) -> Self {
        ModelError::Normalize(NormalizeError::MissingColumn(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_name_the_offending_parts() {
        let e = NormalizeError::from(MissingTableError::new("calendario"));
        assert!(e.to_string().contains("calendario"));

        let e = NormalizeError::from(MissingColumnError::new("estimativas", "pess_obj"));
        let msg = e.to_string();
        assert!(msg.contains("estimativas"));
        assert!(msg.contains("pess_obj"));
    }

    #[test]
    fn test_model_error_wraps_normalize_error() {
        let e = ModelError::from(MissingTableError::new("colaborador"));
        match e {
            ModelError::Normalize(NormalizeError::MissingTable(inner)) => {
                assert_eq!(inner.table(), "colaborador");
            }
            other => panic!("expected MissingTable, got {other:?}"),
        }
    }
}
