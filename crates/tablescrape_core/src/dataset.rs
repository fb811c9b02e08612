use std::fmt;

/// One cell of an extracted table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            // Whole numbers print without a trailing ".0".
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("row {row} has {actual} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A single parsed table: column labels plus rows aligned to them.
///
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularDataset {
    /// Builds a dataset, rejecting any row whose length differs from the label count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, DatasetError> {
        let expected = columns.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(DatasetError::RaggedRow {
                row,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(-3.0).to_string(), "-3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn ragged_row_is_rejected_with_position() {
        let err = TabularDataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::from("1"), CellValue::from("2")],
                vec![CellValue::from("3")],
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DatasetError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn duplicate_labels_are_allowed() {
        let table = TabularDataset::new(
            vec!["x".into(), "x".into()],
            vec![vec![CellValue::Empty, CellValue::Number(1.0)]],
        )
        .unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 1);
    }
}
