//! Sheet parsers.
//!
//! Every sheet follows the same layout: the first row is a header, the
//! first column of each later row is its label.

use calamine::{Data, Range};
use eio_core::{FlowError, FlowResult};
use nalgebra::DMatrix;

/// A numeric sheet with row and column labels
#[derive(Debug, Clone)]
pub struct LabelledMatrix {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: DMatrix<f64>,
}

/// A sheet of text records addressed by header name
#[derive(Debug, Clone)]
pub struct Records {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Records {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Text content of a cell. Empty and error cells have none.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
    }
}

/// Numeric content of a cell. Empty cells read as zero.
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Empty => Some(0.0),
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    }
}

fn header_width(sheet: &str, range: &Range<Data>) -> FlowResult<usize> {
    let header = range
        .rows()
        .next()
        .ok_or_else(|| FlowError::input_load(format!("sheet '{sheet}'"), "sheet is empty"))?;
    Ok(header.len())
}

/// Parse a labelled numeric sheet (A, D, N, x).
pub fn parse_labelled_matrix(sheet: &str, range: &Range<Data>) -> FlowResult<LabelledMatrix> {
    let width = header_width(sheet, range)?;
    if width < 2 {
        return Err(FlowError::input_load(
            format!("sheet '{sheet}'"),
            "expected a label column and at least one value column",
        ));
    }

    let mut rows = range.rows();
    let column_labels: Vec<String> = rows
        .next()
        .map(|header| header[1..].iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();

    let mut row_labels = Vec::new();
    let mut values = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let label = cell_text(&row[0]).unwrap_or_default();
        for (col, cell) in row[1..].iter().enumerate() {
            let value = cell_number(cell).ok_or_else(|| {
                FlowError::input_load(
                    format!("sheet '{sheet}'"),
                    format!(
                        "row {} ({label}), column {}: '{}' is not numeric",
                        offset + 2,
                        col + 2,
                        cell_text(cell).unwrap_or_default()
                    ),
                )
            })?;
            values.push(value);
        }
        row_labels.push(label);
    }

    let values = DMatrix::from_row_slice(row_labels.len(), width - 1, &values);
    Ok(LabelledMatrix {
        row_labels,
        column_labels,
        values,
    })
}

/// Parse a sheet of text records (indicators, commodities metadata).
pub fn parse_records(sheet: &str, range: &Range<Data>) -> FlowResult<Records> {
    header_width(sheet, range)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| cell_text(c).unwrap_or_default().trim().to_string()).collect())
        .unwrap_or_default();

    let rows = rows
        .filter(|row| !row.iter().all(|c| matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Records { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: &[Vec<Data>]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_parse_matrix_with_labels() {
        let range = range_from(&[
            vec![Data::Empty, s("1111A0/US"), s("1111B0/US")],
            vec![s("1111A0/US"), Data::Float(0.1), Data::Int(0)],
            vec![s("1111B0/US"), s("0.25"), Data::Empty],
        ]);

        let m = parse_labelled_matrix("A", &range).unwrap();
        assert_eq!(m.column_labels, vec!["1111A0/US", "1111B0/US"]);
        assert_eq!(m.row_labels, vec!["1111A0/US", "1111B0/US"]);
        assert_eq!(m.values.shape(), (2, 2));
        assert_eq!(m.values[(0, 0)], 0.1);
        assert_eq!(m.values[(1, 0)], 0.25);
        assert_eq!(m.values[(1, 1)], 0.0);
    }

    #[test]
    fn test_non_numeric_value_is_load_error() {
        let range = range_from(&[
            vec![Data::Empty, s("a")],
            vec![s("Greenhouse Gases"), s("lots")],
        ]);

        let err = parse_labelled_matrix("D", &range).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sheet 'D'"));
        assert!(message.contains("'lots' is not numeric"));
    }

    #[test]
    fn test_matrix_needs_value_column() {
        let range = range_from(&[vec![s("only")], vec![s("labels")]]);
        assert!(parse_labelled_matrix("x", &range).is_err());
    }

    #[test]
    fn test_parse_records() {
        let range = range_from(&[
            vec![s("Code"), s("Name"), s("Category")],
            vec![s("1111A0"), s("Oilseed farming"), Data::Empty],
            vec![Data::Int(221100), s("Electricity"), s("22: Utilities/Power")],
        ]);

        let records = parse_records("commodities_meta", &range).unwrap();
        assert_eq!(records.column("Name"), Some(1));
        assert_eq!(records.column("Missing"), None);
        assert_eq!(records.rows.len(), 2);
        assert_eq!(records.rows[0][2], None);
        assert_eq!(records.rows[1][0].as_deref(), Some("221100"));
    }

    #[test]
    fn test_cell_number_conversions() {
        assert_eq!(cell_number(&Data::Int(3)), Some(3.0));
        assert_eq!(cell_number(&s(" 1e3 ")), Some(1000.0));
        assert_eq!(cell_number(&s("")), Some(0.0));
        assert_eq!(cell_number(&Data::Bool(true)), None);
    }
}
