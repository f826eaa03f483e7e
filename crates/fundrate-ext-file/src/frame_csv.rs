//! Reading and writing wide, date-indexed CSV tables.

use std::fs;
use std::path::Path;

use fundrate_core::{Date, SeriesFrame};

use crate::error::{FileError, FileResult};

/// Header of the index column.
pub const DATE_COLUMN: &str = "Date";

// =============================================================================
// Reading
// =============================================================================

/// Reads a wide CSV table into a [`SeriesFrame`].
///
/// The `Date` column may sit anywhere in the header; every other column
/// becomes a frame column. Rows may come in any order but dates must be
/// unique.
pub fn read_frame(path: &Path) -> FileResult<SeriesFrame> {
    let csv_err = |source: csv::Error| FileError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let date_pos = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| FileError::MissingDateColumn {
            path: path.to_path_buf(),
            column: DATE_COLUMN.to_string(),
        })?;
    let names: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_pos)
        .collect();

    let mut rows: Vec<(Date, Vec<Option<f64>>)> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map_or(0, csv::Position::line);
        let cell_err = |message: String| FileError::Cell {
            path: path.to_path_buf(),
            line,
            message,
        };

        let raw_date = record.get(date_pos).unwrap_or_default();
        let date = Date::parse(raw_date).map_err(|e| cell_err(e.to_string()))?;
        let values = names
            .iter()
            .map(|(i, name)| parse_cell(record.get(*i).unwrap_or_default(), name, &cell_err))
            .collect::<FileResult<Vec<_>>>()?;
        rows.push((date, values));
    }
    rows.sort_by_key(|(date, _)| *date);

    let mut frame = SeriesFrame::new(rows.iter().map(|(d, _)| *d).collect())?;
    for (col, (_, name)) in names.iter().enumerate() {
        frame.push_column(*name, rows.iter().map(|(_, v)| v[col]).collect())?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = frame.len(),
        columns = frame.width(),
        "read table"
    );
    Ok(frame)
}

fn parse_cell(
    raw: &str,
    column: &str,
    cell_err: &impl Fn(String) -> FileError,
) -> FileResult<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .map_err(|_| cell_err(format!("column '{column}': cannot parse '{raw}' as a number")))
}

// =============================================================================
// Writing
// =============================================================================

/// Writes `frame` as a wide CSV table, `Date` first.
///
/// Missing and NaN cells are written empty. Parent directories are created
/// and an existing file is replaced.
pub fn write_frame(path: &Path, frame: &SeriesFrame) -> FileResult<()> {
    let csv_err = |source: csv::Error| FileError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| csv_err(e.into()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = vec![DATE_COLUMN.to_string()];
    header.extend(frame.column_names().map(str::to_string));
    writer.write_record(&header).map_err(csv_err)?;

    let columns: Vec<&[Option<f64>]> = frame.columns().map(|(_, values)| values).collect();
    for (row, date) in frame.index().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(date.to_string());
        for values in &columns {
            record.push(match values[row] {
                Some(v) if !v.is_nan() => v.to_string(),
                _ => String::new(),
            });
        }
        writer.write_record(&record).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;

    tracing::debug!(path = %path.display(), rows = frame.len(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_read_sorts_rows_and_keeps_gaps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("valuations.csv");
        fs::write(
            &path,
            "Fondo A,Date,Fondo B\n1100,2024-02-01,\n1000, 2024-01-01 ,250.5\n",
        )
        .unwrap();

        let frame = read_frame(&path).unwrap();
        assert_eq!(frame.index(), &[d("2024-01-01"), d("2024-02-01")]);
        assert_eq!(frame.column_names().collect::<Vec<_>>(), ["Fondo A", "Fondo B"]);
        assert_eq!(frame.get(0, "Fondo B"), Some(250.5));
        assert_eq!(frame.get(1, "Fondo B"), None);
        assert_eq!(frame.get(1, "Fondo A"), Some(1100.0));
    }

    #[test]
    fn test_read_rejects_missing_date_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Fecha,Fondo A\n2024-01-01,1\n").unwrap();

        let err = read_frame(&path).unwrap_err();
        assert!(matches!(err, FileError::MissingDateColumn { .. }));
    }

    #[test]
    fn test_read_reports_bad_cell_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Date,Fondo A\n2024-01-01,1\n2024-01-02,abc\n").unwrap();

        match read_frame(&path).unwrap_err() {
            FileError::Cell { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_rejects_duplicate_dates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.csv");
        fs::write(&path, "Date,Fondo A\n2024-01-01,1\n2024-01-01,2\n").unwrap();

        assert!(matches!(read_frame(&path), Err(FileError::Core(_))));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("table.csv");

        let mut frame = SeriesFrame::new(vec![d("2024-01-01"), d("2024-01-02")]).unwrap();
        frame
            .push_column("Fondo A IRR", vec![Some(0.0), Some(f64::NAN)])
            .unwrap();
        frame
            .push_column("Fondo A Yield", vec![None, Some(0.125)])
            .unwrap();
        write_frame(&path, &frame).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Date,Fondo A IRR,Fondo A Yield\n2024-01-01,0,\n2024-01-02,,0.125\n"
        );

        let back = read_frame(&path).unwrap();
        assert_eq!(back.get(0, "Fondo A IRR"), Some(0.0));
        assert_eq!(back.get(1, "Fondo A IRR"), None);
        assert_eq!(back.get(1, "Fondo A Yield"), Some(0.125));
    }
}
