//! Date-indexed table with labelled columns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::date::{Date, DateRange};
use super::series::DateSeries;
use crate::error::{CoreError, CoreResult};

/// A labelled column of a [`SeriesFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

/// A date index shared by any number of named, possibly sparse columns.
///
/// This is the tabular currency of the boundary: ledgers are read into it,
/// market data is assembled in it, and performance tables are written from
/// it. `None` marks a missing observation.
///
/// # Example
///
/// ```rust
/// use fundrate_core::types::{Date, SeriesFrame};
///
/// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
/// let mut frame = SeriesFrame::new(vec![d(1), d(3)]).unwrap();
/// frame.push_column("USDCLP", vec![Some(880.0), Some(884.0)]).unwrap();
///
/// let daily = frame.reindex_daily().forward_fill();
/// assert_eq!(daily.len(), 3);
/// assert_eq!(daily.get(1, "USDCLP"), Some(880.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesFrame {
    index: Vec<Date>,
    columns: Vec<Column>,
}

impl SeriesFrame {
    /// Creates a frame with the given index and no columns.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnorderedDates` if the index is not strictly increasing.
    pub fn new(index: Vec<Date>) -> CoreResult<Self> {
        if let Some(pair) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::UnorderedDates {
                previous: pair[0].to_string(),
                next: pair[1].to_string(),
            });
        }
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// A single-column frame holding `series`.
    #[must_use]
    pub fn from_series(name: impl Into<String>, series: &DateSeries) -> Self {
        Self {
            index: series.dates().to_vec(),
            columns: vec![Column {
                name: name.into(),
                values: series.values().iter().copied().map(Some).collect(),
            }],
        }
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch with the index or a duplicate name.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> CoreResult<()> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(CoreError::LengthMismatch {
                dates: self.index.len(),
                values: values.len(),
            });
        }
        if self.position(&name).is_some() {
            return Err(CoreError::DuplicateColumn { name });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// The date index.
    #[must_use]
    pub fn index(&self) -> &[Date] {
        &self.index
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Iterates `(name, values)` for every column.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.as_slice()))
    }

    /// Values of the named column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.position(name).map(|i| self.columns[i].values.as_slice())
    }

    /// Value at `row` in the named column.
    #[must_use]
    pub fn get(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name).and_then(|values| values.get(row).copied().flatten())
    }

    /// Extracts a column as a dense series.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownColumn` if absent and
    /// `CoreError::MissingValue` if any row is empty.
    pub fn series(&self, name: &str) -> CoreResult<DateSeries> {
        let values = self
            .column(name)
            .ok_or_else(|| CoreError::unknown_column(name))?;
        let dense = values
            .iter()
            .zip(&self.index)
            .map(|(v, date)| {
                v.ok_or_else(|| CoreError::MissingValue {
                    column: name.to_string(),
                    date: date.to_string(),
                })
            })
            .collect::<CoreResult<Vec<f64>>>()?;
        DateSeries::new(self.index.clone(), dense)
    }

    /// Re-indexes onto `index`; dates absent from this frame become `None`.
    #[must_use]
    pub fn reindex(&self, index: &[Date]) -> Self {
        let lookup: BTreeMap<Date, usize> =
            self.index.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: index
                    .iter()
                    .map(|d| lookup.get(d).and_then(|i| c.values[*i]))
                    .collect(),
            })
            .collect();
        Self {
            index: index.to_vec(),
            columns,
        }
    }

    /// Re-indexes onto every calendar day between the first and last date.
    #[must_use]
    pub fn reindex_daily(&self) -> Self {
        match (self.index.first(), self.index.last()) {
            (Some(start), Some(end)) => {
                let days: Vec<Date> = DateRange {
                    start: *start,
                    end: *end,
                }
                .days()
                .collect();
                self.reindex(&days)
            }
            _ => self.clone(),
        }
    }

    /// Propagates the last observed value forward over gaps.
    #[must_use]
    pub fn forward_fill(&self) -> Self {
        self.map_columns(|values| {
            let mut last = None;
            values
                .iter()
                .map(|v| {
                    if v.is_some() {
                        last = *v;
                    }
                    last
                })
                .collect()
        })
    }

    /// Propagates the next observed value backward over gaps.
    #[must_use]
    pub fn backward_fill(&self) -> Self {
        self.map_columns(|values| {
            let mut next = None;
            let mut filled: Vec<Option<f64>> = values
                .iter()
                .rev()
                .map(|v| {
                    if v.is_some() {
                        next = *v;
                    }
                    next
                })
                .collect();
            filled.reverse();
            filled
        })
    }

    /// Replaces every missing value with `value`.
    #[must_use]
    pub fn fill_missing(&self, value: f64) -> Self {
        self.map_columns(|values| values.iter().map(|v| Some(v.unwrap_or(value))).collect())
    }

    /// Rows whose date falls inside `range`.
    #[must_use]
    pub fn within(&self, range: &DateRange) -> Self {
        let lo = self.index.partition_point(|d| *d < range.start);
        let hi = self.index.partition_point(|d| *d <= range.end).max(lo);
        Self {
            index: self.index[lo..hi].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[lo..hi].to_vec(),
                })
                .collect(),
        }
    }

    /// Column-wise outer join: the result's index is the union of both
    /// indices and it carries every column of both frames.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateColumn` if a name appears in both frames.
    pub fn outer_join(&self, other: &Self) -> CoreResult<Self> {
        let mut union: Vec<Date> = self.index.iter().chain(&other.index).copied().collect();
        union.sort_unstable();
        union.dedup();

        let mut joined = self.reindex(&union);
        for column in other.reindex(&union).columns {
            joined.push_column(column.name, column.values)?;
        }
        Ok(joined)
    }

    /// Row-wise concatenation of frames sharing column names.
    ///
    /// Columns are matched by name; a column absent from one frame is `None`
    /// on that frame's rows. When two frames observe the same date, the later
    /// frame's non-missing values win.
    #[must_use]
    pub fn concat_rows(frames: &[Self]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for frame in frames {
            for name in frame.column_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        let mut rows: BTreeMap<Date, Vec<Option<f64>>> = BTreeMap::new();
        for frame in frames {
            for (row, date) in frame.index.iter().enumerate() {
                let slot = rows
                    .entry(*date)
                    .or_insert_with(|| vec![None; names.len()]);
                for (col, name) in names.iter().enumerate() {
                    if let Some(v) = frame.get(row, name) {
                        slot[col] = Some(v);
                    }
                }
            }
        }

        let index: Vec<Date> = rows.keys().copied().collect();
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(col, name)| Column {
                name,
                values: rows.values().map(|r| r[col]).collect(),
            })
            .collect();
        Self { index, columns }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn map_columns<F>(&self, f: F) -> Self
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        Self {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: f(&c.values),
                })
                .collect(),
        }
    }
}
