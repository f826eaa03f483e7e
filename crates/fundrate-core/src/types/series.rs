//! Date-indexed numeric series.

use serde::{Deserialize, Serialize};

use super::date::{Date, DateRange};
use crate::error::{CoreError, CoreResult};

/// An ordered sequence of `(Date, f64)` observations.
///
/// Dates are strictly increasing; construction rejects duplicates and
/// out-of-order indices, so every `DateSeries` in circulation satisfies the
/// invariant.
///
/// # Example
///
/// ```rust
/// use fundrate_core::types::{Date, DateSeries};
///
/// let d = |m, day| Date::from_ymd(2024, m, day).unwrap();
/// let series = DateSeries::new(vec![d(1, 1), d(2, 1), d(3, 1)], vec![1.0, 2.0, 3.0]).unwrap();
///
/// let through_feb = series.through(d(2, 15));
/// assert_eq!(through_feb.values(), &[1.0, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl DateSeries {
    /// Creates a series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LengthMismatch` if the vectors differ in length and
    /// `CoreError::UnorderedDates` if dates are not strictly increasing.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> CoreResult<Self> {
        if dates.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::UnorderedDates {
                previous: pair[0].to_string(),
                next: pair[1].to_string(),
            });
        }
        Ok(Self { dates, values })
    }

    /// Creates a series from `(date, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// A series of zeros sharing this series' date index.
    #[must_use]
    pub fn zeros_like(&self) -> Self {
        Self {
            dates: self.dates.clone(),
            values: vec![0.0; self.dates.len()],
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The values, in date order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First observation.
    #[must_use]
    pub fn first(&self) -> Option<(Date, f64)> {
        self.get(0)
    }

    /// Last observation.
    #[must_use]
    pub fn last(&self) -> Option<(Date, f64)> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Observation at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(Date, f64)> {
        Some((*self.dates.get(index)?, *self.values.get(index)?))
    }

    /// Value observed on `date`, if the date is in the index.
    #[must_use]
    pub fn value_at(&self, date: Date) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// Iterates `(date, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of leading observations dated on or before `date`.
    #[must_use]
    pub fn count_through(&self, date: Date) -> usize {
        self.dates.partition_point(|d| *d <= date)
    }

    /// The prefix of the series dated on or before `date` (inclusive).
    #[must_use]
    pub fn through(&self, date: Date) -> Self {
        let n = self.count_through(date);
        Self {
            dates: self.dates[..n].to_vec(),
            values: self.values[..n].to_vec(),
        }
    }

    /// Observations inside `range`.
    #[must_use]
    pub fn within(&self, range: &DateRange) -> Self {
        let lo = self.dates.partition_point(|d| *d < range.start);
        let hi = self.count_through(range.end);
        let hi = hi.max(lo);
        Self {
            dates: self.dates[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// Applies `f` to every value, keeping the index.
    #[must_use]
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            dates: self.dates.clone(),
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Sum of all values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Consumes the series, returning the index and the values.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Date>, Vec<f64>) {
        (self.dates, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> Date {
        Date::from_ymd(2024, m, day).unwrap()
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let err = DateSeries::new(vec![d(1, 2), d(1, 1)], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::UnorderedDates { .. }));

        let err = DateSeries::new(vec![d(1, 1), d(1, 1)], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::UnorderedDates { .. }));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = DateSeries::new(vec![d(1, 1)], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { dates: 1, values: 2 }));
    }

    #[test]
    fn test_through_is_inclusive() {
        let s = DateSeries::new(vec![d(1, 1), d(1, 5), d(1, 9)], vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(s.through(d(1, 5)).len(), 2);
        assert_eq!(s.through(d(1, 6)).len(), 2);
        assert_eq!(s.through(d(1, 9)).len(), 3);
        assert!(s.through(Date::from_ymd(2023, 12, 31).unwrap()).is_empty());
    }

    #[test]
    fn test_within_range() {
        let s = DateSeries::new(vec![d(1, 1), d(1, 5), d(1, 9)], vec![1.0, 2.0, 3.0]).unwrap();
        let range = DateRange::new(d(1, 2), d(1, 9)).unwrap();

        let inner = s.within(&range);
        assert_eq!(inner.dates(), &[d(1, 5), d(1, 9)]);
        assert_eq!(inner.values(), &[2.0, 3.0]);
    }

    #[test]
    fn test_zeros_like_and_lookup() {
        let s = DateSeries::from_pairs([(d(2, 1), 10.0), (d(3, 1), 20.0)]).unwrap();
        let z = s.zeros_like();

        assert_eq!(z.dates(), s.dates());
        assert_eq!(z.sum(), 0.0);
        assert_eq!(s.value_at(d(3, 1)), Some(20.0));
        assert_eq!(s.value_at(d(3, 2)), None);
        assert_eq!(s.first(), Some((d(2, 1), 10.0)));
        assert_eq!(s.last(), Some((d(3, 1), 20.0)));
    }
}
