//! Data-to-grid coordinate scales.
//!
//! A scale maps data values onto grid positions along one axis. Numeric
//! series go through [`LinearScale`]; series containing any non-numeric
//! value are treated as categorical and go through [`CategoricalScale`],
//! which assigns each distinct value an evenly spaced position. Axes fit
//! numeric scales twice: once over the raw data to select ticks, then
//! again over the selected tick values so the tick rows land exactly on
//! grid positions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};

/// A single data value along one axis.
///
/// Numbers plot on a linear axis; any categorical value in a series makes
/// the whole axis categorical.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// A numeric value.
    Number(f64),
    /// A categorical value, positioned by its distinct string form.
    Category(String),
}

impl Datum {
    /// The numeric value, if this datum is numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Category(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Datum {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for Datum {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::Category(value.to_string())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// Affine mapping from a numeric source interval to a target interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    source_min: f64,
    source_range: f64,
    target_min: f64,
    target_range: f64,
}

impl LinearScale {
    /// Fit a scale over `data` so its extent maps onto `[target_min, target_max]`.
    ///
    /// A degenerate extent (all values equal) is widened by one unit on each
    /// side so the single value lands at the target midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `data` is empty.
    pub fn fit(data: &[f64], target_min: f64, target_max: f64) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        let mut source_min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let mut source_max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if source_min == source_max {
            source_min -= 1.0;
            source_max += 1.0;
        }
        Ok(Self {
            source_min,
            source_range: source_max - source_min,
            target_min,
            target_range: target_max - target_min,
        })
    }

    /// Map a source value to its target position.
    ///
    /// Values outside the fitted extent extrapolate linearly.
    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        self.target_range * (value - self.source_min) / self.source_range + self.target_min
    }

    /// The fitted source extent.
    #[must_use]
    pub fn source(&self) -> (f64, f64) {
        (self.source_min, self.source_min + self.source_range)
    }
}

/// Mapping from distinct categorical values to evenly spaced positions.
///
/// Distinct values are ordered by their string form; when the target extent
/// has more positions than categories the categories spread linearly across
/// it, otherwise they occupy consecutive positions from the start.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalScale {
    positions: BTreeMap<String, f64>,
}

impl CategoricalScale {
    /// Fit a scale over the distinct values of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `data` is empty.
    pub fn fit(data: &[Datum], target_min: f64, target_max: f64) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        let distinct: BTreeSet<String> = data.iter().map(ToString::to_string).collect();
        let indices: Vec<f64> = (0..distinct.len()).map(|i| i as f64).collect();
        let index_scale = LinearScale::fit(&indices, target_min, target_max)?;
        let positions = distinct
            .into_iter()
            .zip(&indices)
            .map(|(value, &index)| (value, index_scale.transform(index)))
            .collect();
        Ok(Self { positions })
    }

    /// The position of `value` on the target axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] when `value` was not present in the
    /// fitted data.
    pub fn transform(&self, value: &str) -> Result<f64> {
        self.positions
            .get(value)
            .copied()
            .ok_or_else(|| Error::UnknownCategory(value.to_string()))
    }

    /// Distinct fitted values in position order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.positions.keys().map(String::as_str).collect()
    }

    /// Number of distinct fitted values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no values were fitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The scale fitted to one axis of a figure.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    /// All values in the series were numeric.
    Linear(LinearScale),
    /// At least one value was categorical.
    Categorical(CategoricalScale),
}

impl AxisScale {
    /// Fit the appropriate scale kind for `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `data` is empty.
    pub fn fit(data: &[Datum], target_min: f64, target_max: f64) -> Result<Self> {
        let numbers: Option<Vec<f64>> = data.iter().map(Datum::as_number).collect();
        match numbers {
            Some(values) => {
                LinearScale::fit(&values, target_min, target_max).map(Self::Linear)
            }
            None => CategoricalScale::fit(data, target_min, target_max).map(Self::Categorical),
        }
    }

    /// Map a datum to its target position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] for values absent from a fitted
    /// categorical scale.
    pub fn transform(&self, value: &Datum) -> Result<f64> {
        match (self, value) {
            (Self::Linear(scale), Datum::Number(v)) => Ok(scale.transform(*v)),
            (Self::Linear(_), Datum::Category(s)) => {
                Err(Error::UnknownCategory(s.clone()))
            }
            (Self::Categorical(scale), v) => scale.transform(&v.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_endpoints_are_exact() {
        let scale = LinearScale::fit(&[2.0, 8.0, 5.0], 0.0, 79.0).unwrap();
        assert_relative_eq!(scale.transform(2.0), 0.0);
        assert_relative_eq!(scale.transform(8.0), 79.0);
        assert_relative_eq!(scale.transform(5.0), 39.5);
    }

    #[test]
    fn test_linear_inverted_target() {
        let scale = LinearScale::fit(&[0.0, 10.0], 21.0, 3.0).unwrap();
        assert_relative_eq!(scale.transform(0.0), 21.0);
        assert_relative_eq!(scale.transform(10.0), 3.0);
        assert_relative_eq!(scale.transform(5.0), 12.0);
    }

    #[test]
    fn test_linear_degenerate_domain_widens() {
        let scale = LinearScale::fit(&[4.0, 4.0, 4.0], 0.0, 10.0).unwrap();
        assert_eq!(scale.source(), (3.0, 5.0));
        assert_relative_eq!(scale.transform(4.0), 5.0);
    }

    #[test]
    fn test_linear_extrapolates_outside_extent() {
        let scale = LinearScale::fit(&[0.0, 10.0], 0.0, 100.0).unwrap();
        assert_relative_eq!(scale.transform(-1.0), -10.0);
        assert_relative_eq!(scale.transform(11.0), 110.0);
    }

    #[test]
    fn test_linear_empty_data() {
        assert!(matches!(LinearScale::fit(&[], 0.0, 1.0), Err(Error::EmptyData)));
    }

    #[test]
    fn test_categorical_positions_are_sorted_and_even() {
        let data: Vec<Datum> = ["b", "a", "c", "a"].iter().map(|&s| s.into()).collect();
        let scale = CategoricalScale::fit(&data, 0.0, 10.0).unwrap();
        assert_eq!(scale.categories(), vec!["a", "b", "c"]);
        assert_relative_eq!(scale.transform("a").unwrap(), 0.0);
        assert_relative_eq!(scale.transform("b").unwrap(), 5.0);
        assert_relative_eq!(scale.transform("c").unwrap(), 10.0);
    }

    #[test]
    fn test_categorical_order_independent() {
        let forward: Vec<Datum> = ["x", "y", "z"].iter().map(|&s| s.into()).collect();
        let backward: Vec<Datum> = ["z", "y", "x"].iter().map(|&s| s.into()).collect();
        let a = CategoricalScale::fit(&forward, 0.0, 20.0).unwrap();
        let b = CategoricalScale::fit(&backward, 0.0, 20.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_categorical_single_value_lands_at_midpoint() {
        let data = vec![Datum::from("only")];
        let scale = CategoricalScale::fit(&data, 0.0, 10.0).unwrap();
        assert_relative_eq!(scale.transform("only").unwrap(), 5.0);
    }

    #[test]
    fn test_categorical_unknown_value() {
        let data = vec![Datum::from("a")];
        let scale = CategoricalScale::fit(&data, 0.0, 10.0).unwrap();
        assert!(matches!(
            scale.transform("b"),
            Err(Error::UnknownCategory(v)) if v == "b"
        ));
    }

    #[test]
    fn test_axis_scale_picks_linear_for_all_numbers() {
        let data: Vec<Datum> = [1.0, 2.0, 3.0].iter().map(|&v| v.into()).collect();
        let scale = AxisScale::fit(&data, 0.0, 10.0).unwrap();
        assert!(matches!(scale, AxisScale::Linear(_)));
        assert_relative_eq!(scale.transform(&Datum::from(2.0)).unwrap(), 5.0);
    }

    #[test]
    fn test_axis_scale_one_category_makes_axis_categorical() {
        let data = vec![Datum::from(1.0), Datum::from("two")];
        let scale = AxisScale::fit(&data, 0.0, 10.0).unwrap();
        assert!(matches!(scale, AxisScale::Categorical(_)));
        // the numeric datum participates by its string form
        assert_relative_eq!(scale.transform(&Datum::from(1.0)).unwrap(), 0.0);
        assert_relative_eq!(scale.transform(&Datum::from("two")).unwrap(), 10.0);
    }

    #[test]
    fn test_numeric_double_fit_to_ticks() {
        // axes re-fit to the selected ticks so ticks land on exact rows
        let data = vec![0.3, 8.7];
        let first = LinearScale::fit(&data, 0.0, 79.0).unwrap();
        let (lo, hi) = first.source();
        let ticks = crate::ticks::best_ticks(lo, hi, 20);
        let refit = LinearScale::fit(&ticks, 0.0, 79.0).unwrap();
        let first_tick = ticks[0];
        let last_tick = ticks[ticks.len() - 1];
        assert_relative_eq!(refit.transform(first_tick), 0.0);
        assert_relative_eq!(refit.transform(last_tick), 79.0);
    }
}
