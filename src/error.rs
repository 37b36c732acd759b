//! Error types for termviz operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in termviz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid dimensions for a figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: usize,
        /// Height value.
        height: usize,
    },

    /// Data length mismatch between x and y series.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Image raster rows have inconsistent lengths.
    #[error("Ragged raster: row {row} has {actual} columns, expected {expected}")]
    RaggedRaster {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },

    /// More distinct categories than the axis has positions for.
    #[error("Too many categories: {categories} distinct values, axis extent is {extent}")]
    CategoryOverflow {
        /// Number of distinct categorical values.
        categories: usize,
        /// Available positions along the axis.
        extent: usize,
    },

    /// A value was transformed through a categorical scale it was not fitted with.
    #[error("Category not present in fitted domain: {0}")]
    UnknownCategory(String),

    /// A draw position fell outside the figure grid.
    #[error("Draw position ({row}, {col}) outside {width}x{height} grid")]
    OutOfBounds {
        /// Target row.
        row: i64,
        /// Target column.
        col: i64,
        /// Grid width in columns.
        width: usize,
        /// Grid height in rows.
        height: usize,
    },
}
