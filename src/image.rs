//! Raster-to-glyph mapping for image commands.
//!
//! A [`Raster`] is a dense 2-D grid of scalar samples. Rendering resamples
//! it to the plotting area with nearest-neighbor lookup and maps each value
//! linearly from `[vmin, vmax]` onto a short glyph ramp, clamping values
//! outside the range to the ramp ends.

use crate::error::{Error, Result};
use crate::render::round_half_away;
use crate::scale::LinearScale;

const RAMP_ASCII: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const RAMP_BLOCK: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Glyph ramp used to shade raster values, darkest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphRamp {
    /// Pure-ASCII shading, ten levels.
    Ascii,
    /// Unicode block elements, five levels.
    #[default]
    Block,
}

impl GlyphRamp {
    fn glyphs(self) -> &'static [char] {
        match self {
            Self::Ascii => RAMP_ASCII,
            Self::Block => RAMP_BLOCK,
        }
    }
}

/// Dense row-major grid of scalar samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    eight_bit: bool,
}

impl Raster {
    /// Build a raster from rows of floating-point samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no rows or the first row
    /// is empty, and [`Error::RaggedRaster`] when row lengths differ.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::build(rows, false)
    }

    /// Build a raster from rows of 8-bit samples.
    ///
    /// The value range defaults to `[0, 255]` instead of the data extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no rows or the first row
    /// is empty, and [`Error::RaggedRaster`] when row lengths differ.
    pub fn from_bytes(rows: &[Vec<u8>]) -> Result<Self> {
        let float_rows: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| f64::from(v)).collect())
            .collect();
        Self::build(&float_rows, true)
    }

    fn build(rows: &[Vec<f64>], eight_bit: bool) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::EmptyData);
        };
        if first.is_empty() {
            return Err(Error::EmptyData);
        }
        let cols = first.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedRaster {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.concat(),
            eight_bit,
        })
    }

    /// Number of sample rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The sample at `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Default `[vmin, vmax]` for shading: `[0, 255]` for 8-bit data, the
    /// data extent otherwise.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        if self.eight_bit {
            (0.0, 255.0)
        } else {
            let min = self.data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (min, max)
        }
    }

    /// Resample to `out_rows` by `out_cols` with nearest-neighbor lookup.
    ///
    /// Each output sample reads the source at the truncated proportional
    /// index, so upscaling repeats samples and downscaling drops them.
    #[must_use]
    pub fn resample(&self, out_rows: usize, out_cols: usize) -> Self {
        let mut data = Vec::with_capacity(out_rows * out_cols);
        for row in 0..out_rows {
            let src_row = self.rows * row / out_rows;
            for col in 0..out_cols {
                let src_col = self.cols * col / out_cols;
                data.push(self.get(src_row, src_col));
            }
        }
        Self {
            rows: out_rows,
            cols: out_cols,
            data,
            eight_bit: self.eight_bit,
        }
    }

    /// The raster with its row order reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in (0..self.rows).rev() {
            data.extend_from_slice(&self.data[row * self.cols..(row + 1) * self.cols]);
        }
        Self { data, ..self.clone() }
    }

    /// Shade every sample through `ramp`, mapping `[vmin, vmax]` linearly
    /// onto the ramp and clamping values outside it.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed raster; the signature carries the
    /// scale-fitting `Result` through.
    pub fn to_glyphs(&self, vmin: f64, vmax: f64, ramp: GlyphRamp) -> Result<Vec<Vec<char>>> {
        let glyphs = ramp.glyphs();
        let last = (glyphs.len() - 1) as f64;
        let scale = LinearScale::fit(&[vmin, vmax], 0.0, last)?;
        let shaded = (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let value = self.get(row, col).clamp(vmin, vmax);
                        let index = round_half_away(scale.transform(value)).clamp(0, last as i64);
                        glyphs[index as usize]
                    })
                    .collect()
            })
            .collect();
        Ok(shaded)
    }
}
