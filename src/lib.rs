//! # termviz
//!
//! Terminal figure rendering: scatter, line, bar, and image plots drawn as
//! Unicode or ASCII characters on a plain character grid.
//!
//! Plot commands are queued on a [`Figure`] and rendered on demand, because
//! axis geometry depends on all of the queued data. Rendering fits scales,
//! selects ticks, lays out labels, and replays the commands onto a
//! bounds-checked canvas.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use termviz::prelude::*;
//!
//! # fn main() -> termviz::Result<()> {
//! let mut fig = Figure::builder()
//!     .width(80)
//!     .height(24)
//!     .xlabel("time")
//!     .ylabel("value")
//!     .build()?;
//! fig.scatter(&[0.0, 1.0, 2.0], &[3.0, 1.0, 4.0], Style::new().color(Color::Red))?;
//! fig.line_indexed(&[3.0, 1.0, 4.0, 1.0, 5.0], Style::new().label("signal"))?;
//! fig.show()?;
//! # Ok(())
//! # }
//! ```
//!
//! Output stays within the requested width and height, colors are applied
//! only at final string assembly, and every out-of-range draw fails the
//! whole render rather than producing partial output.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Braille sub-cell dot packing.
pub mod braille;

/// Character-cell canvas the figure draws into.
pub mod canvas;

/// Foreground colors and ANSI styling.
pub mod color;

/// Error types.
pub mod error;

/// Raster resampling and glyph ramps for image commands.
pub mod image;

/// Grid rounding and line rasterization.
pub mod render;

/// Data-to-grid coordinate scales.
pub mod scale;

/// Tick value selection and label formatting.
pub mod ticks;

// ============================================================================
// Layout and Orchestration
// ============================================================================

/// Figure orchestration: command queue, axes, legend, rendering.
pub mod figure;

/// Collision-free x tick label placement.
pub mod layout;

/// Terminal size and capability probing.
pub mod term;

pub use error::{Error, Result};
pub use figure::{Figure, FigureBuilder, LegendLocation, Marker, Style, YAxisDirection};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::figure::{
        Figure, FigureBuilder, LegendLocation, Marker, Style, YAxisDirection,
    };
    pub use crate::image::{GlyphRamp, Raster};
    pub use crate::scale::Datum;
    pub use crate::{Error, Result};
}
