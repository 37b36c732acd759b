//! Terminal foreground colors and ANSI styling.
//!
//! Styling is applied only when the final string is assembled. A colored run
//! of cells is wrapped in escape sequences there, so color never contributes
//! to the visual width of any cell.

use crossterm::style::{ResetColor, SetForegroundColor};
use std::fmt;

/// Named foreground color for markers, text and legend entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Dim grey.
    Grey,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

impl Color {
    fn ansi(self) -> crossterm::style::Color {
        use crossterm::style::Color as C;
        match self {
            Self::Grey => C::DarkGrey,
            Self::Red => C::Red,
            Self::Green => C::Green,
            Self::Yellow => C::Yellow,
            Self::Blue => C::Blue,
            Self::Magenta => C::Magenta,
            Self::Cyan => C::Cyan,
            Self::White => C::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grey => "grey",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        };
        f.write_str(name)
    }
}

/// Wrap `text` in ANSI foreground color sequences.
///
/// The visible width of the result equals the visible width of `text`.
#[must_use]
pub fn colorize(text: &str, color: Color) -> String {
    format!("{}{text}{}", SetForegroundColor(color.ansi()), ResetColor)
}
