//! Terminal boundary helpers.
//!
//! The figure treats the terminal as an external collaborator: it only needs
//! the current size (for default dimensions) and whether the output encoding
//! can carry the box-drawing and braille glyphs.

/// Probe the terminal size in (columns, rows), falling back to 80x24.
#[must_use]
pub fn size() -> (usize, usize) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols as usize, rows as usize),
        _ => (80, 24),
    }
}

/// Best-effort probe for unicode output support.
///
/// Checks the locale environment for a UTF-8 encoding, the closest stable
/// equivalent of encoding a box-drawing test string against the stdout
/// codec. Callers can always force ASCII via the figure builder.
#[must_use]
pub fn unicode_supported() -> bool {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if value.is_empty() {
                continue;
            }
            let upper = value.to_uppercase();
            return upper.contains("UTF-8") || upper.contains("UTF8");
        }
    }
    // No locale information at all; modern terminals default to UTF-8.
    true
}
