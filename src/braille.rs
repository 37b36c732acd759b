//! Braille sub-cell dot packing.
//!
//! A character cell hosts a 2-column by 4-row dot matrix drawn with the
//! Unicode Braille Patterns block, giving sub-cell resolution for dense
//! plots. Dot masks are kept in an internal order, top-down then
//! left-to-right, so bit `x * 4 + y` addresses column `x`, row `y`. The
//! Braille Patterns code points order their bits differently
//! (ISO/TR 11548-1); a fixed permutation converts between the two and is an
//! exact inverse in both directions.

/// First code point of the Unicode Braille Patterns block.
const BRAILLE_BASE: u32 = 0x2800;

/// Maps internal bit `i` to its Braille Patterns bit.
const BIT_PERMUTATION: [u32; 8] = [0, 1, 2, 6, 3, 4, 5, 7];

/// Whether `ch` lies in the Braille Patterns block.
#[must_use]
pub fn is_braille(ch: char) -> bool {
    ('\u{2800}'..='\u{28ff}').contains(&ch)
}

/// Encode an internal dot mask as a braille character.
#[must_use]
pub fn encode(mask: u8) -> char {
    let mut offset = 0u32;
    for (bit, &unicode_bit) in BIT_PERMUTATION.iter().enumerate() {
        if mask & (1 << bit) != 0 {
            offset |= 1 << unicode_bit;
        }
    }
    char::from_u32(BRAILLE_BASE + offset).unwrap_or('\u{2800}')
}

/// Decode a braille character back to its internal dot mask.
///
/// Inverse of [`encode`] for every character in the block.
#[must_use]
pub fn decode(ch: char) -> u8 {
    debug_assert!(is_braille(ch));
    let offset = (ch as u32).wrapping_sub(BRAILLE_BASE);
    let mut mask = 0u8;
    for (bit, &unicode_bit) in BIT_PERMUTATION.iter().enumerate() {
        if offset & (1 << unicode_bit) != 0 {
            mask |= 1 << bit;
        }
    }
    mask
}

/// Internal mask with the single dot at column `x`, row `y` set.
///
/// `x` must be 0 or 1, `y` in `0..4`; row 0 is the top of the cell.
#[must_use]
pub fn dot(x: u8, y: u8) -> u8 {
    debug_assert!(x <= 1 && y <= 3);
    1 << (x * 4 + y)
}

/// Internal mask for the dot addressed by a fractional grid coordinate.
///
/// The fractional part of `x` selects the column and the fractional part of
/// `y` the row, with ties rounded half up so boundary points land
/// predictably. Masks for dots sharing a cell combine with bitwise OR.
#[must_use]
pub fn dot_mask(x: f64, y: f64) -> u8 {
    let col = u8::from((x + 0.5).rem_euclid(1.0) >= 0.5);
    let quarters = (-y + 0.375).rem_euclid(1.0) * 4.0;
    let row = 3 - ((quarters + 0.5).floor() as i64).rem_euclid(4) as u8;
    dot(col, row)
}
