//! Custom glyph bitmaps and the big-digit composition table.
//!
//! A big digit covers 2 rows x 3 columns of character cells. Each cell is
//! one of the eight programmable glyphs below, a blank, or the ROM's solid
//! block:
//!
//! ```text
//!  "2"          "8"
//!  ▀▀█          █▀█
//!  █▄▄          █▄█
//! ```

use crate::commands::{GLYPH_HEIGHT, GLYPH_SLOTS};

/// Blank cell (ROM space character).
pub const BLANK: u8 = b' ';

/// Solid cell, all 5x8 pixels lit (ROM character 0x1F).
pub const SOLID: u8 = 0x1F;

/// Bitmaps for CGRAM slots 0–7, top pixel row first.
pub const GLYPHS: [[u8; GLYPH_HEIGHT]; GLYPH_SLOTS as usize] = [
    [0x07, 0x0F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F], // 0: rounded upper-left
    [0x1F, 0x1F, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x00], // 1: top bar
    [0x1C, 0x1E, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F], // 2: rounded upper-right
    [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0F, 0x07], // 3: rounded lower-left
    [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0F, 0x07], // 4: rounded lower-left (bottom of "4")
    [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1E, 0x1C], // 5: rounded lower-right
    [0x1F, 0x1F, 0x1F, 0x00, 0x00, 0x00, 0x1F, 0x1F], // 6: upper middle
    [0x1F, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F], // 7: lower middle
];

/// Cells of each big digit: `[top-left, top-mid, top-right,
/// bottom-left, bottom-mid, bottom-right]`.
pub const BIG_DIGITS: [[u8; 6]; 10] = [
    [0, 1, 2, 3, 4, 5],                         // 0
    [BLANK, SOLID, BLANK, BLANK, SOLID, BLANK], // 1
    [6, 6, 2, 3, 7, 7],                         // 2
    [6, 6, 2, 7, 7, 5],                         // 3
    [3, 4, 2, BLANK, BLANK, SOLID],             // 4
    [SOLID, 6, 6, 7, 7, 5],                     // 5
    [0, 6, 6, 3, 7, 5],                         // 6
    [1, 1, 2, BLANK, 0, BLANK],                 // 7
    [0, 6, 2, 3, 7, 5],                         // 8
    [0, 6, 2, BLANK, BLANK, SOLID],             // 9
];

/// Width of a big digit in character cells.
pub const BIG_DIGIT_WIDTH: u8 = 3;

/// Top and bottom cell rows of `digit`, or `None` if `digit > 9`.
pub fn big_digit_rows(digit: u8) -> Option<(&'static [u8], &'static [u8])> {
    let cells = BIG_DIGITS.get(digit as usize)?;
    Some(cells.split_at(BIG_DIGIT_WIDTH as usize))
}
