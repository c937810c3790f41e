//! US2066 command bytes and the power-on initialisation sequence.
//!
//! Every I2C write to the controller starts with a control byte that
//! tags the rest of the transfer as a command or as display data:
//! - `[CONTROL_COMMAND, cmd]`: single command byte
//! - `[CONTROL_DATA, d0, d1, ...]`: data block written at the current
//!   CGRAM/DDRAM address, which auto-increments
//!
//! Several commands change meaning with the modal "RE" (extended register)
//! and "SD" (OLED characterisation) flags set by earlier commands, so the
//! order of [`INIT_SEQUENCE`] must not change.

// ---------------------------------------------------------------------------
// Bus framing
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address (SA0 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte marking a single command byte (Co = 1, D/C = 0).
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte marking a stream of data bytes (Co = 0, D/C = 1).
pub const CONTROL_DATA: u8 = 0x40;

// ---------------------------------------------------------------------------
// Fundamental commands (RE = 0)
// ---------------------------------------------------------------------------

/// Clear display, DDRAM address to 0.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Display on, cursor off, blink off.
pub const DISPLAY_ON: u8 = 0x0C;

/// Set CGRAM address; OR in `slot * 8`.
pub const SET_CGRAM_ADDRESS: u8 = 0x40;

/// Set DDRAM address; OR in `col + row * ROW_STRIDE`.
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// DDRAM address offset between row 0 and row 1.
pub const ROW_STRIDE: u8 = 0x40;

/// Number of character rows.
pub const ROWS: u8 = 2;

/// DDRAM cells per row. Only the first [`VISIBLE_COLUMNS`] are shown.
pub const DDRAM_COLUMNS: u8 = 40;

/// Visible characters per row on the 16x2 panel.
pub const VISIBLE_COLUMNS: u8 = 16;

/// Number of programmable CGRAM glyph slots.
pub const GLYPH_SLOTS: u8 = 8;

/// Bytes per glyph bitmap (one per pixel row, 5 low bits used).
pub const GLYPH_HEIGHT: usize = 8;

/// Settling time after the clear command during initialisation.
///
/// The controller has no ready flag readable over this bus, so this is a
/// fixed delay rather than a poll.
pub const CLEAR_SETTLE_MS: u32 = 20;

// ---------------------------------------------------------------------------
// Initialisation sequence
// ---------------------------------------------------------------------------

/// One step of the initialisation sequence: a command byte, optionally
/// followed by a single data-mode payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitStep {
    pub command: u8,
    pub payload: Option<u8>,
}

impl InitStep {
    const fn cmd(command: u8) -> Self {
        Self {
            command,
            payload: None,
        }
    }

    const fn with_data(command: u8, payload: u8) -> Self {
        Self {
            command,
            payload: Some(payload),
        }
    }
}

/// Power-on command sequence, ending with the clear command.
///
/// [`OledDriver::init()`](crate::OledDriver::init) sends these in order,
/// waits [`CLEAR_SETTLE_MS`], programs the glyph slots and finally sends
/// [`DISPLAY_ON`].
pub const INIT_SEQUENCE: [InitStep; 29] = [
    InitStep::cmd(0x2A),                // RE = 1
    InitStep::with_data(0x71, 0x5C),    // function selection A: internal Vdd regulator on
    InitStep::cmd(0x28),                // RE = 0
    InitStep::cmd(0x08),                // display off (sleep)
    InitStep::cmd(0x2A),                // RE = 1
    InitStep::cmd(0x79),                // SD = 1
    InitStep::cmd(0xD5),                // display clock divide / oscillator frequency
    InitStep::cmd(0x70),
    InitStep::cmd(0x78),                // SD = 0
    InitStep::cmd(0x08),                // 5-dot font, 1 or 2 line
    InitStep::cmd(0x06),                // COM31 -> COM0, SEG0 -> SEG99
    InitStep::with_data(0x72, 0x00),    // function selection B: ROM A, 8 CGRAM slots
    InitStep::cmd(0x2A),                // RE = 1
    InitStep::cmd(0x79),                // SD = 1
    InitStep::cmd(0xDA),                // SEG pins hardware configuration
    InitStep::cmd(0x10),
    InitStep::cmd(0x81),                // contrast
    InitStep::cmd(0xFF),
    InitStep::cmd(0xDB),                // VCOMH deselect level
    InitStep::cmd(0x30),                // 0.83 x VCC
    InitStep::cmd(0xDC),                // function selection C: external VSL / GPIO
    InitStep::cmd(0x03),                // GPIO high: 15 V boost regulator enabled
    InitStep::cmd(0x78),                // SD = 0
    InitStep::cmd(0x28),                // RE = 0
    InitStep::cmd(0x2A),                // RE = 1
    InitStep::cmd(0x06),                // entry mode
    InitStep::cmd(0x08),                // extended function set
    InitStep::cmd(0x28),                // IS = 0, RE = 0
    InitStep::cmd(CLEAR_DISPLAY),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_ends_with_clear() {
        assert_eq!(INIT_SEQUENCE.last(), Some(&InitStep::cmd(CLEAR_DISPLAY)));
    }

    #[test]
    fn sequence_enters_extended_mode_first() {
        assert_eq!(INIT_SEQUENCE[0], InitStep::cmd(0x2A));
    }

    #[test]
    fn only_function_selection_carries_payload() {
        let with_payload: [(u8, u8); 2] = [(0x71, 0x5C), (0x72, 0x00)];
        let mut found = 0;
        for step in INIT_SEQUENCE.iter() {
            if let Some(p) = step.payload {
                assert!(with_payload.contains(&(step.command, p)));
                found += 1;
            }
        }
        assert_eq!(found, with_payload.len());
    }

    #[test]
    fn register_map_values() {
        // Command and parameter pairs that must appear back to back.
        let pairs: [(u8, u8); 6] = [
            (0xD5, 0x70),
            (0xDA, 0x10),
            (0x81, 0xFF),
            (0xDB, 0x30),
            (0xDC, 0x03),
            (0x79, 0xD5),
        ];
        for (cmd, param) in pairs {
            assert!(
                INIT_SEQUENCE
                    .windows(2)
                    .any(|w| w[0] == InitStep::cmd(cmd) && w[1] == InitStep::cmd(param)),
                "missing {:#04x} {:#04x}",
                cmd,
                param
            );
        }
    }
}
