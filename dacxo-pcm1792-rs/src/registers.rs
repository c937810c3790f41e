//! Register map of the PCM1792A control port.
//!
//! Registers 16–21 are writable; 22 and 23 are read-only status and
//! device-ID registers. Multi-byte writes auto-increment the register
//! address, so the attenuation pair and the four mode bytes each go out in
//! one I2C transaction.

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Digital attenuation, left channel (0 = mute, 255 = 0 dB, 0.5 dB steps).
pub const REG_ATTENUATION_LEFT: u8 = 0x10;

/// Digital attenuation, right channel.
pub const REG_ATTENUATION_RIGHT: u8 = 0x11;

/// First of the four mode-control registers (mode word bits 0–7).
pub const REG_MODE: u8 = 0x12;

/// Number of mode-control registers starting at [`REG_MODE`].
pub const MODE_REGISTER_COUNT: usize = 4;

/// Zero-detect status (read-only).
pub const REG_STATUS: u8 = 0x16;

/// Device ID (read-only).
pub const REG_DEVICE_ID: u8 = 0x17;

/// Lowest register reachable over the control port.
pub const FIRST_REGISTER: u8 = REG_ATTENUATION_LEFT;

/// Highest writable register.
pub const LAST_WRITABLE_REGISTER: u8 = 0x15;

/// Highest readable register.
pub const LAST_REGISTER: u8 = REG_DEVICE_ID;

// ---------------------------------------------------------------------------
// Attenuation scale
// ---------------------------------------------------------------------------

/// Full scale of the 1 dB volume steps accepted by `set_volume64`.
pub const VOLUME_STEPS: u8 = 64;

/// Attenuation register value for `volume` in `1..=64` is
/// `2 * volume + ATTENUATION_OFFSET` (volume 64 -> 255 = 0 dB).
pub const ATTENUATION_OFFSET: u8 = 127;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Default I2C address (ADR0 and ADR1 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x4C;
