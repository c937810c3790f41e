//! Error types for the character OLED driver.

use core::fmt;

/// Errors that can occur during character OLED operations.
///
/// Generic over the I2C bus error so callers keep the HAL's own error
/// type.
#[derive(Debug, PartialEq, Eq)]
pub enum OledError<E> {
    /// Underlying I2C bus error (device absent, NACK, ...).
    I2c(E),
    /// A render operation was attempted before [`OledDriver::init()`](crate::OledDriver::init)
    /// completed.
    NotInitialized,
    /// Glyph slot out of range (must be 0–7).
    InvalidSlot,
    /// Big digit out of range (must be 0–9).
    InvalidDigit,
    /// Row must be 0 or 1 and column below 40.
    InvalidPosition,
    /// Data block longer than one DDRAM row (40 bytes).
    DataTooLong,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for OledError<E> {
    fn from(error: E) -> Self {
        OledError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for OledError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::I2c(e) => write!(f, "I2C error: {:?}", e),
            OledError::NotInitialized => write!(f, "Display not initialized"),
            OledError::InvalidSlot => write!(f, "Invalid glyph slot (must be 0-7)"),
            OledError::InvalidDigit => write!(f, "Invalid big digit (must be 0-9)"),
            OledError::InvalidPosition => write!(f, "Invalid cursor position"),
            OledError::DataTooLong => write!(f, "Data block longer than 40 bytes"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for OledError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
            OledError::InvalidSlot => defmt::write!(f, "Invalid glyph slot"),
            OledError::InvalidDigit => defmt::write!(f, "Invalid big digit"),
            OledError::InvalidPosition => defmt::write!(f, "Invalid cursor position"),
            OledError::DataTooLong => defmt::write!(f, "Data block too long"),
        }
    }
}
