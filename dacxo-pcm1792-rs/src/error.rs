//! Error types for the DAC driver.

use core::fmt;

/// Errors that can occur when talking to the PCM1792A.
#[derive(Debug, PartialEq, Eq)]
pub enum DacError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Register outside the control port's map, or a write to a
    /// read-only register.
    InvalidRegister,
}

impl<E> From<E> for DacError<E> {
    fn from(error: E) -> Self {
        DacError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DacError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DacError::I2c(e) => write!(f, "I2C error: {:?}", e),
            DacError::InvalidRegister => {
                write!(f, "Invalid register (valid: 16-21 write, 16-23 read)")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for DacError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DacError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            DacError::InvalidRegister => defmt::write!(f, "Invalid register"),
        }
    }
}
