//! Async driver for the TI PCM1792A audio DAC's I2C control port.
//!
//! [`Pcm1792`] sets the mode word (format, filters, mute), the per-channel
//! digital attenuation on a 64-step 1 dB scale, and reads back status.
//!
//! # Crate Features
//!
//! - **`defmt`**: logs register writes and implements `defmt::Format` for
//!   [`Mode`] and [`DacError`].

#![cfg_attr(not(test), no_std)]

mod dac;
mod driver;
mod error;
pub mod mode;
pub mod registers;

pub use dac::{attenuation_for, Pcm1792};
pub use error::DacError;
pub use mode::Mode;
pub use registers::DEFAULT_ADDRESS;
