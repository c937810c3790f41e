//! Async driver for 16x2 character OLEDs with a US2066 controller.
//!
//! This crate provides [`OledDriver`], a register-level driver that
//! brings the controller up, writes text into display RAM and composes
//! two-row "big digits" from eight custom glyphs, plus the status layout
//! of the DACXO front panel and, behind the `task` feature,
//! [`display_update_task`], a periodic loop that mirrors the shared
//! [`FrontPanel`] onto the display.
//!
//! # Quick Start
//!
//! ```ignore
//! use dacxo_oled_display_rs::{display_update_task, DisplayConfig, OledDriver, DEFAULT_ADDRESS};
//!
//! // In your Embassy main:
//! let oled = OledDriver::new(i2c_oled, embassy_time::Delay, DEFAULT_ADDRESS);
//! spawner.spawn(oled_task(oled, panel, DisplayConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: OledDriver<MyI2cType, embassy_time::Delay>,
//!     panel: &'static Mutex<CriticalSectionRawMutex, FrontPanel>,
//!     config: DisplayConfig,
//! ) {
//!     display_update_task(driver, panel, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: [`display_update_task`] (pulls in `embassy-sync` and
//!   `embassy-time`).
//!
//! [`FrontPanel`]: dacxo::front_panel::FrontPanel

#![cfg_attr(not(test), no_std)]

pub mod commands;
#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod glyphs;
pub mod layout;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use commands::DEFAULT_ADDRESS;
#[cfg(feature = "task")]
pub use display_task::display_update_task;
pub use driver::OledDriver;
pub use error::OledError;
pub use layout::{render_fault, render_status, DisplayConfig, ScreenChanges, VolumeStyle};
