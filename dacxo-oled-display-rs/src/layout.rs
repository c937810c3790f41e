//! Status screen layout and rendering.
//!
//! This module defines the [`DisplayConfig`] geometry, the
//! [`ScreenChanges`] diff between two [`StatusScreen`] snapshots, and the
//! [`render_status`] / [`render_fault`] functions that turn them into
//! driver calls.

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use heapless::String;

use dacxo::front_panel::{PowerState, StatusScreen};

use crate::commands::VISIBLE_COLUMNS;
use crate::driver::OledDriver;
use crate::error::OledError;
use crate::glyphs::BIG_DIGIT_WIDTH;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// How the volume number is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeStyle {
    /// Two ordinary characters (`"07"`) at the start of row 1.
    Small,
    /// Two big digits filling columns 0–5 of both rows; the greeting moves
    /// to the right of them.
    Big,
}

/// Configuration for the status layout and update task.
///
/// [`DisplayConfig::default()`] reproduces the front-panel layout:
///
/// ```text
///   col 0         10    15
///  ┌────────────────────┐
///  │Hello!              │  ← row 0: greeting
///  │07        0         │  ← row 1: volume, button indicator
///  └────────────────────┘
///  standby:  only a '.' at row 1, col 15
/// ```
pub struct DisplayConfig {
    /// Display refresh rate in Hz. Default: 30.
    pub update_frequency_hz: u32,
    /// Text on row 0 while powered. Default: `"Hello!"`.
    pub greeting: &'static str,
    /// Volume rendering. Default: [`VolumeStyle::Small`].
    pub volume_style: VolumeStyle,
    /// Row 1 column of the button indicator (`'1'` held, `'0'` released).
    /// Default: 10.
    pub indicator_col: u8,
    /// Row 1 column of the standby marker. Default: 15.
    pub standby_col: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            greeting: "Hello!",
            volume_style: VolumeStyle::Small,
            indicator_col: 10,
            standby_col: 15,
        }
    }
}

impl DisplayConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`, with 0 Hz treated as 1 Hz.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }

    /// Column where the greeting starts on row 0.
    pub fn greeting_col(&self) -> u8 {
        match self.volume_style {
            VolumeStyle::Small => 0,
            // Two big digits plus one blank column.
            VolumeStyle::Big => 2 * BIG_DIGIT_WIDTH + 1,
        }
    }
}

// ── ScreenChanges ────────────────────────────────────────────────────────

/// Identifies which parts of the status screen changed between two
/// [`StatusScreen`] snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChanges {
    /// Power state differs: the whole screen is redrawn.
    pub power_changed: bool,
    pub volume_changed: bool,
    pub button_changed: bool,
}

impl ScreenChanges {
    /// Diff two snapshots field by field.
    pub fn detect(old: &StatusScreen, new: &StatusScreen) -> Self {
        Self {
            power_changed: old.power != new.power,
            volume_changed: old.volume != new.volume,
            button_changed: old.button_held != new.button_held,
        }
    }

    /// Returns `true` if any field changed.
    pub fn any_changed(&self) -> bool {
        self.power_changed || self.volume_changed || self.button_changed
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Bring the display from `previous` to `next`.
///
/// With no previous frame, or when the power state changed, the display is
/// cleared and fully redrawn. Otherwise only the volume and indicator
/// cells that changed are rewritten; in standby nothing else is shown.
///
/// # Errors
///
/// The first driver error aborts the render. The caller should pass
/// `None` as `previous` on the next attempt so the frame is redrawn from a
/// clean display.
pub async fn render_status<I2C, D>(
    driver: &mut OledDriver<I2C, D>,
    previous: Option<&StatusScreen>,
    next: &StatusScreen,
    config: &DisplayConfig,
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    let changes = previous.map(|old| ScreenChanges::detect(old, next));

    match changes {
        Some(c) if !c.power_changed => {
            if next.power == PowerState::On {
                if c.volume_changed {
                    draw_volume(driver, next.volume, config).await?;
                }
                if c.button_changed {
                    draw_indicator(driver, next.button_held, config).await?;
                }
            }
            Ok(())
        }
        _ => draw_full(driver, next, config).await,
    }
}

/// Show an error message across both rows.
///
/// Clears the display, then writes the first 16 characters of `message`
/// on row 0 and the next 16 on row 1. Anything longer is dropped.
pub async fn render_fault<I2C, D>(
    driver: &mut OledDriver<I2C, D>,
    message: &str,
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    driver.clear().await?;

    let width = VISIBLE_COLUMNS as usize;
    let (top, rest) = split_chars(message, width);
    let (bottom, _) = split_chars(rest, width);

    driver.show_string(0, 0, top).await?;
    if !bottom.is_empty() {
        driver.show_string(1, 0, bottom).await?;
    }
    Ok(())
}

async fn draw_full<I2C, D>(
    driver: &mut OledDriver<I2C, D>,
    screen: &StatusScreen,
    config: &DisplayConfig,
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    driver.clear().await?;

    match screen.power {
        PowerState::On => {
            driver
                .show_string(0, config.greeting_col(), config.greeting)
                .await?;
            draw_volume(driver, screen.volume, config).await?;
            draw_indicator(driver, screen.button_held, config).await
        }
        PowerState::Off => driver.show_string(1, config.standby_col, ".").await,
    }
}

async fn draw_volume<I2C, D>(
    driver: &mut OledDriver<I2C, D>,
    volume: u8,
    config: &DisplayConfig,
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    match config.volume_style {
        VolumeStyle::Small => {
            let mut buf: String<4> = String::new();
            let _ = write!(buf, "{:02}", volume);
            driver.show_string(1, 0, buf.as_str()).await
        }
        VolumeStyle::Big => {
            let value = volume.min(99);
            driver.show_big_digit(0, value / 10).await?;
            driver.show_big_digit(BIG_DIGIT_WIDTH, value % 10).await
        }
    }
}

async fn draw_indicator<I2C, D>(
    driver: &mut OledDriver<I2C, D>,
    held: bool,
    config: &DisplayConfig,
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    let mark = if held { "1" } else { "0" };
    driver.show_string(1, config.indicator_col, mark).await
}

/// Split `s` after at most `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
