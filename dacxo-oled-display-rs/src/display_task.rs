//! Display update task.
//!
//! [`display_update_task`] periodically snapshots the shared
//! [`FrontPanel`] and pushes whatever changed to the OLED.
//!
//! [`FrontPanel`]: dacxo::front_panel::FrontPanel

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use dacxo::front_panel::{FrontPanel, StatusScreen};

use crate::driver::OledDriver;
use crate::layout::{render_status, DisplayConfig};

// ── Display update task ──────────────────────────────────────────────────

/// Periodic display update loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: OledDriver<MyConcreteI2cType, embassy_time::Delay>,
///     panel: &'static Mutex<CriticalSectionRawMutex, FrontPanel>,
///     config: DisplayConfig,
/// ) {
///     display_update_task(driver, panel, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the display hardware, unless the caller already did.
/// 2. Loop at `config.update_frequency_hz`:
///    - **Step 1**: Lock `panel`, copy the [`StatusScreen`]. Release the
///      mutex.
///    - **Step 2**: Skip if the snapshot matches the last rendered frame.
///    - **Step 3**: Render the difference (short I2C writes, no mutex
///      held).
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Render failure: logs the error; the next cycle redraws the full
///   frame from a cleared display.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn display_update_task<I2C, D>(
    mut driver: OledDriver<I2C, D>,
    panel: &'static Mutex<CriticalSectionRawMutex, FrontPanel>,
    config: DisplayConfig,
) where
    I2C: I2c,
    D: DelayNs,
{
    // ── Initialisation ───────────────────────────────────────────────
    if !driver.is_initialized() {
        if let Err(_e) = driver.init().await {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED init failed: {}", defmt::Debug2Format(&_e));
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("OLED initialised");
    }

    let period = embassy_time::Duration::from_millis(config.update_period_ms());
    let mut last_frame: Option<StatusScreen> = None;

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        // ── Step 1: snapshot (mutex held briefly) ────────────────────
        let frame = panel.lock().await.screen();

        // ── Step 2: skip if nothing changed ──────────────────────────
        if last_frame == Some(frame) {
            embassy_time::Timer::after(period).await;
            continue;
        }

        // ── Step 3: render (no mutex held) ───────────────────────────
        match render_status(&mut driver, last_frame.as_ref(), &frame, &config).await {
            Ok(()) => last_frame = Some(frame),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Status render failed: {}", defmt::Debug2Format(&_e));
                last_frame = None;
            }
        }

        embassy_time::Timer::after(period).await;
    }
}

// Tests for rendering are in layout.rs where render_status is defined.
