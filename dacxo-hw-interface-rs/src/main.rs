//! dacxo-hw-interface
//!
//! Front-panel firmware for the DACXO on a Raspberry Pi Pico 2. Wires the
//! three library crates into the live appliance:
//!
//! 1. The knob task and the button task turn GPIO edges into `PanelEvent`s
//!    and push them into `EVENTS`.
//! 2. The control task applies each event to the shared `FrontPanel` and,
//!    when the volume or power state changed, writes the new attenuation
//!    and mute state to the PCM1792A.
//! 3. The OLED task wakes on its 30 Hz timer, snapshots the panel and
//!    redraws whatever changed.
//!
//! The panel powers up as soon as the DAC has been brought up. If the DAC
//! does not answer at start-up the OLED shows a fault message and no input
//! tasks are started.

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_embedded_hal::shared_bus::I2cDeviceError;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_time::{with_timeout, Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dacxo::front_panel::{DacSetting, FrontPanel, PanelEvent, Rotation, LONG_PRESS_MS};
use dacxo_oled_display_rs::{display_update_task, render_fault, DisplayConfig, OledDriver};
use pcm1792_driver::{DacError, Mode, Pcm1792};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared I2C0 bus: the OLED and the DAC each hold an `I2cDevice` on it.
static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>> =
    StaticCell::new();

/// Panel state: written by the control task, read by the OLED task.
static PANEL: StaticCell<Mutex<CriticalSectionRawMutex, FrontPanel>> = StaticCell::new();

/// Input events from the knob and button tasks to the control task.
static EVENTS: Channel<CriticalSectionRawMutex, PanelEvent, EVENT_QUEUE_DEPTH> = Channel::new();

const EVENT_QUEUE_DEPTH: usize = 8;

/// Contact bounce settle time for the push button.
const DEBOUNCE_MS: u64 = 20;

/// Output format of the I2S source; ATLD makes the attenuation registers live.
const DAC_MODE: Mode = Mode::FMT_24I.union(Mode::ATLD);

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type BusDevice = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

type Oled = OledDriver<BusDevice, Delay>;

type Dac = Pcm1792<BusDevice>;

type DacResult = Result<(), DacError<I2cDeviceError<i2c::Error>>>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Concrete wrapper around the generic `display_update_task`.
#[embassy_executor::task]
async fn oled_task(
    driver: Oled,
    panel: &'static Mutex<CriticalSectionRawMutex, FrontPanel>,
    config: DisplayConfig,
) {
    display_update_task(driver, panel, config).await;
}

/// Quadrature decoding: every falling edge on A is one detent, B gives
/// the direction.
#[embassy_executor::task]
async fn knob_task(mut a: Input<'static>, b: Input<'static>) {
    info!("Knob task started");

    loop {
        a.wait_for_falling_edge().await;
        let rotation = Rotation::from_quadrature(b.is_low());
        debug!("Knob: {}", rotation);
        EVENTS.send(PanelEvent::Turn(rotation)).await;
    }
}

/// Push button: press and release edges, plus a long press when the button
/// stays down for `LONG_PRESS_MS`.
#[embassy_executor::task]
async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;
        if button.is_high() {
            continue;
        }

        EVENTS.send(PanelEvent::Press).await;

        let released =
            with_timeout(Duration::from_millis(LONG_PRESS_MS), button.wait_for_rising_edge()).await;
        if released.is_err() {
            debug!("Button: long press");
            EVENTS.send(PanelEvent::LongPress).await;
            button.wait_for_rising_edge().await;
        }

        EVENTS.send(PanelEvent::Release).await;
        Timer::after_millis(DEBOUNCE_MS).await;
    }
}

/// Applies input events to the panel and mirrors volume and power onto the
/// DAC.
#[embassy_executor::task]
async fn control_task(mut dac: Dac, panel: &'static Mutex<CriticalSectionRawMutex, FrontPanel>) {
    info!("Control task started");

    loop {
        let event = EVENTS.receive().await;

        // Mutex held only for the in-memory update, never during I2C.
        let update = {
            let mut panel = panel.lock().await;
            panel.handle(event);
            panel.take_dac_update()
        };

        if let Some(setting) = update {
            if let Err(e) = apply_dac_setting(&mut dac, setting).await {
                warn!("DAC update failed: {}", Debug2Format(&e));
            }
        }
    }
}

/// Mute before anything else when going to standby; set the level before
/// unmuting when coming back.
async fn apply_dac_setting(dac: &mut Dac, setting: DacSetting) -> DacResult {
    debug!("DAC: level={} muted={}", setting.level, setting.muted);

    if setting.muted {
        return dac.set_mute(true).await;
    }
    dac.set_volume64(setting.level).await?;
    dac.set_mute(false).await
}

/// Check the DAC answers, load the mode word muted, then apply the
/// panel's initial setting.
async fn bring_up_dac(dac: &mut Dac, setting: DacSetting) -> DacResult {
    let id = dac.read_register(pcm1792_driver::registers::REG_DEVICE_ID).await?;
    info!("PCM1792A device id {=u8:#x}", id);

    dac.set_mode(DAC_MODE.union(Mode::MUTE)).await?;
    apply_dac_setting(dac, setting).await
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("dacxo-hw-interface starting");

    // -- Pin assignments ----------------------------------------------------
    // I2C_SDA  → GP20  (p.PIN_20)
    // I2C_SCL  → GP21  (p.PIN_21)
    // KNOB_A   → GP27  (p.PIN_27)  pull-up, falling edge = one detent
    // KNOB_B   → GP22  (p.PIN_22)  pull-up, sampled on KNOB_A edges
    // KNOB_SW  → GP26  (p.PIN_26)  pull-up, low while pressed
    // -----------------------------------------------------------------------

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    let mut oled = OledDriver::new(
        I2cDevice::new(i2c_bus),
        Delay,
        dacxo_oled_display_rs::DEFAULT_ADDRESS,
    );
    let mut dac = Pcm1792::new(I2cDevice::new(i2c_bus), pcm1792_driver::DEFAULT_ADDRESS);

    let panel = PANEL.init(Mutex::new(FrontPanel::new()));
    let initial = panel.lock().await.dac_setting();

    // -- DAC bring-up -------------------------------------------------------

    if let Err(e) = bring_up_dac(&mut dac, initial).await {
        error!("DAC bring-up failed: {}", Debug2Format(&e));

        match oled.init().await {
            Ok(()) => {
                if render_fault(&mut oled, "DAC not found   check I2C bus").await.is_err() {
                    error!("Fault message could not be shown");
                }
            }
            Err(_) => error!("OLED init failed as well"),
        }
        return;
    }
    info!("DAC ready, mode {}", dac.mode());

    // The panel comes up powered: greeting and volume on the OLED, DAC
    // unmuted at the current level.
    let boot = {
        let mut panel = panel.lock().await;
        panel.power_on();
        panel.take_dac_update()
    };
    if let Some(setting) = boot {
        if let Err(e) = apply_dac_setting(&mut dac, setting).await {
            warn!("DAC unmute at boot failed: {}", Debug2Format(&e));
        }
    }

    // -- Spawn tasks --------------------------------------------------------

    let knob_a = Input::new(p.PIN_27, Pull::Up);
    let knob_b = Input::new(p.PIN_22, Pull::Up);
    let knob_sw = Input::new(p.PIN_26, Pull::Up);

    spawner.spawn(unwrap!(oled_task(oled, panel, DisplayConfig::default())));
    spawner.spawn(unwrap!(control_task(dac, panel)));
    spawner.spawn(unwrap!(knob_task(knob_a, knob_b)));
    spawner.spawn(unwrap!(button_task(knob_sw)));

    info!("All tasks spawned");
}
