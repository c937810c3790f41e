//! Core driver for US2066-based 16x2 character OLED modules over I2C.
//!
//! [`OledDriver`] manages the controller lifecycle: construction without
//! I2C traffic, explicit async initialisation, and text / big-digit writes
//! straight into display RAM. There is no frame buffer; every call is a
//! short address-set plus data write.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use crate::commands::{
    CLEAR_DISPLAY, CLEAR_SETTLE_MS, CONTROL_COMMAND, CONTROL_DATA, DDRAM_COLUMNS, DISPLAY_ON,
    GLYPH_HEIGHT, GLYPH_SLOTS, INIT_SEQUENCE, ROWS, ROW_STRIDE, SET_CGRAM_ADDRESS,
    SET_DDRAM_ADDRESS,
};
use crate::error::OledError;
use crate::glyphs::{big_digit_rows, GLYPHS};

/// Largest data block written in one transfer: a full DDRAM row.
const MAX_DATA_LEN: usize = DDRAM_COLUMNS as usize;

/// Async driver for a 16x2 character OLED with a US2066 controller.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`]: constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`]: sends the power-on sequence and programs the
///    eight big-digit glyphs.
/// 3. [`show_string()`](Self::show_string),
///    [`show_big_digit()`](Self::show_big_digit) and
///    [`clear()`](Self::clear) write to the display.
///
/// Render calls made before a successful `init()` return
/// [`OledError::NotInitialized`] without touching the bus.
///
/// # Example
///
/// ```no_run
/// use dacxo_oled_display_rs::{OledDriver, DEFAULT_ADDRESS};
///
/// # async fn example(
/// #     i2c: impl embedded_hal_async::i2c::I2c,
/// #     delay: impl embedded_hal_async::delay::DelayNs,
/// # ) {
/// let mut oled = OledDriver::new(i2c, delay, DEFAULT_ADDRESS);
/// oled.init().await.unwrap();
/// oled.show_big_digit(0, 4).await.unwrap();
/// oled.show_big_digit(3, 2).await.unwrap();
/// oled.show_string(0, 7, "hello!").await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<I2C, D> OledDriver<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before any display operations.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access).
    /// * `delay`: delay source for the post-clear settling time.
    /// * `address`: 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            initialized: false,
        }
    }

    /// Bring the controller up from power-on.
    ///
    /// Sends [`INIT_SEQUENCE`] in order, waits
    /// [`CLEAR_SETTLE_MS`] after its final clear command, programs the
    /// eight glyph slots from [`GLYPHS`] and switches the display on.
    ///
    /// May be called again to re-initialise; the driver is not usable
    /// until the call succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::I2c`] on the first failed write. Nothing is
    /// retried: a display that fails to initialise is unusable.
    pub async fn init(&mut self) -> Result<(), OledError<I2C::Error>> {
        self.initialized = false;

        for step in INIT_SEQUENCE.iter() {
            self.send_command(step.command).await?;
            if let Some(payload) = step.payload {
                self.send_data(&[payload]).await?;
            }
        }

        // The sequence ends with a clear, which needs settling time.
        self.delay.delay_ms(CLEAR_SETTLE_MS).await;

        for (slot, pixels) in (0..GLYPH_SLOTS).zip(GLYPHS.iter()) {
            self.write_glyph(slot, pixels).await?;
        }

        self.send_command(DISPLAY_ON).await?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("OLED at {=u8:#x} initialised", self.address);

        Ok(())
    }

    /// Program one CGRAM glyph slot.
    ///
    /// Writes the CGRAM address `0x40 + 8 * slot` followed by the 8 pixel
    /// rows. Overwriting slots 0–7 changes how big digits render.
    ///
    /// # Errors
    /// * [`OledError::NotInitialized`] before [`init()`](Self::init)
    /// * [`OledError::InvalidSlot`] if `slot >= 8`
    /// * [`OledError::I2c`] on communication failure
    pub async fn create_char(
        &mut self,
        slot: u8,
        pixels: &[u8; GLYPH_HEIGHT],
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;
        if slot >= GLYPH_SLOTS {
            return Err(OledError::InvalidSlot);
        }
        self.write_glyph(slot, pixels).await
    }

    /// Write raw character codes starting at (`row`, `col`).
    ///
    /// The DDRAM address is `col + row * 0x40`. Nothing is clipped: bytes
    /// past column 15 land in invisible DDRAM cells.
    ///
    /// # Errors
    /// * [`OledError::NotInitialized`] before [`init()`](Self::init)
    /// * [`OledError::InvalidPosition`] if `row > 1` or `col >= 40`
    /// * [`OledError::DataTooLong`] if `data` is longer than 40 bytes
    /// * [`OledError::I2c`] on communication failure
    pub async fn show_data(
        &mut self,
        row: u8,
        col: u8,
        data: &[u8],
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;
        if row >= ROWS || col >= DDRAM_COLUMNS {
            return Err(OledError::InvalidPosition);
        }
        if data.len() > MAX_DATA_LEN {
            return Err(OledError::DataTooLong);
        }

        self.send_command(SET_DDRAM_ADDRESS | (col + row * ROW_STRIDE))
            .await?;
        self.send_data(data).await
    }

    /// Write `text` starting at (`row`, `col`), one byte per character.
    ///
    /// Characters map to their code point; anything above `0xFF` is shown
    /// as `?`. The caller keeps `col + text.len()` within the 16 visible
    /// columns.
    ///
    /// # Errors
    /// Same as [`show_data()`](Self::show_data).
    ///
    /// # Example
    /// ```no_run
    /// # async fn example<I: embedded_hal_async::i2c::I2c, D: embedded_hal_async::delay::DelayNs>(
    /// #     oled: &mut dacxo_oled_display_rs::OledDriver<I, D>,
    /// # ) {
    /// oled.show_string(1, 0, "07").await.unwrap();
    /// # }
    /// ```
    pub async fn show_string(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
    ) -> Result<(), OledError<I2C::Error>> {
        let mut codes: Vec<u8, MAX_DATA_LEN> = Vec::new();
        for c in text.chars() {
            let code = u8::try_from(u32::from(c)).unwrap_or(b'?');
            codes.push(code).map_err(|_| OledError::DataTooLong)?;
        }
        self.show_data(row, col, &codes).await
    }

    /// Draw a two-row, three-column big digit with its left edge at `col`.
    ///
    /// # Errors
    /// * [`OledError::InvalidDigit`] if `digit > 9`
    /// * otherwise as [`show_data()`](Self::show_data)
    pub async fn show_big_digit(
        &mut self,
        col: u8,
        digit: u8,
    ) -> Result<(), OledError<I2C::Error>> {
        let (top, bottom) = big_digit_rows(digit).ok_or(OledError::InvalidDigit)?;
        self.show_data(0, col, top).await?;
        self.show_data(1, col, bottom).await
    }

    /// Clear the whole display.
    ///
    /// Unlike [`init()`](Self::init), no settling delay follows the clear
    /// command.
    pub async fn clear(&mut self) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;
        self.send_command(CLEAR_DISPLAY).await
    }

    /// Check whether the display has been successfully initialised.
    ///
    /// No I2C traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // -----------------------------------------------------------------------
    // Bus primitives
    // -----------------------------------------------------------------------

    fn ensure_initialized(&self) -> Result<(), OledError<I2C::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    async fn write_glyph(
        &mut self,
        slot: u8,
        pixels: &[u8; GLYPH_HEIGHT],
    ) -> Result<(), OledError<I2C::Error>> {
        self.send_command(SET_CGRAM_ADDRESS + slot * GLYPH_HEIGHT as u8)
            .await?;
        self.send_data(pixels).await
    }

    /// Send a single command byte: `[0x80, cmd]`.
    async fn send_command(&mut self, cmd: u8) -> Result<(), OledError<I2C::Error>> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd]).await?;
        Ok(())
    }

    /// Send a data block: `[0x40, d0, d1, ...]`.
    ///
    /// Callers guarantee `data.len() <= MAX_DATA_LEN`.
    async fn send_data(&mut self, data: &[u8]) -> Result<(), OledError<I2C::Error>> {
        let mut buf = [0u8; MAX_DATA_LEN + 1];
        buf[0] = CONTROL_DATA;
        buf[1..=data.len()].copy_from_slice(data);

        self.i2c.write(self.address, &buf[..=data.len()]).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::RefCell;
    use std::rc::Rc;

    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use crate::commands::DEFAULT_ADDRESS;
    use crate::glyphs::{BIG_DIGITS, BLANK, SOLID};

    const ADDR: u8 = DEFAULT_ADDRESS;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn cmd(c: u8) -> I2cTransaction {
        I2cTransaction::write(ADDR, vec![CONTROL_COMMAND, c])
    }

    fn data(bytes: &[u8]) -> I2cTransaction {
        let mut v = vec![CONTROL_DATA];
        v.extend_from_slice(bytes);
        I2cTransaction::write(ADDR, v)
    }

    /// Every write `init()` makes, in order.
    fn init_transactions() -> std::vec::Vec<I2cTransaction> {
        let mut t = std::vec::Vec::new();
        for step in INIT_SEQUENCE.iter() {
            t.push(cmd(step.command));
            if let Some(p) = step.payload {
                t.push(data(&[p]));
            }
        }
        for (slot, pixels) in GLYPHS.iter().enumerate() {
            t.push(cmd(0x40 + 8 * slot as u8));
            t.push(data(pixels));
        }
        t.push(cmd(DISPLAY_ON));
        t
    }

    /// Mock expecting `init()` followed by `rest`.
    fn mock_after_init(rest: &[I2cTransaction]) -> I2cMock {
        let mut all = init_transactions();
        all.extend_from_slice(rest);
        I2cMock::new(&all)
    }

    async fn ready_driver(i2c: &I2cMock) -> OledDriver<I2cMock, NoopDelay> {
        let mut oled = OledDriver::new(i2c.clone(), NoopDelay, ADDR);
        oled.init().await.unwrap();
        oled
    }

    /// Bus and delay that append to one shared log, so tests can check
    /// where the settling delay falls between writes.
    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Write(std::vec::Vec<u8>),
        DelayNs(u64),
    }

    type Log = Rc<RefCell<std::vec::Vec<Event>>>;

    struct RecordingBus(Log);

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c for RecordingBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, ADDR);
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.0.borrow_mut().push(Event::Write(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct RecordingDelay(Log);

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::DelayNs(u64::from(ns)));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.0
                .borrow_mut()
                .push(Event::DelayNs(u64::from(ms) * 1_000_000));
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn new_generates_no_traffic() {
        let mut i2c = I2cMock::new(&[]);
        let oled = OledDriver::new(i2c.clone(), NoopDelay, ADDR);
        assert!(!oled.is_initialized());
        i2c.done();
    }

    #[tokio::test]
    async fn render_before_init_is_rejected() {
        let mut i2c = I2cMock::new(&[]);
        let mut oled = OledDriver::new(i2c.clone(), NoopDelay, ADDR);

        assert_eq!(oled.show_string(0, 0, "A").await, Err(OledError::NotInitialized));
        assert_eq!(oled.show_big_digit(0, 1).await, Err(OledError::NotInitialized));
        assert_eq!(oled.clear().await, Err(OledError::NotInitialized));
        assert_eq!(
            oled.create_char(0, &[0; 8]).await,
            Err(OledError::NotInitialized)
        );
        i2c.done();
    }

    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn init_sends_full_sequence_in_order() {
        let mut i2c = mock_after_init(&[]);
        let oled = ready_driver(&i2c).await;
        assert!(oled.is_initialized());
        i2c.done();
    }

    #[tokio::test]
    async fn init_register_map_prefix() {
        // Spot-check the first writes against the datasheet register map.
        let log: Log = Rc::default();
        let mut oled =
            OledDriver::new(RecordingBus(log.clone()), RecordingDelay(log.clone()), ADDR);
        oled.init().await.unwrap();

        let log = log.borrow();
        assert_eq!(log[0], Event::Write(vec![0x80, 0x2A]));
        assert_eq!(log[1], Event::Write(vec![0x80, 0x71]));
        assert_eq!(log[2], Event::Write(vec![0x40, 0x5C]));
        assert_eq!(log.last(), Some(&Event::Write(vec![0x80, 0x0C])));
    }

    #[tokio::test]
    async fn init_write_log_matches_power_on_listing() {
        fn c(b: u8) -> Event {
            Event::Write(vec![0x80, b])
        }
        fn d(bytes: &[u8]) -> Event {
            let mut v = vec![0x40];
            v.extend_from_slice(bytes);
            Event::Write(v)
        }

        let log: Log = Rc::default();
        let mut oled =
            OledDriver::new(RecordingBus(log.clone()), RecordingDelay(log.clone()), ADDR);
        oled.init().await.unwrap();

        let expected = vec![
            c(0x2A),
            c(0x71),
            d(&[0x5C]),
            c(0x28),
            c(0x08),
            c(0x2A),
            c(0x79),
            c(0xD5),
            c(0x70),
            c(0x78),
            c(0x08),
            c(0x06),
            c(0x72),
            d(&[0x00]),
            c(0x2A),
            c(0x79),
            c(0xDA),
            c(0x10),
            c(0x81),
            c(0xFF),
            c(0xDB),
            c(0x30),
            c(0xDC),
            c(0x03),
            c(0x78),
            c(0x28),
            c(0x2A),
            c(0x06),
            c(0x08),
            c(0x28),
            c(0x01),
            Event::DelayNs(20_000_000),
            c(0x40),
            d(&[0x07, 0x0F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F]),
            c(0x48),
            d(&[0x1F, 0x1F, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x00]),
            c(0x50),
            d(&[0x1C, 0x1E, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F]),
            c(0x58),
            d(&[0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0F, 0x07]),
            c(0x60),
            d(&[0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0F, 0x07]),
            c(0x68),
            d(&[0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1E, 0x1C]),
            c(0x70),
            d(&[0x1F, 0x1F, 0x1F, 0x00, 0x00, 0x00, 0x1F, 0x1F]),
            c(0x78),
            d(&[0x1F, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F]),
            c(0x0C),
        ];
        assert_eq!(*log.borrow(), expected);
    }

    #[tokio::test]
    async fn init_delays_once_between_clear_and_glyphs() {
        let log: Log = Rc::default();
        let mut oled =
            OledDriver::new(RecordingBus(log.clone()), RecordingDelay(log.clone()), ADDR);
        oled.init().await.unwrap();

        let log = log.borrow();
        let delays: std::vec::Vec<usize> = log
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, Event::DelayNs(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(delays.len(), 1, "exactly one settling delay");

        let at = delays[0];
        assert_eq!(log[at], Event::DelayNs(20_000_000));
        assert_eq!(log[at - 1], Event::Write(vec![0x80, CLEAR_DISPLAY]));
        assert_eq!(log[at + 1], Event::Write(vec![0x80, 0x40]));
    }

    #[tokio::test]
    async fn init_failure_is_reported_without_retry() {
        let mut i2c = I2cMock::new(&[cmd(0x2A).with_error(ErrorKind::Other)]);
        let mut oled = OledDriver::new(i2c.clone(), NoopDelay, ADDR);

        assert_eq!(oled.init().await, Err(OledError::I2c(ErrorKind::Other)));
        assert!(!oled.is_initialized());
        i2c.done();
    }

    // -----------------------------------------------------------------------
    // Glyphs
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_char_writes_cgram_address_then_pixels() {
        let pixels = [0x01, 0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02];
        let mut i2c = mock_after_init(&[cmd(0x40 + 8 * 5), data(&pixels)]);
        let mut oled = ready_driver(&i2c).await;

        oled.create_char(5, &pixels).await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn create_char_rejects_slot_eight() {
        let mut i2c = mock_after_init(&[]);
        let mut oled = ready_driver(&i2c).await;

        assert_eq!(oled.create_char(8, &[0; 8]).await, Err(OledError::InvalidSlot));
        i2c.done();
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn show_string_sets_address_then_ascii() {
        let mut i2c = mock_after_init(&[cmd(0x80 + 3 + 0x40), data(&[0x41, 0x42])]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_string(1, 3, "AB").await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn show_string_top_left() {
        let mut i2c = mock_after_init(&[cmd(0x80), data(b"Hello!")]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_string(0, 0, "Hello!").await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn show_string_does_not_clip_past_visible_width() {
        let mut i2c = mock_after_init(&[cmd(0x80 + 14), data(b"abcd")]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_string(0, 14, "abcd").await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn show_string_replaces_wide_characters() {
        let mut i2c = mock_after_init(&[cmd(0x80), data(&[0xB0, b'?'])]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_string(0, 0, "°€").await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn show_string_rejects_bad_position_and_length() {
        let mut i2c = mock_after_init(&[]);
        let mut oled = ready_driver(&i2c).await;

        assert_eq!(oled.show_string(2, 0, "A").await, Err(OledError::InvalidPosition));
        assert_eq!(oled.show_string(0, 40, "A").await, Err(OledError::InvalidPosition));
        let long = "0123456789012345678901234567890123456789X";
        assert_eq!(oled.show_string(0, 0, long).await, Err(OledError::DataTooLong));
        i2c.done();
    }

    #[tokio::test]
    async fn repeated_render_is_identical() {
        let mut i2c = mock_after_init(&[
            cmd(0x80 + 0x40),
            data(b"07"),
            cmd(0x80 + 0x40),
            data(b"07"),
        ]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_string(1, 0, "07").await.unwrap();
        oled.show_string(1, 0, "07").await.unwrap();
        i2c.done();
    }

    // -----------------------------------------------------------------------
    // Big digits
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn every_big_digit_is_two_rows_of_three() {
        for digit in 0..10u8 {
            let col = 3;
            let cells = BIG_DIGITS[digit as usize];
            let mut i2c = mock_after_init(&[
                cmd(0x80 + col),
                data(&cells[0..3]),
                cmd(0x80 + 0x40 + col),
                data(&cells[3..6]),
            ]);
            let mut oled = ready_driver(&i2c).await;

            oled.show_big_digit(col, digit).await.unwrap();
            i2c.done();
        }
    }

    #[tokio::test]
    async fn big_one_uses_blank_and_solid_cells() {
        let mut i2c = mock_after_init(&[
            cmd(0x80),
            data(&[BLANK, SOLID, BLANK]),
            cmd(0xC0),
            data(&[BLANK, SOLID, BLANK]),
        ]);
        let mut oled = ready_driver(&i2c).await;

        oled.show_big_digit(0, 1).await.unwrap();
        i2c.done();
    }

    #[tokio::test]
    async fn big_digit_rejects_ten() {
        let mut i2c = mock_after_init(&[]);
        let mut oled = ready_driver(&i2c).await;

        assert_eq!(oled.show_big_digit(0, 10).await, Err(OledError::InvalidDigit));
        i2c.done();
    }

    // -----------------------------------------------------------------------
    // Clear
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn clear_sends_command_without_delay() {
        let log: Log = Rc::default();
        let mut oled =
            OledDriver::new(RecordingBus(log.clone()), RecordingDelay(log.clone()), ADDR);
        oled.init().await.unwrap();
        log.borrow_mut().clear();

        oled.clear().await.unwrap();
        assert_eq!(*log.borrow(), vec![Event::Write(vec![0x80, 0x01])]);
    }

    #[tokio::test]
    async fn bus_error_surfaces_from_render() {
        let mut i2c = mock_after_init(&[cmd(0x01).with_error(ErrorKind::Other)]);
        let mut oled = ready_driver(&i2c).await;

        assert_eq!(oled.clear().await, Err(OledError::I2c(ErrorKind::Other)));
        i2c.done();
    }
}
