//! High-level interface for the PCM1792A.
//!
//! [`Pcm1792`] caches the mode word it last wrote so single options (mute)
//! can be flipped without a read-modify-write over the bus.

use embedded_hal_async::i2c::I2c;

use crate::driver::RegisterDriver;
use crate::error::DacError;
use crate::mode::Mode;
use crate::registers::{
    ATTENUATION_OFFSET, FIRST_REGISTER, LAST_REGISTER, LAST_WRITABLE_REGISTER,
    REG_ATTENUATION_LEFT, REG_MODE, VOLUME_STEPS,
};

/// PCM1792A stereo DAC on an I2C control port.
///
/// # Example
///
/// ```ignore
/// use pcm1792_driver::{Mode, Pcm1792, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut dac = Pcm1792::new(i2c, DEFAULT_ADDRESS);
///
/// // Attenuation registers only take effect with ATLD set
/// dac.set_mode(Mode::FMT_24I | Mode::ATLD).await?;
/// dac.set_volume64(48).await?;
/// ```
pub struct Pcm1792<I2C> {
    driver: RegisterDriver<I2C>,
    mode: Mode,
}

impl<I2C> Pcm1792<I2C>
where
    I2C: I2c,
{
    /// Create a driver for the DAC at `address` (usually
    /// [`DEFAULT_ADDRESS`](crate::DEFAULT_ADDRESS)).
    ///
    /// Nothing is written until the first call; the cached mode starts at
    /// [`Mode::POWER_ON`].
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, address),
            mode: Mode::POWER_ON,
        }
    }

    /// The mode word most recently written.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    // -----------------------------------------------------------------------
    // Write operations
    // -----------------------------------------------------------------------

    /// Write the full mode word to registers 18–21.
    pub async fn set_mode(&mut self, mode: Mode) -> Result<(), DacError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCM1792A mode <- {}", mode);

        self.driver.write_registers(REG_MODE, &mode.register_bytes()).await?;
        self.mode = mode;
        Ok(())
    }

    /// Set both channels to `volume` in 1 dB steps, `0..=64`.
    ///
    /// Values above 64 clamp to 64 (0 dB). Zero writes the mute level.
    pub async fn set_volume64(&mut self, volume: u8) -> Result<(), DacError<I2C::Error>> {
        let level = attenuation_for(volume);

        #[cfg(feature = "defmt")]
        defmt::debug!("PCM1792A volume {} -> attenuation {}", volume, level);

        self.driver.write_registers(REG_ATTENUATION_LEFT, &[level, level]).await
    }

    /// Set or clear soft mute.
    ///
    /// Only register 18 is rewritten; the rest of the cached mode is kept.
    pub async fn set_mute(&mut self, muted: bool) -> Result<(), DacError<I2C::Error>> {
        let mut mode = self.mode;
        mode.set(Mode::MUTE, muted);

        let [low, ..] = mode.register_bytes();
        self.driver.write_registers(REG_MODE, &[low]).await?;
        self.mode = mode;
        Ok(())
    }

    /// Write a raw value to one writable register (16–21).
    ///
    /// Writes to the mode registers bypass the cached [`Mode`]; follow up
    /// with [`set_mode`](Self::set_mode) to keep it coherent.
    ///
    /// # Errors
    /// * [`DacError::InvalidRegister`] for read-only or unmapped registers
    /// * [`DacError::I2c`] on communication failure
    pub async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), DacError<I2C::Error>> {
        if !(FIRST_REGISTER..=LAST_WRITABLE_REGISTER).contains(&register) {
            return Err(DacError::InvalidRegister);
        }
        self.driver.write_registers(register, &[value]).await
    }

    // -----------------------------------------------------------------------
    // Read operations
    // -----------------------------------------------------------------------

    /// Read one register (16–23), including the status and device-ID
    /// registers.
    pub async fn read_register(&mut self, register: u8) -> Result<u8, DacError<I2C::Error>> {
        if !(FIRST_REGISTER..=LAST_REGISTER).contains(&register) {
            return Err(DacError::InvalidRegister);
        }
        self.driver.read_register(register).await
    }
}

/// Attenuation register value for a 0–64 volume.
pub fn attenuation_for(volume: u8) -> u8 {
    match volume.min(VOLUME_STEPS) {
        0 => 0,
        v => 2 * v + ATTENUATION_OFFSET,
    }
}
