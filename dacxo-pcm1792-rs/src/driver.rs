//! Low-level control-port driver.
//!
//! Register writes are `[register, value...]` in one transaction; the
//! device auto-increments the register address. Reads set the register
//! pointer and read back one byte with a repeated start.
//!
//! This module is crate-private; consumers use [`Pcm1792`] in `dac.rs`.
//!
//! [`Pcm1792`]: crate::Pcm1792

use embedded_hal_async::i2c::I2c;

use crate::error::DacError;
use crate::registers::MODE_REGISTER_COUNT;

/// Longest burst: the four mode registers plus the register address.
const MAX_WRITE: usize = 1 + MODE_REGISTER_COUNT;

pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Write `values` to consecutive registers starting at `register`.
    ///
    /// At most four values go out per call; callers only ever pass the
    /// attenuation pair, a single byte, or the mode word.
    pub async fn write_registers(
        &mut self,
        register: u8,
        values: &[u8],
    ) -> Result<(), DacError<I2C::Error>> {
        debug_assert!(values.len() <= MODE_REGISTER_COUNT);
        let len = values.len().min(MODE_REGISTER_COUNT);

        let mut buf = [0u8; MAX_WRITE];
        buf[0] = register;
        buf[1..=len].copy_from_slice(&values[..len]);

        self.i2c.write(self.address, &buf[..=len]).await?;
        Ok(())
    }

    /// Read one register.
    pub async fn read_register(&mut self, register: u8) -> Result<u8, DacError<I2C::Error>> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut value).await?;
        Ok(value[0])
    }
}
