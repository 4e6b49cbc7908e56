//! Bus transport abstraction

use core::fmt::Debug;

/// Byte-level access to the two-wire bus the device sits on.
///
/// Each call is one complete transaction: address selection, data phase and
/// stop condition.
pub trait Transport {
    /// Error reported by the bus layer
    type Error: Debug;

    /// Address the device without transferring data, succeeding if it acknowledges.
    fn probe(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Write `bytes` to the device in a single transaction.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read into `buffer`, returning how many bytes the device delivered.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// [`Transport`] over an `embedded-hal` I²C bus
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Wrap an I²C bus.
    pub fn new(i2c: I2C) -> Self {
        I2cInterface { i2c }
    }

    /// Give back the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[])
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    // embedded-hal reads always fill the whole buffer or fail
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(address, buffer)?;
        Ok(buffer.len())
    }
}
