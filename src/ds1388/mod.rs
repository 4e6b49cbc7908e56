use crate::interface::{I2cInterface, Transport};
use crate::{Ds1388, Error, Register, CONTROL_INIT_VALUE, DEVICE_ADDRESS};

mod configuration;
mod datetime;
mod status;

impl<T> Ds1388<T>
where
    T: Transport,
{
    /// Create a new instance talking to the device at the default address.
    pub fn new(transport: T) -> Self {
        Self::new_with_address(transport, DEVICE_ADDRESS)
    }

    /// Create a new instance talking to the device at `address`.
    pub fn new_with_address(transport: T, address: u8) -> Self {
        Ds1388 {
            transport,
            address,
            centisecond: 0,
        }
    }

    /// Destroy driver instance, return the transport.
    pub fn destroy(self) -> T {
        self.transport
    }

    /// Bus address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Make sure the device is ready to keep time.
    ///
    /// A device that acknowledges its address is left untouched so a running
    /// clock is never reset. Otherwise the control register is written with
    /// the oscillator enabled and the watchdog counter disabled.
    pub fn begin(&mut self) -> Result<(), Error<T::Error>> {
        match self.transport.probe(self.address) {
            Ok(()) => {
                log::debug!("{:#04x}: device acknowledged, keeping configuration", self.address);
                Ok(())
            }
            Err(e) => {
                log::info!(
                    "{:#04x}: no acknowledge on probe ({:?}), writing control register",
                    self.address,
                    e
                );
                self.write_register(Register::CONTROL, CONTROL_INIT_VALUE)
            }
        }
    }

    /// Write a single register.
    pub fn write_register(&mut self, register: u8, data: u8) -> Result<(), Error<T::Error>> {
        self.transport
            .write(self.address, &[register, data])
            .map_err(|e| {
                log::error!(
                    "{:#04x}: error {:?} writing {:#04x} to register {:#04x}",
                    self.address,
                    e,
                    data,
                    register
                );
                Error::Comm(e)
            })
    }

    /// Read a single register.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<T::Error>> {
        let mut data = [0];
        self.read_data(register, &mut data)?;
        Ok(data[0])
    }

    /// Write `payload` as one transaction. The first byte is the register pointer.
    pub(crate) fn write_data(&mut self, payload: &[u8]) -> Result<(), Error<T::Error>> {
        self.transport.write(self.address, payload).map_err(|e| {
            log::error!(
                "{:#04x}: error {:?} writing {} bytes from register {:#04x}",
                self.address,
                e,
                payload.len().saturating_sub(1),
                payload.first().copied().unwrap_or_default()
            );
            Error::Comm(e)
        })
    }

    /// Point the device at `register`, then read `data.len()` consecutive bytes.
    pub(crate) fn read_data(&mut self, register: u8, data: &mut [u8]) -> Result<(), Error<T::Error>> {
        let address = self.address;
        let log_err = |e: T::Error| {
            log::error!(
                "{:#04x}: error {:?} reading from register {:#04x}",
                address,
                e,
                register
            );
            Error::Comm(e)
        };
        self.transport.write(address, &[register]).map_err(log_err)?;
        let received = self.transport.read(address, data).map_err(log_err)?;
        if received != data.len() {
            log::error!(
                "{:#04x}: short read from register {:#04x}, {} of {} bytes",
                address,
                register,
                received,
                data.len()
            );
            return Err(Error::ShortRead {
                expected: data.len(),
                received,
            });
        }
        Ok(())
    }
}

impl<I2C> Ds1388<I2cInterface<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Create a new instance on an `embedded-hal` I²C bus at the default address.
    pub fn new_with_i2c(i2c: I2C) -> Self {
        Self::new(I2cInterface::new(i2c))
    }
}
