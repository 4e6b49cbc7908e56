//! Device configuration

use super::datetime::decimal_to_packed_bcd;
use crate::interface::Transport;
use crate::{BitFlags, Diode, Ds1388, Error, Register, Resistor, TrickleCharger};

impl<T> Ds1388<T>
where
    T: Transport,
{
    /// Read the raw control register.
    pub fn control(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::CONTROL)
    }

    /// Read whether the oscillator is enabled.
    pub fn is_enabled(&mut self) -> Result<bool, Error<T::Error>> {
        let control = self.control()?;
        Ok((control & BitFlags::EOSC) == 0)
    }

    /// Enable the oscillator (set the clock running) (default).
    pub fn enable(&mut self) -> Result<(), Error<T::Error>> {
        self.update_control(0, BitFlags::EOSC)
    }

    /// Disable the oscillator (stops the clock).
    ///
    /// Only takes effect while the device runs on battery backup.
    pub fn disable(&mut self) -> Result<(), Error<T::Error>> {
        self.update_control(BitFlags::EOSC, 0)
    }

    /// Set the watchdog counter.
    ///
    /// Writing the counter also restarts it, so this doubles as the periodic
    /// "kick" once the watchdog is enabled. Both values must be below 100.
    pub fn set_watchdog_timeout(
        &mut self,
        seconds: u8,
        centiseconds: u8,
    ) -> Result<(), Error<T::Error>> {
        if seconds > 99 || centiseconds > 99 {
            return Err(Error::InvalidInputData);
        }
        let payload = [
            Register::WATCHDOG_HUNDREDTHS,
            decimal_to_packed_bcd(centiseconds),
            decimal_to_packed_bcd(seconds),
        ];
        self.write_data(&payload)
    }

    /// Enable the watchdog counter. On expiry the reset output is pulsed.
    pub fn enable_watchdog(&mut self) -> Result<(), Error<T::Error>> {
        self.update_control(BitFlags::WDE | BitFlags::WD_ALM, 0)
    }

    /// Disable the watchdog counter (default).
    pub fn disable_watchdog(&mut self) -> Result<(), Error<T::Error>> {
        self.update_control(0, BitFlags::WDE)
    }

    /// Configure the trickle charger for a rechargeable backup supply.
    pub fn set_trickle_charger(&mut self, setting: TrickleCharger) -> Result<(), Error<T::Error>> {
        let value = match setting {
            TrickleCharger::Disabled => 0,
            TrickleCharger::Enabled { diode, resistor } => {
                let diode = match diode {
                    Diode::None => 0b01 << 2,
                    Diode::One => 0b10 << 2,
                };
                let resistor = match resistor {
                    Resistor::R250 => 0b01,
                    Resistor::R2k => 0b10,
                    Resistor::R4k => 0b11,
                };
                BitFlags::TCS | diode | resistor
            }
        };
        self.write_register(Register::TRICKLE_CHARGER, value)
    }

    // read-modify-write, other bits untouched
    fn update_control(&mut self, set: u8, clear: u8) -> Result<(), Error<T::Error>> {
        let control = self.control()?;
        self.write_register(Register::CONTROL, (control & !clear) | set)
    }
}
