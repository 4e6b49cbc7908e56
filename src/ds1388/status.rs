//! Device status flags

use crate::interface::Transport;
use crate::{BitFlags, Ds1388, Error, Register};

impl<T> Ds1388<T>
where
    T: Transport,
{
    /// Read whether the oscillator is stopped or has been stopped at
    /// some point.
    ///
    /// While this is set the stored time cannot be trusted. The flag is set on
    /// power-up and stays set until cleared with
    /// [`clear_has_been_stopped_flag()`](#method.clear_has_been_stopped_flag).
    pub fn has_been_stopped(&mut self) -> Result<bool, Error<T::Error>> {
        let flags = self.read_register(Register::FLAGS)?;
        Ok((flags & BitFlags::OSC_STOP) != 0)
    }

    /// Clear the flag indicating whether the oscillator is stopped or has
    /// been stopped at some point.
    pub fn clear_has_been_stopped_flag(&mut self) -> Result<(), Error<T::Error>> {
        self.clear_flag(BitFlags::OSC_STOP)
    }

    /// Read whether the watchdog counter expired and pulsed the reset output.
    pub fn watchdog_triggered(&mut self) -> Result<bool, Error<T::Error>> {
        let flags = self.read_register(Register::FLAGS)?;
        Ok((flags & BitFlags::WATCHDOG) != 0)
    }

    /// Clear the watchdog flag.
    pub fn clear_watchdog_flag(&mut self) -> Result<(), Error<T::Error>> {
        self.clear_flag(BitFlags::WATCHDOG)
    }

    fn clear_flag(&mut self, mask: u8) -> Result<(), Error<T::Error>> {
        let flags = self.read_register(Register::FLAGS)?;
        log::debug!("{:#04x}: clearing flags {:#04x} of {:#04x}", self.address, mask, flags);
        self.write_register(Register::FLAGS, flags & !mask)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::ds1388::test_utils::{destroy, new_rtc};
    use crate::DEVICE_ADDRESS;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::Transaction as I2cTrans;
    use std::vec;
    use std::vec::Vec;

    fn read_flags(value: u8) -> Vec<I2cTrans> {
        vec![
            I2cTrans::write(DEVICE_ADDRESS, vec![Register::FLAGS]),
            I2cTrans::read(DEVICE_ADDRESS, vec![value]),
        ]
    }

    #[test]
    fn reads_oscillator_stopped() {
        let mut transactions = read_flags(0x80);
        transactions.extend(read_flags(0x40));
        let mut rtc = new_rtc(&transactions);
        assert!(rtc.has_been_stopped().unwrap());
        assert!(!rtc.has_been_stopped().unwrap());
        destroy(rtc);
    }

    #[test]
    fn reads_watchdog_triggered() {
        let mut transactions = read_flags(0x40);
        transactions.extend(read_flags(0x80));
        let mut rtc = new_rtc(&transactions);
        assert!(rtc.watchdog_triggered().unwrap());
        assert!(!rtc.watchdog_triggered().unwrap());
        destroy(rtc);
    }

    #[test]
    fn clearing_oscillator_flag_keeps_other_bits() {
        let mut transactions = read_flags(0xC5);
        transactions.push(I2cTrans::write(DEVICE_ADDRESS, vec![Register::FLAGS, 0x45]));
        let mut rtc = new_rtc(&transactions);
        rtc.clear_has_been_stopped_flag().unwrap();
        destroy(rtc);
    }

    #[test]
    fn clearing_watchdog_flag_keeps_other_bits() {
        let mut transactions = read_flags(0xC5);
        transactions.push(I2cTrans::write(DEVICE_ADDRESS, vec![Register::FLAGS, 0x85]));
        let mut rtc = new_rtc(&transactions);
        rtc.clear_watchdog_flag().unwrap();
        destroy(rtc);
    }

    #[test]
    fn failed_flag_read_skips_write() {
        let mut rtc = new_rtc(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![Register::FLAGS]).with_error(ErrorKind::Bus)
        ]);
        assert!(matches!(
            rtc.clear_watchdog_flag(),
            Err(Error::Comm(ErrorKind::Bus))
        ));
        destroy(rtc);
    }
}
