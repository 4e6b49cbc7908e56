//! Date/time reading and setting

use crate::interface::Transport;
use crate::{
    BitFlags, DateTimeAccess, Datelike, Ds1388, Error, NaiveDate, NaiveDateTime, Register,
    Timelike, DATETIME_LEN,
};

impl<T> Ds1388<T>
where
    T: Transport,
{
    /// Read the current date and time.
    ///
    /// The hundredths of a second read along with it are kept and can be
    /// retrieved with [`centisecond()`](#method.centisecond).
    pub fn now(&mut self) -> Result<NaiveDateTime, Error<T::Error>> {
        let mut data = [0; DATETIME_LEN];
        self.read_data(Register::HUNDREDTHS, &mut data)?;

        let centisecond = packed_bcd_to_decimal(data[0]);
        let second = packed_bcd_to_decimal(data[1] & !BitFlags::OSC_RUNNING);
        let minute = packed_bcd_to_decimal(data[2]);
        let hour = hours_to_24h(data[3]);
        // data[4] is the day of the week, not tracked
        let day = packed_bcd_to_decimal(data[5]);
        let month = packed_bcd_to_decimal(data[6]);
        let year = 2000 + i32::from(packed_bcd_to_decimal(data[7]));

        let datetime = NaiveDate::from_ymd_opt(year, month.into(), day.into())
            .and_then(|date| date.and_hms_opt(hour.into(), minute.into(), second.into()))
            .ok_or(Error::InvalidDeviceState)?;
        self.centisecond = centisecond;
        Ok(datetime)
    }

    /// Hundredths of a second captured by the last successful [`now()`](#method.now).
    ///
    /// No bus access takes place. Before the first successful read this is 0.
    pub fn centisecond(&self) -> u8 {
        self.centisecond
    }

    /// Set the date and time.
    ///
    /// The hundredths counter is reset to 0. Only years 2000 to 2099 can be stored.
    pub fn set_time(&mut self, datetime: &NaiveDateTime) -> Result<(), Error<T::Error>> {
        let year = datetime.year();
        if !(2000..=2099).contains(&year) {
            return Err(Error::InvalidInputData);
        }
        let payload = [
            Register::HUNDREDTHS,
            0,
            decimal_to_packed_bcd(datetime.second() as u8),
            decimal_to_packed_bcd(datetime.minute() as u8),
            decimal_to_packed_bcd(datetime.hour() as u8),
            0,
            decimal_to_packed_bcd(datetime.day() as u8),
            decimal_to_packed_bcd(datetime.month() as u8),
            decimal_to_packed_bcd((year - 2000) as u8),
        ];
        self.write_data(&payload)
    }
}

impl<T> DateTimeAccess for Ds1388<T>
where
    T: Transport,
{
    type Error = Error<T::Error>;

    fn datetime(&mut self) -> Result<NaiveDateTime, Self::Error> {
        self.now()
    }

    fn set_datetime(&mut self, datetime: &NaiveDateTime) -> Result<(), Self::Error> {
        self.set_time(datetime)
    }
}

/// Decode the hours register, which may hold 12-hour time.
fn hours_to_24h(data: u8) -> u8 {
    if data & BitFlags::H24_H12 == 0 {
        return packed_bcd_to_decimal(data & !BitFlags::H24_H12);
    }
    let hour = packed_bcd_to_decimal(data & !(BitFlags::H24_H12 | BitFlags::AM_PM)) % 12;
    if data & BitFlags::AM_PM != 0 {
        hour + 12
    } else {
        hour
    }
}

/// Transforms a decimal number (0-99) to packed BCD format
pub(crate) fn decimal_to_packed_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}

/// Transforms a number in packed BCD format to decimal
pub(crate) fn packed_bcd_to_decimal(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0xF)
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

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn bcd_round_trips_every_two_digit_value() {
        for value in 0..=99 {
            assert_eq!(packed_bcd_to_decimal(decimal_to_packed_bcd(value)), value);
        }
    }

    #[test]
    fn bcd_nibbles() {
        assert_eq!(decimal_to_packed_bcd(59), 0x59);
        assert_eq!(packed_bcd_to_decimal(0x23), 23);
    }

    #[test]
    fn twelve_hour_register_is_converted() {
        assert_eq!(hours_to_24h(0x23), 23);
        // 12 AM
        assert_eq!(hours_to_24h(0b0101_0010), 0);
        // 12 PM
        assert_eq!(hours_to_24h(0b0111_0010), 12);
        // 7 PM
        assert_eq!(hours_to_24h(0b0110_0111), 19);
    }

    #[test]
    fn set_time_writes_block_in_device_order() {
        let mut rtc = new_rtc(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![0x00, 0x00, 0x58, 0x59, 0x23, 0x00, 0x31, 0x12, 0x24],
        )]);
        rtc.set_time(&datetime(2024, 12, 31, 23, 59, 58)).unwrap();
        destroy(rtc);
    }

    #[test]
    fn set_time_rejects_year_outside_device_range() {
        let mut rtc = new_rtc(&[]);
        assert!(matches!(
            rtc.set_time(&datetime(1999, 1, 1, 0, 0, 0)),
            Err(Error::InvalidInputData)
        ));
        assert!(matches!(
            rtc.set_time(&datetime(2100, 1, 1, 0, 0, 0)),
            Err(Error::InvalidInputData)
        ));
        destroy(rtc);
    }

    #[test]
    fn set_time_surfaces_bus_error() {
        let mut rtc = new_rtc(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00],
        )
        .with_error(ErrorKind::ArbitrationLoss)]);
        assert!(matches!(
            rtc.set_time(&datetime(2000, 1, 1, 0, 0, 0)),
            Err(Error::Comm(ErrorKind::ArbitrationLoss))
        ));
        destroy(rtc);
    }

    #[test]
    fn now_decodes_block_and_caches_centisecond() {
        let mut rtc = new_rtc(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![Register::HUNDREDTHS]),
            // seconds carry the oscillator bit, day of week is garbage
            I2cTrans::read(
                DEVICE_ADDRESS,
                vec![0x42, 0x80 | 0x30, 0x15, 0x04, 0x07, 0x14, 0x03, 0x24],
            ),
        ]);
        assert_eq!(rtc.now().unwrap(), datetime(2024, 3, 14, 4, 15, 30));
        assert_eq!(rtc.centisecond(), 42);
        destroy(rtc);
    }

    #[test]
    fn now_rejects_uninitialized_registers() {
        let mut rtc = new_rtc(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![Register::HUNDREDTHS]),
            I2cTrans::read(DEVICE_ADDRESS, vec![0x11, 0, 0, 0, 0, 0, 0, 0]),
        ]);
        assert!(matches!(rtc.now(), Err(Error::InvalidDeviceState)));
        assert_eq!(rtc.centisecond(), 0);
        destroy(rtc);
    }

    #[test]
    fn datetime_access_delegates() {
        let mut rtc = new_rtc(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![0x00, 0x00, 0x05, 0x04, 0x03, 0x00, 0x02, 0x01, 0x99],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![Register::HUNDREDTHS]),
            I2cTrans::read(
                DEVICE_ADDRESS,
                vec![0x00, 0x05, 0x04, 0x03, 0x00, 0x02, 0x01, 0x99],
            ),
        ]);
        let dt = datetime(2099, 1, 2, 3, 4, 5);
        rtc.set_datetime(&dt).unwrap();
        assert_eq!(rtc.datetime().unwrap(), dt);
        destroy(rtc);
    }
}
