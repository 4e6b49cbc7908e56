//! Platform-agnostic driver for the DS1388 I²C real-time clock.
//!
//! The device keeps time down to hundredths of a second, carries an
//! oscillator-stop flag for detecting power loss and has a watchdog counter
//! that can pulse the reset output.
//!
//! ```no_run
//! # fn run<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), ds1388::Error<I2C::Error>> {
//! use ds1388::{Ds1388, NaiveDate};
//!
//! let mut rtc = Ds1388::new_with_i2c(i2c);
//! rtc.begin()?;
//! if rtc.has_been_stopped()? {
//!     let datetime = NaiveDate::from_ymd_opt(2024, 3, 14)
//!         .and_then(|d| d.and_hms_opt(15, 9, 26))
//!         .unwrap();
//!     rtc.set_time(&datetime)?;
//!     rtc.clear_has_been_stopped_flag()?;
//! }
//! let now = rtc.now()?;
//! let hundredths = rtc.centisecond();
//! # let _ = (now, hundredths);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![no_std]

use core::fmt;

pub use rtcc::{DateTimeAccess, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// All possible errors in this crate
#[derive(Debug)]
pub enum Error<E> {
    /// I²C bus error
    Comm(E),
    /// The device returned fewer bytes than were requested.
    ShortRead {
        /// Number of bytes requested.
        expected: usize,
        /// Number of bytes actually delivered by the bus.
        received: usize,
    },
    /// Invalid input data provided
    InvalidInputData,
    /// Internal device state is invalid.
    ///
    /// It was not possible to read a valid date and/or time.
    /// The device is probably missing initialization.
    InvalidDeviceState,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Comm(e) => write!(f, "bus error: {:?}", e),
            Error::ShortRead { expected, received } => {
                write!(f, "short read: expected {} bytes, got {}", expected, received)
            }
            Error::InvalidInputData => write!(f, "invalid input data"),
            Error::InvalidDeviceState => write!(f, "device holds no valid date/time"),
        }
    }
}

/// Diode setting of the trickle charger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diode {
    /// No diode in the charging path
    None,
    /// One series diode
    One,
}

/// Series resistor of the trickle charger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resistor {
    /// 250 Ω
    R250,
    /// 2 kΩ
    R2k,
    /// 4 kΩ
    R4k,
}

/// Trickle charger configuration for a rechargeable backup supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickleCharger {
    /// Charger disabled (power-on default)
    Disabled,
    /// Charger enabled through the given diode and resistor
    Enabled { diode: Diode, resistor: Resistor },
}

struct Register;

impl Register {
    const HUNDREDTHS: u8 = 0x00;
    const WATCHDOG_HUNDREDTHS: u8 = 0x08;
    const TRICKLE_CHARGER: u8 = 0x0A;
    const FLAGS: u8 = 0x0B;
    const CONTROL: u8 = 0x0C;
}

struct BitFlags;

impl BitFlags {
    const OSC_RUNNING: u8 = 0b1000_0000;
    const H24_H12: u8 = 0b0100_0000;
    const AM_PM: u8 = 0b0010_0000;
    const OSC_STOP: u8 = 0b1000_0000;
    const WATCHDOG: u8 = 0b0100_0000;
    const EOSC: u8 = 0b1000_0000;
    const WDE: u8 = 0b0000_0010;
    const WD_ALM: u8 = 0b0000_0001;
    const TCS: u8 = 0b1010_0000;
}

/// Default bus address of the DS1388.
pub const DEVICE_ADDRESS: u8 = 0b110_1000;
/// Oscillator enabled, watchdog counter disabled.
const CONTROL_INIT_VALUE: u8 = 0;
/// Number of bytes in the timekeeping block starting at the hundredths register.
const DATETIME_LEN: usize = 8;

/// DS1388 RTC driver
#[derive(Debug)]
pub struct Ds1388<T> {
    transport: T,
    address: u8,
    centisecond: u8,
}

mod ds1388;
mod interface;
pub use crate::interface::{I2cInterface, Transport};
