pub mod config;

pub mod clock {
    use anyhow::{anyhow, Context};
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
    use ds1388::{Ds1388, Transport};

    use crate::config::ClockConfig;

    /// Whether the time kept by the RTC can be trusted
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TimeState {
        Valid,
        /// The oscillator stopped at some point, time must be set again
        Invalid,
    }

    fn rtc_error<E: core::fmt::Debug>(e: ds1388::Error<E>) -> anyhow::Error {
        anyhow!("rtc: {}", e)
    }

    pub struct Clock<T> {
        rtc: Ds1388<T>,
        trickle_charger: Option<ds1388::TrickleCharger>,
        offset: FixedOffset,
    }

    impl<T> Clock<T>
    where
        T: Transport,
    {
        // Constructor for Clock
        pub fn new(transport: T, config: &ClockConfig) -> anyhow::Result<Clock<T>> {
            Ok(Clock {
                rtc: Ds1388::new_with_address(transport, config.device.address),
                trickle_charger: config.trickle_charger()?,
                offset: config.utc_offset()?,
            })
        }

        /// Bring up the RTC and report whether its time can be used.
        ///
        /// A pending watchdog reset is logged and acknowledged.
        pub fn start(&mut self) -> anyhow::Result<TimeState> {
            self.rtc
                .begin()
                .map_err(rtc_error)
                .context("RTC initialization failed")?;

            if let Some(setting) = self.trickle_charger {
                self.rtc.set_trickle_charger(setting).map_err(rtc_error)?;
            }

            if self.rtc.watchdog_triggered().map_err(rtc_error)? {
                log::warn!("Last reset was caused by the RTC watchdog");
                self.rtc.clear_watchdog_flag().map_err(rtc_error)?;
            }

            if self.rtc.has_been_stopped().map_err(rtc_error)? {
                log::warn!("RTC oscillator stopped, stored time is invalid");
                Ok(TimeState::Invalid)
            } else {
                log::info!("RTC running, stored time is valid");
                Ok(TimeState::Valid)
            }
        }

        /// Set the RTC to the given UTC time and mark it valid.
        pub fn set_date_time(&mut self, utc: &NaiveDateTime) -> anyhow::Result<()> {
            self.rtc
                .set_time(utc)
                .map_err(rtc_error)
                .with_context(|| format!("failed to set RTC to {}", utc))?;
            self.rtc.clear_has_been_stopped_flag().map_err(rtc_error)?;
            log::info!("RTC set to {} UTC", utc);
            Ok(())
        }

        /// Method for returning the stored UTC date and time
        pub fn get_date_time(&mut self) -> anyhow::Result<NaiveDateTime> {
            self.rtc
                .now()
                .map_err(rtc_error)
                .context("failed to read RTC")
        }

        /// Current time in the configured timezone
        pub fn local_time(&mut self) -> anyhow::Result<DateTime<FixedOffset>> {
            let utc = self.get_date_time()?;
            Ok(self.offset.from_utc_datetime(&utc))
        }

        ///Returns a unix timestamp based on the current date time
        pub fn unix_timestamp(&mut self) -> anyhow::Result<i64> {
            Ok(self.get_date_time()?.and_utc().timestamp())
        }

        /// Unix timestamp in milliseconds, including the RTC's hundredths of a second
        pub fn unix_timestamp_millis(&mut self) -> anyhow::Result<i64> {
            let seconds = self.unix_timestamp()?;
            Ok(seconds * 1000 + i64::from(self.rtc.centisecond()) * 10)
        }

        /// Method to get the configured UTC offset
        pub fn get_offset(&self) -> FixedOffset {
            self.offset
        }

        /// Give back the driver.
        pub fn release(self) -> Ds1388<T> {
            self.rtc
        }
    }

}

pub use clock::{Clock, TimeState};
pub use config::ClockConfig;
