//! Timezone selection for date bucketing
//!
//! Sessions are bucketed into the day they started in the user's timezone,
//! not in UTC; a session at 23:30 local time belongs to that local day even
//! when UTC has already rolled over. This module resolves which timezone to
//! use: an explicit CLI value, the `TZ` environment variable, the system
//! timezone, or UTC as the last resort.

use crate::error::{PjstatError, Result};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Resolved timezone for all date operations
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The timezone to bucket dates in
    pub tz: Tz,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            tz: local_timezone(),
        }
    }
}

impl TimezoneConfig {
    /// Resolve the timezone from CLI flags
    ///
    /// `use_utc` wins over an explicit timezone string; with neither set,
    /// the system timezone is detected.
    pub fn from_flags(timezone_str: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self { tz: Tz::UTC });
        }

        match timezone_str {
            Some(tz_str) => {
                let tz = Tz::from_str(tz_str).map_err(|_| {
                    PjstatError::InvalidTimezone(format!(
                        "'{tz_str}'. Use format like 'America/New_York', 'Asia/Tokyo', or 'UTC'"
                    ))
                })?;
                Ok(Self { tz })
            }
            None => Ok(Self::default()),
        }
    }

    /// IANA name of the configured timezone
    pub fn display_name(&self) -> &str {
        self.tz.name()
    }
}

/// Detect the system's local timezone, falling back to UTC
fn local_timezone() -> Tz {
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&tz_str)
    {
        debug!("Using timezone from TZ environment variable: {}", tz_str);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!("Unparseable system timezone '{}', falling back to UTC", tz_str);
                Tz::UTC
            }
        },
        Err(e) => {
            debug!("Could not detect system timezone ({:?}), falling back to UTC", e);
            Tz::UTC
        }
    }
}
