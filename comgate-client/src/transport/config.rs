//! Gateway call timeouts.

use std::{ops::RangeInclusive, time::Duration};

use serde::Deserialize;

use crate::error::{ComgateError, Result};

const TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;
const CONNECT_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=60;

/// Timeouts for gateway calls, read from the `[http]` table of the client config.
///
/// Comgate answers each call in one round trip, so a request that outlives
/// `timeout_secs` is abandoned and surfaces as
/// [`ComgateError::HttpError`](crate::ComgateError::HttpError).
///
/// ```toml
/// [http]
/// timeout_secs = 20
/// connect_timeout_secs = 5
/// ```
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request budget, 1 to 300 seconds.
    pub timeout_secs: u64,
    /// TCP and TLS connect budget, 1 to 60 seconds.
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30, connect_timeout_secs: 10 }
    }
}

impl HttpConfig {
    /// Checks both timeouts are within their ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] naming the out-of-range field.
    pub fn validate(&self) -> Result<()> {
        check_range("http.timeout_secs", self.timeout_secs, &TIMEOUT_RANGE)?;
        check_range(
            "http.connect_timeout_secs",
            self.connect_timeout_secs,
            &CONNECT_TIMEOUT_RANGE,
        )
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn check_range(field: &str, value: u64, range: &RangeInclusive<u64>) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ComgateError::ConfigError(format!(
        "{field} is {value}s, expected {}..={}s",
        range.start(),
        range.end()
    )))
}
