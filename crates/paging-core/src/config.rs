//! Engine configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

const MIN_STATEMENT_TIMEOUT_SECS: u64 = 1;
const MAX_STATEMENT_TIMEOUT_SECS: u64 = 3600;

/// Settings shared by the offset and cursor engines.
///
/// ## Example
///
/// ```rust
/// use paging_core::PagingConfig;
///
/// let config = PagingConfig::default().with_statement_timeout_secs(30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PagingConfig {
    /// Deadline for a single row store round trip in seconds (optional)
    #[cfg_attr(
        feature = "config",
        arg(long = "statement-timeout-secs", env = "PAGING_STATEMENT_TIMEOUT_SECS")
    )]
    pub statement_timeout_secs: Option<u64>,
}

impl PagingConfig {
    /// Sets the per-round-trip deadline in seconds.
    pub fn with_statement_timeout_secs(mut self, secs: u64) -> Self {
        self.statement_timeout_secs = Some(secs);
        self
    }

    /// Returns the per-round-trip deadline as a Duration.
    #[inline]
    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_secs.map(Duration::from_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(timeout) = self.statement_timeout_secs
            && !(MIN_STATEMENT_TIMEOUT_SECS..=MAX_STATEMENT_TIMEOUT_SECS).contains(&timeout)
        {
            return Err(format!(
                "statement_timeout_secs must be between {} and {}",
                MIN_STATEMENT_TIMEOUT_SECS, MAX_STATEMENT_TIMEOUT_SECS
            ));
        }

        Ok(())
    }
}

impl fmt::Display for PagingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PagingConfig(statement_timeout: {:?})",
            self.statement_timeout_secs
        )
    }
}
