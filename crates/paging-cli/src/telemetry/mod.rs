//! Tracing subscriber setup.

mod tracing;

use anyhow::Context;

use crate::config::LogFormat;

/// Installs the global tracing subscriber for the given log format.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub(crate) fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    tracing::init_tracing(format).context("Failed to initialize tracing")
}
