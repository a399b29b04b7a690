//! Helpers for classifying and routing external errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::CrumbsError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Clap surfaces these requests via specialised [`ErrorKind`] variants so
/// entry points can delegate to [`clap::Error::exit`] and preserve the
/// expected zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl CrumbsError {
    /// Returns `true` when this error wraps a help or version request.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        matches!(self, Self::CliParsing(err) if is_display_request(err))
    }
}
