//! Trait-based conversions between external error types and `CrumbsError`.

use super::CrumbsError;

impl From<clap::Error> for CrumbsError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}
