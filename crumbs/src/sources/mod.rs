//! Source adapters consulted during resolution.
//!
//! Each adapter owns a snapshot of one source and answers a single question:
//! did the user explicitly supply a value for this parameter? Resolution walks
//! the adapters in precedence order and takes the first answer.

mod cli;
mod env;
mod file;

pub(crate) use cli::{ArgumentSnapshot, build_command};
pub(crate) use env::EnvironmentSnapshot;
pub(crate) use file::ConfigurationFiles;

use crate::CrumbsResult;
use crate::parameter::Declared;
use crate::value::RawValue;

/// Uniform read contract shared by the argument, file and environment
/// snapshots.
pub(crate) trait SourceAdapter {
    /// Raw value explicitly supplied for `entry`, if any.
    fn read(&self, entry: &Declared) -> CrumbsResult<Option<RawValue>>;
}
