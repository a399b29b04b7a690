//! Resolved values and where they came from.

use serde_json::Value;

use crate::Source;

/// Source a resolved value was taken from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Provenance {
    /// Supplied on the command line.
    Argument,
    /// Read from a configuration file.
    Configuration,
    /// Read from an environment variable.
    Environment,
    /// No source supplied a value; the declared default was used.
    Default,
}

impl From<Source> for Provenance {
    fn from(source: Source) -> Self {
        match source {
            Source::Argument => Self::Argument,
            Source::Configuration => Self::Configuration,
            Source::Environment => Self::Environment,
        }
    }
}

/// A coerced value together with its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Value after type coercion.
    pub value: Value,
    /// Source the value came from.
    pub provenance: Provenance,
}
