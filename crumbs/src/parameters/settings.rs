//! Store-wide settings and the builder that produces a `Parameters`.

use crate::parameter::EnvPrefix;

use super::Parameters;

/// Settings shared by every declaration of a store.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    /// Program name, used for the command and the default env prefix.
    pub(crate) program: String,
    pub(crate) about: Option<String>,
    pub(crate) version: Option<String>,
    /// Prefix the long flags of non-default groups with the group name.
    pub(crate) group_prefix: bool,
    pub(crate) env_prefix: EnvPrefix,
}

impl Settings {
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            version: None,
            group_prefix: true,
            env_prefix: EnvPrefix::Program,
        }
    }
}

/// Builder for [`Parameters`].
///
/// # Examples
///
/// ```
/// use crumbs::{EnvPrefix, Parameters};
///
/// let parameters = Parameters::builder("pmort")
///     .about("post-mortem collector")
///     .version("1.0.0")
///     .group_prefix(false)
///     .env_prefix(EnvPrefix::Custom(String::from("PM")))
///     .build();
/// assert_eq!(parameters.program(), "pmort");
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct ParametersBuilder {
    settings: Settings,
}

impl ParametersBuilder {
    /// Creates a builder for a program called `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            settings: Settings::new(program),
        }
    }

    /// Description shown at the top of `--help`.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.settings.about = Some(about.into());
        self
    }

    /// Version reported by `--version`; enables the `-V/--version` flag.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.settings.version = Some(version.into());
        self
    }

    /// Whether long flags of non-default groups are prefixed with the group
    /// name (`--server-port`). Enabled by default.
    pub fn group_prefix(mut self, enabled: bool) -> Self {
        self.settings.group_prefix = enabled;
        self
    }

    /// Environment prefix for declarations that do not set their own.
    pub fn env_prefix(mut self, prefix: EnvPrefix) -> Self {
        self.settings.env_prefix = prefix;
        self
    }

    /// Produce the empty store.
    pub fn build(self) -> Parameters {
        Parameters::with_settings(self.settings)
    }
}
