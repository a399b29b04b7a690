//! The parameter store.
//!
//! [`Parameters`] holds the declarations, one snapshot per source and a cache
//! of resolved values. Lookups consult the command line, then configuration
//! files, then the environment, and fall back to the declared default.

mod parse;
mod resolve;
mod settings;

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

pub use settings::ParametersBuilder;
pub(crate) use settings::Settings;

use crate::parameter::{DEFAULT_GROUP, Declared, Parameter};
use crate::resolution::Resolved;
use crate::sources::{ArgumentSnapshot, ConfigurationFiles, EnvironmentSnapshot};
use crate::{CrumbsError, CrumbsResult};

/// Parameters unified from command-line arguments, configuration files and
/// environment variables.
///
/// # Examples
///
/// ```
/// use crumbs::{Parameter, Parameters};
///
/// # fn main() -> crumbs::CrumbsResult<()> {
/// let mut parameters = Parameters::new("app");
/// parameters.add_parameter(Parameter::new(["--name", "-n"]).default("world"))?;
/// parameters.parse_from(["app", "--name", "crumbs"])?;
/// assert_eq!(parameters.resolve("name")?, "crumbs");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Parameters {
    settings: Settings,
    entries: Vec<Declared>,
    index: HashMap<String, usize>,
    groups: BTreeSet<String>,
    /// Command-line spellings in use, mapped to the key that owns them.
    spellings: HashMap<String, String>,
    /// Key of a positional that consumes a variable number of values.
    open_positional: Option<String>,
    arguments: ArgumentSnapshot,
    files: ConfigurationFiles,
    environment: EnvironmentSnapshot,
    parsed: bool,
    cache: RefCell<HashMap<String, Resolved>>,
}

impl Parameters {
    /// Creates a builder for a program called `program`.
    pub fn builder(program: impl Into<String>) -> ParametersBuilder {
        ParametersBuilder::new(program)
    }

    /// Creates an empty store with default settings.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::builder(program).build()
    }

    /// Creates an empty store named after the running executable.
    #[must_use]
    pub fn from_process() -> Self {
        let program = std::env::args_os()
            .next()
            .as_deref()
            .and_then(|argv0| Path::new(argv0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from(env!("CARGO_PKG_NAME")));
        Self::new(program)
    }

    pub(crate) fn with_settings(settings: Settings) -> Self {
        debug!(program = %settings.program, "initialising parameters");
        let mut spellings = HashMap::new();
        for reserved in ["--help", "-h"] {
            spellings.insert(String::from(reserved), String::from("help"));
        }
        if settings.version.is_some() {
            for reserved in ["--version", "-V"] {
                spellings.insert(String::from(reserved), String::from("version"));
            }
        }
        Self {
            settings,
            entries: Vec::new(),
            index: HashMap::new(),
            groups: BTreeSet::from([String::from(DEFAULT_GROUP)]),
            spellings,
            open_positional: None,
            arguments: ArgumentSnapshot::default(),
            files: ConfigurationFiles::default(),
            environment: EnvironmentSnapshot::default(),
            parsed: false,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Program name used for the command and the default environment prefix.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.settings.program
    }

    /// Register `parameter`.
    ///
    /// Registering after a full [`parse`](Self::parse) is allowed but the new
    /// parameter is not read from the command line until the next parse.
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::DuplicateParameter`] if the qualified name is
    /// taken and [`CrumbsError::InvalidParameter`] if the declaration is
    /// malformed or one of its flags is already in use.
    pub fn add_parameter(&mut self, parameter: Parameter) -> CrumbsResult<()> {
        let entry = Declared::new(parameter, &self.settings)?;
        debug!(key = %entry.key, "adding parameter");
        if self.index.contains_key(&entry.key) {
            return Err(CrumbsError::duplicate(entry.key));
        }
        if self.parsed {
            warn!(key = %entry.key, "adding parameter after parse");
        }
        self.claim_spellings(&entry)?;

        self.groups.insert(entry.parameter.group.clone());
        self.index.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Register `parameter` under `name`, overriding any name derived from
    /// its options.
    ///
    /// # Errors
    ///
    /// See [`add_parameter`](Self::add_parameter).
    pub fn register(&mut self, name: &str, parameter: Parameter) -> CrumbsResult<()> {
        self.add_parameter(parameter.dest(name))
    }

    fn claim_spellings(&mut self, entry: &Declared) -> CrumbsResult<()> {
        let Some(flags) = &entry.flags else {
            return Ok(());
        };
        let spellings = flags.spellings();
        let mut seen = HashSet::new();
        if let Some(repeated) = spellings.iter().find(|s| !seen.insert(s.as_str())) {
            return Err(CrumbsError::invalid(
                &entry.key,
                format!("option '{repeated}' is given more than once"),
            ));
        }
        if let Some((spelling, owner)) = spellings
            .iter()
            .find_map(|s| self.spellings.get(s).map(|owner| (s, owner)))
        {
            return Err(CrumbsError::invalid(
                &entry.key,
                format!("option '{spelling}' is already used by '{owner}'"),
            ));
        }
        if flags.positional {
            if let Some(open) = &self.open_positional {
                return Err(CrumbsError::invalid(
                    &entry.key,
                    format!("positional argument follows '{open}', which takes a variable number of values"),
                ));
            }
            if entry.parameter.is_multiple() {
                self.open_positional = Some(entry.key.clone());
            }
        }
        for spelling in spellings {
            self.spellings.insert(spelling, entry.key.clone());
        }
        Ok(())
    }

    /// Whether `name` resolves to a registered parameter.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Qualified names (`group.name`) of every parameter in registration
    /// order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Known groups, including `default`.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    /// Whether a full parse has completed.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Find the entry for a user-supplied name.
    ///
    /// `-` and `_` are interchangeable and a name that is not a qualified
    /// key is retried in the default group.
    fn lookup(&self, name: &str) -> CrumbsResult<&Declared> {
        let normalised = name.replace('-', "_");
        self.index
            .get(&normalised)
            .or_else(|| self.index.get(&format!("{DEFAULT_GROUP}.{normalised}")))
            .and_then(|&position| self.entries.get(position))
            .ok_or_else(|| CrumbsError::unknown(name))
    }
}

#[cfg(test)]
mod tests;
