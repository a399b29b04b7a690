//! Parameter declarations.
//!
//! A [`Parameter`] describes how one configuration value is spelled on the
//! command line, which group (configuration file section) it belongs to, how
//! its raw text is typed and what it falls back to. Declarations are plain
//! builders; they are validated and turned into stored entries when handed
//! to [`Parameters::add_parameter`](crate::Parameters::add_parameter).

mod action;
mod declared;
mod flags;

use serde_json::Value;

pub use action::{Action, Nargs};
pub(crate) use declared::Declared;
pub(crate) use flags::CliFlags;

use crate::ValueType;

/// Group used when a declaration does not name one.
pub const DEFAULT_GROUP: &str = "default";

/// One of the places a parameter value can come from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    /// Command-line arguments.
    Argument,
    /// Configuration files.
    Configuration,
    /// Process environment variables.
    Environment,
}

impl Source {
    /// Every source in precedence order, highest first.
    pub const ALL: [Self; 3] = [Self::Argument, Self::Configuration, Self::Environment];
}

/// How the environment variable name of a parameter is prefixed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum EnvPrefix {
    /// Prefix with the program name, e.g. `MYAPP_PORT`.
    #[default]
    Program,
    /// Prefix with a custom string, e.g. `CUSTOM_PORT`.
    Custom(String),
    /// No prefix, e.g. `PORT`.
    None,
}

/// Declaration of a single parameter.
///
/// # Examples
///
/// ```
/// use crumbs::{Parameter, ValueType};
///
/// let port = Parameter::new(["--port", "-p"])
///     .group("server")
///     .value_type(ValueType::Integer)
///     .default(8080)
///     .help("port to listen on");
/// assert_eq!(port.local_name().as_deref(), Some("port"));
/// ```
#[derive(Clone, Debug)]
pub struct Parameter {
    pub(crate) options: Vec<String>,
    pub(crate) dest: Option<String>,
    pub(crate) group: String,
    pub(crate) action: Action,
    pub(crate) nargs: Nargs,
    pub(crate) value_type: Option<ValueType>,
    pub(crate) default: Option<Value>,
    pub(crate) constant: Option<Value>,
    pub(crate) help: Option<String>,
    pub(crate) only: Option<Vec<Source>>,
    pub(crate) env_prefix: Option<EnvPrefix>,
    pub(crate) env_var: Option<String>,
}

impl Parameter {
    /// Declare a parameter spelled by `options` on the command line.
    ///
    /// Options starting with `--` are long flags, `-x` are short flags and a
    /// single option without dashes declares a positional argument. The
    /// longest option names the parameter unless [`Parameter::dest`] is set.
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            dest: None,
            group: String::from(DEFAULT_GROUP),
            action: Action::default(),
            nargs: Nargs::default(),
            value_type: None,
            default: None,
            constant: None,
            help: None,
            only: None,
            env_prefix: None,
            env_var: None,
        }
    }

    /// Name the parameter explicitly instead of deriving it from the options.
    #[must_use]
    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    /// Place the parameter in `group`.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set what happens when the flag is encountered on the command line.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Set how many command-line values the parameter consumes.
    #[must_use]
    pub fn nargs(mut self, nargs: Nargs) -> Self {
        self.nargs = nargs;
        self
    }

    /// Set the type raw text is converted to.
    #[must_use]
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Value used when no source supplies one.
    ///
    /// String defaults are coerced with the declared type like any raw
    /// value; other defaults are returned unchanged.
    #[must_use]
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Constant stored by [`Action::StoreConst`].
    #[must_use]
    pub fn constant(mut self, constant: impl Into<Value>) -> Self {
        self.constant = Some(constant.into());
        self
    }

    /// Help text shown in `--help` output.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Restrict the sources the parameter is read from.
    #[must_use]
    pub fn only<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = Source>,
    {
        self.only = Some(sources.into_iter().collect());
        self
    }

    /// Override the store-wide environment variable prefix.
    #[must_use]
    pub fn env_prefix(mut self, prefix: EnvPrefix) -> Self {
        self.env_prefix = Some(prefix);
        self
    }

    /// Read the parameter from exactly this environment variable.
    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    /// Name the parameter is registered under within its group.
    ///
    /// This is `dest` when given, otherwise the longest option (the first
    /// one on ties) without its leading dashes. Hyphens become underscores. Returns `None` when
    /// neither yields a name.
    #[must_use]
    pub fn local_name(&self) -> Option<String> {
        let raw = match &self.dest {
            Some(dest) => dest.as_str(),
            None => self
                .options
                .iter()
                .rev()
                .max_by_key(|option| option.len())
                .map(|option| option.trim_start_matches('-'))?,
        };
        (!raw.is_empty()).then(|| raw.replace('-', "_"))
    }

    /// Whether `source` may supply a value for this parameter.
    #[must_use]
    pub fn reads_from(&self, source: Source) -> bool {
        self.only
            .as_ref()
            .is_none_or(|sources| sources.contains(&source))
    }

    /// Whether the parameter resolves to a list.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        matches!(self.action, Action::Append) || self.nargs.is_multiple()
    }

    /// Declared type, falling back to the action's natural type.
    #[must_use]
    pub fn effective_type(&self) -> ValueType {
        self.value_type
            .clone()
            .unwrap_or_else(|| self.action.implied_type())
    }

    /// Declared default, falling back to the action's implicit default.
    /// List parameters without a default resolve to an empty list.
    #[must_use]
    pub fn effective_default(&self) -> Value {
        match &self.default {
            Some(default) => default.clone(),
            None if self.is_multiple() => Value::Array(Vec::new()),
            None => self.action.implied_default(),
        }
    }
}
