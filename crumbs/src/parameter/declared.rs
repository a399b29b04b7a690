//! Validated parameter entries as stored by `Parameters`.

use crate::parameters::Settings;
use crate::{CrumbsError, CrumbsResult};

use super::{Action, CliFlags, DEFAULT_GROUP, EnvPrefix, Nargs, Parameter, Source};

/// A registered parameter together with everything derived from it.
#[derive(Clone, Debug)]
pub(crate) struct Declared {
    /// Qualified key, `group.name`.
    pub(crate) key: String,
    /// Name within the group.
    pub(crate) name: String,
    pub(crate) parameter: Parameter,
    /// Command-line spellings; `None` when not read from arguments.
    pub(crate) flags: Option<CliFlags>,
    /// Environment variable; `None` when not read from the environment.
    pub(crate) env_var: Option<String>,
}

impl Declared {
    pub(crate) fn new(parameter: Parameter, settings: &Settings) -> CrumbsResult<Self> {
        let label = parameter
            .dest
            .clone()
            .or_else(|| parameter.options.first().cloned())
            .unwrap_or_else(|| String::from("<unnamed>"));
        let name = parameter
            .local_name()
            .ok_or_else(|| CrumbsError::invalid(&label, "cannot derive a parameter name"))?;
        validate(&label, &parameter)?;

        let flags = if parameter.reads_from(Source::Argument) {
            let flags = CliFlags::derive(
                &name,
                &parameter.options,
                &parameter.group,
                settings.group_prefix,
            )?;
            if flags.positional && !parameter.action.takes_value() {
                return Err(CrumbsError::invalid(
                    &label,
                    format!("a positional argument cannot use {:?}", parameter.action),
                ));
            }
            Some(flags)
        } else {
            None
        };

        let env_var = parameter.reads_from(Source::Environment).then(|| {
            parameter.env_var.clone().unwrap_or_else(|| {
                let prefix = parameter.env_prefix.as_ref().unwrap_or(&settings.env_prefix);
                env_var_name(&settings.program, prefix, &parameter.group, &name)
            })
        });

        Ok(Self {
            key: format!("{}.{name}", parameter.group.replace('-', "_")),
            name,
            parameter,
            flags,
            env_var,
        })
    }

    /// Whether the entry belongs to the default group.
    pub(crate) fn in_default_group(&self) -> bool {
        self.parameter.group == DEFAULT_GROUP
    }
}

fn validate(label: &str, parameter: &Parameter) -> CrumbsResult<()> {
    if parameter.group.is_empty() || parameter.group.contains('.') {
        return Err(CrumbsError::invalid(
            label,
            format!("invalid group name '{}'", parameter.group),
        ));
    }
    if parameter.nargs == Nargs::Exactly(0) {
        return Err(CrumbsError::invalid(label, "nargs must be at least one"));
    }
    if parameter.action == Action::StoreConst && parameter.constant.is_none() {
        return Err(CrumbsError::invalid(label, "store_const requires a constant"));
    }
    if !parameter.action.takes_value() && parameter.nargs != Nargs::One {
        return Err(CrumbsError::invalid(
            label,
            format!("{:?} does not accept nargs", parameter.action),
        ));
    }
    Ok(())
}

/// Environment variable name for a parameter.
///
/// Parts are joined with `_` and upper-cased; the default group is omitted.
pub(crate) fn env_var_name(program: &str, prefix: &EnvPrefix, group: &str, name: &str) -> String {
    let prefix = match prefix {
        EnvPrefix::Program => Some(program),
        EnvPrefix::Custom(custom) => Some(custom.as_str()),
        EnvPrefix::None => None,
    };
    let group = (group != DEFAULT_GROUP).then_some(group);
    prefix
        .into_iter()
        .chain(group)
        .chain(std::iter::once(name))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .replace(['-', '.', ' '], "_")
        .to_uppercase()
}
