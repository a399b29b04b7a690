//! Command-line arguments, parsed with a `clap::Command` generated from the
//! registered declarations.

mod command;
mod known;

use std::collections::HashMap;
use std::ffi::OsString;

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde_json::Value;
use tracing::{debug, trace};

pub(crate) use command::build_command;

use super::SourceAdapter;
use crate::parameter::{Action, Declared};
use crate::parameters::Settings;
use crate::value::RawValue;
use crate::{CrumbsError, CrumbsResult};

/// Values the user explicitly typed on the command line, keyed by
/// qualified parameter key.
#[derive(Debug, Default)]
pub(crate) struct ArgumentSnapshot {
    values: HashMap<String, RawValue>,
}

impl ArgumentSnapshot {
    /// Parse `args` (including the program name) against `entries`.
    ///
    /// With `only_known` set, help flags and unrecognised arguments are
    /// dropped and any remaining parse error is ignored.
    pub(crate) fn parse<I, T>(
        settings: &Settings,
        entries: &[Declared],
        args: I,
        only_known: bool,
    ) -> CrumbsResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        debug!(?args, only_known, "parsing command-line arguments");
        let command = build_command(settings, entries);
        let matches = if only_known {
            let filtered = known::retain_known(args, entries);
            command.ignore_errors(true).try_get_matches_from(filtered)?
        } else {
            command.try_get_matches_from(args)?
        };

        let mut values = HashMap::new();
        for entry in entries.iter().filter(|entry| entry.flags.is_some()) {
            if let Some(raw) = capture(&matches, entry)? {
                trace!(key = %entry.key, ?raw, "captured argument");
                values.insert(entry.key.clone(), raw);
            }
        }
        Ok(Self { values })
    }
}

fn capture(matches: &ArgMatches, entry: &Declared) -> CrumbsResult<Option<RawValue>> {
    let id = entry.key.as_str();
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return Ok(None);
    }
    let matches_error = |err: clap::parser::MatchesError| CrumbsError::invalid(id, err.to_string());
    let parameter = &entry.parameter;
    let raw = match parameter.action {
        Action::StoreTrue => RawValue::Typed(Value::Bool(true)),
        Action::StoreFalse => RawValue::Typed(Value::Bool(false)),
        Action::StoreConst => RawValue::Typed(parameter.constant.clone().unwrap_or(Value::Null)),
        Action::Count => {
            let count = matches
                .try_get_one::<u8>(id)
                .map_err(matches_error)?
                .copied()
                .unwrap_or_default();
            RawValue::Typed(Value::from(count))
        }
        Action::Store | Action::Append => {
            let mut values: Vec<String> = matches
                .try_get_raw(id)
                .map_err(matches_error)?
                .into_iter()
                .flatten()
                .map(|value| value.to_string_lossy().into_owned())
                .collect();
            if parameter.is_multiple() {
                RawValue::List(values)
            } else {
                match values.pop() {
                    Some(value) => RawValue::Text(value),
                    None => return Ok(None),
                }
            }
        }
    };
    Ok(Some(raw))
}

impl SourceAdapter for ArgumentSnapshot {
    fn read(&self, entry: &Declared) -> CrumbsResult<Option<RawValue>> {
        Ok(self.values.get(&entry.key).cloned())
    }
}
