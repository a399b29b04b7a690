//! Process environment, captured once per parse.

mod expand;

use std::collections::BTreeMap;

use figment::providers::Env;
use tracing::trace;
use uncased::{Uncased, UncasedStr};

use super::SourceAdapter;
use crate::CrumbsResult;
use crate::parameter::Declared;
use crate::value::RawValue;

pub(crate) use expand::expand;

/// Snapshot of the environment; names compare case-insensitively.
#[derive(Debug, Default)]
pub(crate) struct EnvironmentSnapshot {
    vars: BTreeMap<Uncased<'static>, String>,
}

impl EnvironmentSnapshot {
    /// Capture the current process environment.
    pub(crate) fn capture() -> Self {
        Self {
            vars: Env::raw().iter().collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (Uncased::from(k.into()), v.into()))
                .collect(),
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(UncasedStr::new(name)).map(String::as_str)
    }
}

impl SourceAdapter for EnvironmentSnapshot {
    fn read(&self, entry: &Declared) -> CrumbsResult<Option<RawValue>> {
        let Some(name) = entry.env_var.as_deref() else {
            return Ok(None);
        };
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        trace!(%name, %value, "found environment value");
        let expanded = expand(value, |var| self.get(var));
        Ok(Some(RawValue::Text(expanded.into_owned())))
    }
}
