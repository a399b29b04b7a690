//! Precedence resolution and the value cache.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::Parameters;
use crate::parameter::{Declared, Source};
use crate::resolution::{Provenance, Resolved};
use crate::sources::SourceAdapter;
use crate::value::{RawValue, coerce};
use crate::{CrumbsError, CrumbsResult};

impl Parameters {
    /// Resolve `name` to its value.
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::UnknownParameter`] for unregistered names and
    /// [`CrumbsError::Coercion`] when the winning raw value does not convert
    /// to the declared type.
    pub fn resolve(&self, name: &str) -> CrumbsResult<Value> {
        self.resolve_with_provenance(name)
            .map(|resolved| resolved.value)
    }

    /// Resolve `name` and report which source supplied the value.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_with_provenance(&self, name: &str) -> CrumbsResult<Resolved> {
        let entry = self.lookup(name)?;
        if let Some(cached) = self.cache.borrow().get(&entry.key) {
            return Ok(cached.clone());
        }
        if !self.parsed {
            warn!(key = %entry.key, "retrieving value from unparsed parameters");
        }
        let resolved = self.resolve_entry(entry)?;
        self.cache
            .borrow_mut()
            .insert(entry.key.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Resolve `name` and deserialise the value into `T`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`resolve`](Self::resolve) and
    /// [`CrumbsError::Extraction`] when the value does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbs::{Parameter, Parameters, ValueType};
    ///
    /// # fn main() -> crumbs::CrumbsResult<()> {
    /// let mut parameters = Parameters::new("app");
    /// parameters.add_parameter(
    ///     Parameter::new(["--port"]).value_type(ValueType::Integer).default("8080"),
    /// )?;
    /// parameters.parse_from(["app"])?;
    /// let port: u16 = parameters.get("port")?;
    /// assert_eq!(port, 8080);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> CrumbsResult<T> {
        let entry = self.lookup(name)?;
        let value = self.resolve_with_provenance(name)?.value;
        serde_json::from_value(value).map_err(|source| CrumbsError::Extraction {
            name: entry.key.clone(),
            source,
        })
    }

    /// Forget every cached resolution.
    pub fn reset(&self) {
        self.cache.borrow_mut().clear();
    }

    fn adapter(&self, source: Source) -> &dyn SourceAdapter {
        match source {
            Source::Argument => &self.arguments,
            Source::Configuration => &self.files,
            Source::Environment => &self.environment,
        }
    }

    fn resolve_entry(&self, entry: &Declared) -> CrumbsResult<Resolved> {
        let parameter = &entry.parameter;
        let value_type = parameter.effective_type();
        let multiple = parameter.is_multiple();
        for source in Source::ALL {
            if !parameter.reads_from(source) {
                continue;
            }
            if let Some(raw) = self.adapter(source).read(entry)? {
                debug!(key = %entry.key, ?source, "resolved from source");
                let value = coerce(&entry.key, &value_type, multiple, raw)?;
                return Ok(Resolved {
                    value,
                    provenance: Provenance::from(source),
                });
            }
        }

        debug!(key = %entry.key, "resolved from default");
        let value = match parameter.effective_default() {
            Value::String(text) => coerce(&entry.key, &value_type, multiple, RawValue::Text(text))?,
            other => other,
        };
        Ok(Resolved {
            value,
            provenance: Provenance::Default,
        })
    }
}
