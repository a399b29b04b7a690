//! Configuration files, loaded through figment.
//!
//! Each group is a table (section) of the file and each parameter a key in
//! it:
//!
//! ```toml
//! [default]
//! verbose = true
//!
//! [server]
//! port = 8080
//! ```
//!
//! Parameters of the default group may also be written at the top level.

mod parser;

use std::path::{Path, PathBuf};

use figment::Figment;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::SourceAdapter;
use crate::parameter::Declared;
use crate::value::RawValue;
use crate::{CrumbsError, CrumbsResult};

#[derive(Debug)]
struct LoadedFile {
    path: PathBuf,
    /// `None` when the file could not be read at load time.
    figment: Option<Figment>,
}

/// Registered configuration files, searched in registration order with the
/// last file that sets a key winning.
#[derive(Debug, Default)]
pub(crate) struct ConfigurationFiles {
    files: Vec<LoadedFile>,
}

/// Load `path`, returning `Ok(None)` when it cannot be read.
fn load(path: &Path) -> CrumbsResult<Option<Figment>> {
    if !path.is_file() {
        warn!(path = %path.display(), "could not read configuration file");
        return Ok(None);
    }
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read configuration file");
            return Ok(None);
        }
    };
    parser::parse_config_by_format(path, &data).map(Some)
}

impl ConfigurationFiles {
    /// Register and load `path`. Registering a path twice reloads it in
    /// place.
    pub(crate) fn add(&mut self, path: &Path) -> CrumbsResult<()> {
        debug!(path = %path.display(), "adding configuration file");
        let figment = load(path)?;
        if let Some(existing) = self.files.iter_mut().find(|file| file.path == path) {
            existing.figment = figment;
        } else {
            self.files.push(LoadedFile {
                path: path.to_path_buf(),
                figment,
            });
        }
        Ok(())
    }

    /// Re-read every registered file from disk.
    ///
    /// Either every file is replaced or, when one fails to parse, none is.
    pub(crate) fn reload(&mut self) -> CrumbsResult<()> {
        let reloaded = self
            .files
            .iter()
            .map(|file| {
                debug!(path = %file.path.display(), "re-reading configuration file");
                load(&file.path)
            })
            .collect::<CrumbsResult<Vec<_>>>()?;
        for (file, figment) in self.files.iter_mut().zip(reloaded) {
            file.figment = figment;
        }
        Ok(())
    }

    pub(crate) fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path.as_path())
    }
}

/// A key under which an entry may appear in a file.
struct Candidate {
    key: String,
    /// Top-level fallback for the default group; a table found here is a
    /// group section rather than a value.
    top_level: bool,
}

/// Keys under which `entry` may appear in a file.
fn candidate_keys(entry: &Declared) -> Vec<Candidate> {
    let group = &entry.parameter.group;
    let hyphenated = entry.name.replace('_', "-");
    let mut names = vec![entry.name.clone()];
    if hyphenated != entry.name {
        names.push(hyphenated);
    }
    let sectioned = names.iter().map(|name| Candidate {
        key: format!("{group}.{name}"),
        top_level: false,
    });
    let top_level = names
        .iter()
        .filter(|_| entry.in_default_group())
        .map(|name| Candidate {
            key: name.clone(),
            top_level: true,
        });
    sectioned.chain(top_level).collect()
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn to_raw(key: &str, value: Value) -> CrumbsResult<Option<RawValue>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(RawValue::List(
            items.into_iter().map(scalar_text).collect(),
        ))),
        Value::Object(_) => Err(CrumbsError::coercion(
            key,
            value.to_string(),
            "tables cannot be used as parameter values",
        )),
        scalar => Ok(Some(RawValue::Text(scalar_text(scalar)))),
    }
}

fn find_in(file: &LoadedFile, figment: &Figment, entry: &Declared) -> CrumbsResult<Option<Value>> {
    for Candidate { key, top_level } in candidate_keys(entry) {
        match figment.find_value(&key) {
            Ok(value) if top_level && value.as_dict().is_some() => {
                trace!(path = %file.path.display(), %key, "skipping group section");
            }
            Ok(value) => {
                trace!(path = %file.path.display(), %key, "found configuration value");
                return value
                    .deserialize::<Value>()
                    .map(Some)
                    .map_err(|err| CrumbsError::file(&file.path, err));
            }
            Err(err) if err.missing() => {}
            Err(err) => return Err(CrumbsError::file(&file.path, err)),
        }
    }
    Ok(None)
}

impl SourceAdapter for ConfigurationFiles {
    fn read(&self, entry: &Declared) -> CrumbsResult<Option<RawValue>> {
        for file in self.files.iter().rev() {
            let Some(figment) = &file.figment else {
                continue;
            };
            if let Some(value) = find_in(file, figment, entry)? {
                return to_raw(&entry.key, value);
            }
        }
        Ok(None)
    }
}
