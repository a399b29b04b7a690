//! Format-specific parsing utilities for configuration files.

use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Toml},
};
#[cfg(feature = "json5")]
use figment_json5::Json5;

use crate::{CrumbsError, CrumbsResult};

/// Parse configuration data according to the file extension.
///
/// `.json` and `.json5` files need the `json5` feature; everything else is
/// read as TOML.
///
/// # Errors
///
/// Returns a [`CrumbsError::File`] if the contents fail to parse or if the
/// required feature is disabled.
pub(super) fn parse_config_by_format(path: &Path, data: &str) -> CrumbsResult<Figment> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json" | "json5") => {
            #[cfg(feature = "json5")]
            {
                json5::from_str::<serde_json::Value>(data)
                    .map_err(|e| CrumbsError::file(path, e))?;
                Figment::from(Json5::string(data))
            }
            #[cfg(not(feature = "json5"))]
            {
                return Err(CrumbsError::file(
                    path,
                    std::io::Error::other(
                        "json5 feature disabled: enable the 'json5' feature to support this file format",
                    ),
                ));
            }
        }
        _ => {
            // Validate first so parse failures carry this file's path.
            toml::from_str::<toml::Value>(data).map_err(|e| CrumbsError::file(path, e))?;
            Figment::from(Toml::string(data))
        }
    };

    Ok(figment)
}
