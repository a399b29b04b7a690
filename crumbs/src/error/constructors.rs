//! Constructors for the structured `CrumbsError` variants.

use std::error::Error;
use std::path::Path;

use super::CrumbsError;

impl CrumbsError {
    /// Construct an [`CrumbsError::UnknownParameter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbs::CrumbsError;
    /// let e = CrumbsError::unknown("foo");
    /// assert_eq!(e.to_string(), "unknown parameter 'foo'");
    /// ```
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    /// Construct a [`CrumbsError::DuplicateParameter`].
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateParameter { name: name.into() }
    }

    /// Construct a [`CrumbsError::Coercion`].
    #[must_use]
    pub fn coercion(
        name: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            name: name.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Construct a [`CrumbsError::InvalidParameter`].
    #[must_use]
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Construct a [`CrumbsError::File`] for a configuration path.
    #[must_use]
    pub fn file(path: &Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }
}
