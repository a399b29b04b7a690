//! Declared value types and the coercion of raw source values.
//!
//! Every source hands back a [`RawValue`]: command-line arguments and
//! environment variables are text, configuration files may carry lists, and
//! `store_const` flags carry an already-typed constant. [`ValueType`] turns
//! text into a [`serde_json::Value`] so every parameter resolves to the same
//! representation regardless of where it was found.

mod coerce;
mod list;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub(crate) use coerce::coerce;
pub(crate) use list::split_list;

/// Signature of a user-supplied coercion function.
pub type CoerceFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;

/// Named coercion function used by [`ValueType::Custom`].
#[derive(Clone)]
pub struct Coercer {
    name: String,
    func: Arc<CoerceFn>,
}

impl Coercer {
    /// Wrap `func` under `name`, which is reported in diagnostics.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbs::Coercer;
    /// let upper = Coercer::new("upper", |raw| Ok(raw.to_uppercase().into()));
    /// assert_eq!(upper.name(), "upper");
    /// ```
    #[must_use]
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, raw: &str) -> Result<Value, String> {
        (self.func)(raw)
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Type a parameter's raw text is converted to on resolution.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub enum ValueType {
    /// Keep the text as a string.
    #[default]
    String,
    /// Signed or unsigned 64-bit integer.
    Integer,
    /// Finite 64-bit float.
    Float,
    /// `true`/`false`, `yes`/`no`, `on`/`off` or `1`/`0`, case-insensitive.
    Boolean,
    /// User-supplied conversion.
    Custom(Coercer),
}

impl ValueType {
    /// Convenience constructor for [`ValueType::Custom`].
    #[must_use]
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::Custom(Coercer::new(name, func))
    }

    /// Convert a single piece of raw text.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when `raw` is not a valid
    /// representation of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbs::ValueType;
    /// assert_eq!(ValueType::Integer.convert(" 15 "), Ok(15.into()));
    /// assert!(ValueType::Boolean.convert("maybe").is_err());
    /// ```
    pub fn convert(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::String => Ok(Value::String(raw.to_owned())),
            Self::Integer => parse_integer(raw.trim()),
            Self::Float => parse_float(raw.trim()),
            Self::Boolean => parse_boolean(raw.trim()),
            Self::Custom(coercer) => coercer.apply(raw),
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Custom(coercer) => coercer.name(),
        }
    }
}

fn parse_integer(raw: &str) -> Result<Value, String> {
    if let Ok(signed) = raw.parse::<i64>() {
        return Ok(signed.into());
    }
    raw.parse::<u64>()
        .map(Value::from)
        .map_err(|err| err.to_string())
}

fn parse_float(raw: &str) -> Result<Value, String> {
    let parsed = raw.parse::<f64>().map_err(|err| err.to_string())?;
    serde_json::Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| String::from("value is not a finite number"))
}

fn parse_boolean(raw: &str) -> Result<Value, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(Value::Bool(true)),
        "0" | "no" | "false" | "off" => Ok(Value::Bool(false)),
        _ => Err(String::from("expected one of true/false, yes/no, on/off, 1/0")),
    }
}

/// Value handed back by a source adapter before coercion.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RawValue {
    /// Single piece of text.
    Text(String),
    /// Several pieces of text, such as repeated flags or a file array.
    List(Vec<String>),
    /// Already-typed value that bypasses coercion.
    Typed(Value),
}
