//! Command-line actions and value counts.

use serde_json::Value;

use crate::ValueType;

/// What happens when a parameter's flag is encountered on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Action {
    /// Store the supplied value.
    #[default]
    Store,
    /// Store the parameter's [`constant`](crate::Parameter::constant).
    StoreConst,
    /// Store `true`; defaults to `false`.
    StoreTrue,
    /// Store `false`; defaults to `true`.
    StoreFalse,
    /// Collect every occurrence into a list; defaults to `[]`.
    Append,
    /// Count occurrences; defaults to `0`. The count saturates at 255.
    Count,
}

impl Action {
    /// Whether the flag consumes values from the command line.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(self, Self::Store | Self::Append)
    }

    pub(crate) fn implied_type(self) -> ValueType {
        match self {
            Self::StoreTrue | Self::StoreFalse => ValueType::Boolean,
            Self::Count => ValueType::Integer,
            Self::Store | Self::StoreConst | Self::Append => ValueType::String,
        }
    }

    pub(crate) fn implied_default(self) -> Value {
        match self {
            Self::StoreTrue => Value::Bool(false),
            Self::StoreFalse => Value::Bool(true),
            Self::Append => Value::Array(Vec::new()),
            Self::Count => Value::from(0),
            Self::Store | Self::StoreConst => Value::Null,
        }
    }
}

/// Number of command-line values a parameter consumes per occurrence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Nargs {
    /// Exactly one value.
    #[default]
    One,
    /// Exactly this many values.
    Exactly(usize),
    /// Any number of values, including none.
    ZeroOrMore,
    /// At least one value.
    OneOrMore,
}

impl Nargs {
    /// Whether the parameter resolves to a list.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        match self {
            Self::One => false,
            Self::Exactly(count) => count != 1,
            Self::ZeroOrMore | Self::OneOrMore => true,
        }
    }
}
