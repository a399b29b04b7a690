//! Conversion of raw source values into resolved values.

use serde_json::Value;

use super::{RawValue, ValueType, split_list};
use crate::{CrumbsError, CrumbsResult};

fn convert_one(key: &str, ty: &ValueType, raw: &str) -> CrumbsResult<Value> {
    ty.convert(raw)
        .map_err(|message| CrumbsError::coercion(key, raw, message))
}

fn convert_all(key: &str, ty: &ValueType, items: &[String]) -> CrumbsResult<Value> {
    items
        .iter()
        .map(|item| convert_one(key, ty, item))
        .collect::<CrumbsResult<Vec<_>>>()
        .map(Value::Array)
}

/// Coerce `raw` for the parameter stored under `key`.
///
/// List parameters always resolve to an array; text is split with
/// [`split_list`]. Scalar parameters accept a one-element list so that a
/// single repeated flag or a one-item file array still resolves.
pub(crate) fn coerce(
    key: &str,
    ty: &ValueType,
    multiple: bool,
    raw: RawValue,
) -> CrumbsResult<Value> {
    match raw {
        RawValue::Typed(value) => Ok(value),
        RawValue::Text(text) if multiple => {
            let items =
                split_list(&text).map_err(|message| CrumbsError::coercion(key, &text, message))?;
            convert_all(key, ty, &items)
        }
        RawValue::Text(text) => convert_one(key, ty, &text),
        RawValue::List(items) if multiple => convert_all(key, ty, &items),
        RawValue::List(items) => match items.as_slice() {
            [single] => convert_one(key, ty, single),
            _ => Err(CrumbsError::coercion(
                key,
                items.join(","),
                format!("expected a single {} value, found {}", ty.name(), items.len()),
            )),
        },
    }
}
