//! Error types produced while declaring, parsing and resolving parameters.

mod constructors;
mod conversions;
mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{CrumbsError, CrumbsResult};
