//! Test helpers shared by the crates of the crumbs workspace.
//!
//! - [`env`] mutates process environment variables behind RAII guards.
//! - [`files`] writes configuration files into temporary directories.
//! - [`jail`] runs a closure inside a `figment::Jail`.

pub mod env;
pub mod files;
pub mod jail;
