//! Unified parameters from command-line arguments, configuration files and
//! environment variables.
//!
//! Declare each parameter once with [`Parameter`], register it with a
//! [`Parameters`] store, point the store at configuration files and parse.
//! Every lookup then applies a fixed precedence:
//!
//! 1. a value typed on the command line,
//! 2. a value in a configuration file (the last file that sets it wins),
//! 3. an environment variable (`PROGRAM_GROUP_NAME`),
//! 4. the declared default.
//!
//! ```
//! use crumbs::{EnvPrefix, Parameter, Parameters, Provenance, ValueType};
//!
//! # fn main() -> crumbs::CrumbsResult<()> {
//! let mut parameters = Parameters::builder("app")
//!     .env_prefix(EnvPrefix::None)
//!     .build();
//! parameters.add_parameter(
//!     Parameter::new(["--port", "-p"])
//!         .group("server")
//!         .value_type(ValueType::Integer)
//!         .default(8080)
//!         .help("port to listen on"),
//! )?;
//! parameters.parse_from(["app", "--server-port", "9000"])?;
//!
//! let port = parameters.resolve_with_provenance("server.port")?;
//! assert_eq!(port.value, 9000);
//! assert_eq!(port.provenance, Provenance::Argument);
//! # Ok(())
//! # }
//! ```

mod error;
mod parameter;
mod parameters;
mod resolution;
mod sources;
mod value;

pub use error::{CrumbsError, CrumbsResult, is_display_request};
pub use parameter::{Action, DEFAULT_GROUP, EnvPrefix, Nargs, Parameter, Source};
pub use parameters::{Parameters, ParametersBuilder};
pub use resolution::{Provenance, Resolved};
pub use serde_json::Value;
pub use value::{CoerceFn, Coercer, ValueType};
