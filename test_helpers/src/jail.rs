//! `figment::Jail` adapted to `anyhow`.

use anyhow::{Result, anyhow};
use figment::Jail;

/// Run `f` inside a [`Jail`], which gives it a fresh working directory and
/// restores the environment afterwards.
///
/// # Errors
///
/// Returns the closure's error, or an error if the jail cannot be set up.
///
/// # Examples
///
/// ```
/// use test_helpers::jail::with_jail;
///
/// # fn main() -> anyhow::Result<()> {
/// let port = with_jail(|jail| {
///     jail.set_env("CRUMBS_JAIL_PORT", "8080");
///     Ok(std::env::var("CRUMBS_JAIL_PORT")?)
/// })?;
/// assert_eq!(port, "8080");
/// # Ok(())
/// # }
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> Result<T>,
{
    let mut output = None;
    Jail::try_with(|jail| {
        output = Some(f(jail).map_err(|err| figment::Error::from(format!("{err:#}")))?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}
