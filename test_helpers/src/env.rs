//! Guards for mutating process environment variables in tests.
//!
//! Every mutation holds a global re-entrant lock and returns a guard that
//! restores the prior state on drop. Guards restore in reverse creation
//! order, so stacking several guards for one key is safe.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _guard = env::set_var("CRUMBS_EXAMPLE", "value");
//! assert_eq!(std::env::var("CRUMBS_EXAMPLE").as_deref(), Ok("value"));
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        match self.original.take() {
            // SAFETY: mutations are serialised by `ENV_LOCK`.
            Some(value) => unsafe { std::env::set_var(&self.key, value) },
            // SAFETY: mutations are serialised by `ENV_LOCK`.
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

fn mutate(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _lock = ENV_LOCK.lock();
    let original = std::env::var_os(&key);
    match value {
        // SAFETY: mutations are serialised by `ENV_LOCK`.
        Some(value) => unsafe { std::env::set_var(&key, value) },
        // SAFETY: mutations are serialised by `ENV_LOCK`.
        None => unsafe { std::env::remove_var(&key) },
    }
    EnvVarGuard { key, original }
}

/// Set `key` to `value` until the guard is dropped.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Some(value.as_ref()))
}

/// Remove `key` until the guard is dropped.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    mutate(key.into(), None)
}

/// Holds the environment lock together with a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping restores the variables and releases the lock"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl EnvScope {
    /// Set `key` to `value` for the lifetime of the scope.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        self.guards.push(set_var(key, value));
        self
    }

    /// Remove `key` for the lifetime of the scope.
    pub fn remove<K: Into<String>>(&mut self, key: K) -> &mut Self {
        self.guards.push(remove_var(key));
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Lock the environment and remove every variable whose name starts with
/// `prefix` (compared case-insensitively).
///
/// Useful for isolating a test from variables such as `CRUMBS_*` that the
/// surrounding shell may define.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let mut scope = env::isolate("CRUMBS_DOC_");
/// scope.set("CRUMBS_DOC_PORT", "8080");
/// assert_eq!(std::env::var("CRUMBS_DOC_PORT").as_deref(), Ok("8080"));
/// ```
pub fn isolate(prefix: &str) -> EnvScope {
    let lock = ENV_LOCK.lock();
    let prefix = prefix.to_ascii_uppercase();
    let guards = std::env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.to_ascii_uppercase().starts_with(&prefix))
        .map(remove_var)
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_restore_prior_values() {
        let _scope = isolate("CRUMBS_HELPERS_GUARD");
        {
            let _outer = set_var("CRUMBS_HELPERS_GUARD", "outer");
            {
                let _inner = set_var("CRUMBS_HELPERS_GUARD", "inner");
                assert_eq!(std::env::var("CRUMBS_HELPERS_GUARD").as_deref(), Ok("inner"));
            }
            assert_eq!(std::env::var("CRUMBS_HELPERS_GUARD").as_deref(), Ok("outer"));
        }
        assert!(std::env::var_os("CRUMBS_HELPERS_GUARD").is_none());
    }

    #[test]
    fn isolate_removes_prefixed_variables() {
        let _outer = set_var("CRUMBS_HELPERS_ISOLATED", "present");
        {
            let mut scope = isolate("crumbs_helpers_isolated");
            assert!(std::env::var_os("CRUMBS_HELPERS_ISOLATED").is_none());
            scope.set("CRUMBS_HELPERS_ISOLATED", "scoped");
            assert_eq!(std::env::var("CRUMBS_HELPERS_ISOLATED").as_deref(), Ok("scoped"));
        }
        assert_eq!(std::env::var("CRUMBS_HELPERS_ISOLATED").as_deref(), Ok("present"));
    }
}
