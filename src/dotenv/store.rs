//! Environment variable tables the loader reads from and writes to.

use std::collections::HashMap;

/// A mutable name/value table, normally the process environment.
pub trait EnvStore: std::fmt::Debug {
    /// Returns the current value, or `None` when `name` is undefined.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, name: &str, value: &str);

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// The real process environment.
///
/// This is shared global state. Callers that load from several threads must
/// serialize access themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// An isolated in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Reads `name` from the process environment, or `""` when undefined.
pub fn get_var(name: &str) -> String {
    ProcessEnv.get(name).unwrap_or_default()
}
