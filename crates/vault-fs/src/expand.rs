//! Environment-variable expansion for catalog paths
//!
//! Catalog entries carry placeholders such as `%APPDATA%\Code\User`. The
//! [`Environment`] snapshot replaces them with values captured once per run,
//! so expansion is a pure function of the snapshot and the input.
//!
//! Supported placeholder forms: `%NAME%`, `${NAME}` and `$NAME`. Unknown
//! variables are left exactly as written.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::NormalizedPath;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([^%\s]+)%|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("placeholder pattern is valid")
});

/// Snapshot of environment variables used for path expansion.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
    case_insensitive: bool,
}

impl Environment {
    /// An empty snapshot using the platform's name matching rules.
    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
            case_insensitive: cfg!(windows),
        }
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut env = Self::empty();
        for (key, value) in std::env::vars_os() {
            if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
                env.insert(key, value);
            }
        }
        env
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = Self::empty();
        for (key, value) in pairs {
            env.insert(key.as_ref(), value);
        }
        env
    }

    /// Force case-insensitive (Windows style) or case-sensitive name lookup.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        if enabled && !self.case_insensitive {
            self.vars = self
                .vars
                .into_iter()
                .map(|(k, v)| (k.to_uppercase(), v))
                .collect();
        }
        self.case_insensitive = enabled;
        self
    }

    /// Add or replace a variable.
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.vars.insert(self.key(name), value.into());
    }

    fn key(&self, name: &str) -> String {
        if self.case_insensitive {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&self.key(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replace every known placeholder in `input` with its value.
    ///
    /// Single pass: substituted values are not scanned again.
    pub fn expand(&self, input: &str) -> String {
        PLACEHOLDER
            .replace_all(input, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Expand `input` and wrap the result as a [`NormalizedPath`].
    pub fn expand_path(&self, input: &str) -> NormalizedPath {
        NormalizedPath::new(self.expand(input))
    }

}
