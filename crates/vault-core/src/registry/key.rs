//! Registry key identifiers of the form `HIVE\subkey...`

use std::fmt;
use std::str::FromStr;

use super::RegistryError;

/// Predefined registry root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hive {
    LocalMachine,
    CurrentUser,
    ClassesRoot,
    Users,
    CurrentConfig,
}

impl Hive {
    pub const ALL: [Hive; 5] = [
        Hive::LocalMachine,
        Hive::CurrentUser,
        Hive::ClassesRoot,
        Hive::Users,
        Hive::CurrentConfig,
    ];

    pub fn long_name(&self) -> &'static str {
        match self {
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::Users => "HKEY_USERS",
            Self::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::LocalMachine => "HKLM",
            Self::CurrentUser => "HKCU",
            Self::ClassesRoot => "HKCR",
            Self::Users => "HKU",
            Self::CurrentConfig => "HKCC",
        }
    }

    /// Match a long or short hive name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hive| {
            hive.long_name().eq_ignore_ascii_case(name) || hive.short_name().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// A parsed registry key identifier.
///
/// The subkey is never empty: exporting or importing a whole hive is not
/// something a catalog entry may ask for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryKey {
    hive: Hive,
    subkey: String,
}

impl RegistryKey {
    pub fn new(hive: Hive, subkey: impl Into<String>) -> Self {
        Self {
            hive,
            subkey: subkey.into(),
        }
    }

    /// Parse `HIVE\subkey...`. Forward slashes are not separators in
    /// registry paths and are kept as part of key names.
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidKey {
            key: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim().trim_matches('\\');
        let Some((hive_name, subkey)) = trimmed.split_once('\\') else {
            return Err(invalid("expected HIVE\\subkey"));
        };
        let hive = Hive::from_name(hive_name).ok_or_else(|| invalid("unknown hive"))?;
        let subkey = subkey.trim_matches('\\');
        if subkey.is_empty() {
            return Err(invalid("empty subkey"));
        }
        if subkey.contains("\\\\") {
            return Err(invalid("empty path segment"));
        }
        Ok(Self::new(hive, subkey))
    }

    pub fn hive(&self) -> Hive {
        self.hive
    }

    pub fn subkey(&self) -> &str {
        &self.subkey
    }

    /// Identifier with the long hive name, as accepted by `reg.exe`.
    pub fn full_name(&self) -> String {
        format!("{}\\{}", self.hive.long_name(), self.subkey)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}", self.hive.long_name(), self.subkey)
    }
}
