//! Registry access through the Windows `reg` command

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{RegistryBackend, RegistryError, RegistryKey};

/// Uninstall keys enumerated for installed-application detection.
const UNINSTALL_ROOTS: [&str; 3] = [
    r"HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
    r"HKEY_CURRENT_USER\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
    r"HKEY_LOCAL_MACHINE\SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall",
];

/// Per-user executable registrations, used to spot browsers that skip the
/// uninstall keys.
const APP_PATHS: &str = r"HKEY_CURRENT_USER\SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths";

/// Backend that shells out to `reg.exe`.
///
/// No timeout is applied: a hung `reg` process blocks the caller.
#[derive(Debug, Clone)]
pub struct RegTool {
    program: PathBuf,
}

impl Default for RegTool {
    fn default() -> Self {
        Self::new()
    }
}

impl RegTool {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("reg"),
        }
    }

    /// Use a different executable, e.g. a full path to `reg.exe`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `reg <args>` and return stdout on success.
    fn run(&self, args: &[&OsStr]) -> Result<String, RegistryError> {
        let program = self.program.to_string_lossy().to_string();
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| RegistryError::Launch {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let command = format!(
                "{} {}",
                program,
                args.first().map(|a| a.to_string_lossy()).unwrap_or_default()
            );
            Err(RegistryError::CommandFailed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl RegistryBackend for RegTool {
    fn name(&self) -> &'static str {
        "reg"
    }

    fn is_available(&self) -> bool {
        cfg!(windows)
    }

    fn key_exists(&self, key: &RegistryKey) -> bool {
        let name = key.full_name();
        self.run(&[OsStr::new("query"), OsStr::new(&name)]).is_ok()
    }

    fn export(&self, key: &RegistryKey, out_file: &Path) -> Result<(), RegistryError> {
        let name = key.full_name();
        self.run(&[
            OsStr::new("export"),
            OsStr::new(&name),
            out_file.as_os_str(),
            OsStr::new("/y"),
        ])
        .map(|_| ())
    }

    fn import(&self, key_file: &Path) -> Result<(), RegistryError> {
        self.run(&[OsStr::new("import"), key_file.as_os_str()])
            .map(|_| ())
    }

    fn installed_display_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for root in UNINSTALL_ROOTS {
            match self.run(&[
                OsStr::new("query"),
                OsStr::new(root),
                OsStr::new("/s"),
                OsStr::new("/v"),
                OsStr::new("DisplayName"),
            ]) {
                Ok(stdout) => names.extend(parse_display_names(&stdout)),
                Err(e) => tracing::debug!(root, error = %e, "Uninstall key not readable"),
            }
        }
        match self.run(&[OsStr::new("query"), OsStr::new(APP_PATHS)]) {
            Ok(stdout) => names.extend(parse_app_path_names(&stdout)),
            Err(e) => tracing::debug!(error = %e, "App Paths key not readable"),
        }
        names
    }
}

/// Extract `DisplayName` values from `reg query /v DisplayName /s` output.
pub fn parse_display_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("DisplayName")?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let (value_type, value) = rest.trim_start().split_once(char::is_whitespace)?;
            if !value_type.starts_with("REG_") {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}

/// Map App Paths subkeys to the browsers they register.
pub fn parse_app_path_names(stdout: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in stdout.lines().map(str::trim) {
        if !line.starts_with("HKEY_") {
            continue;
        }
        let Some(subkey) = line.rsplit('\\').next() else {
            continue;
        };
        let subkey = subkey.to_lowercase();
        let name = if subkey.contains("opera") {
            "Opera"
        } else if subkey.contains("vivaldi") {
            "Vivaldi"
        } else {
            continue;
        };
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
