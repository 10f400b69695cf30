//! Side-effect free existence checks for catalog paths
//!
//! Two flavours are provided. [`path_exists`] treats "is a file or a
//! directory" as one predicate and decides whether a capture is attempted.
//! [`file_exists`] and [`folder_exists`] are kind-specific and back plugin
//! verification reports.

use crate::Environment;

/// True if the expanded path is an existing file or directory.
pub fn path_exists(env: &Environment, path: &str) -> bool {
    let native = env.expand_path(path).to_native();
    native.is_file() || native.is_dir()
}

/// True if the expanded path is an existing regular file.
pub fn file_exists(env: &Environment, path: &str) -> bool {
    env.expand_path(path).is_file()
}

/// True if the expanded path is an existing directory.
pub fn folder_exists(env: &Environment, path: &str) -> bool {
    env.expand_path(path).is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Environment) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("settings.ini"), "x=1").unwrap();
        fs::create_dir_all(temp.path().join("Profiles")).unwrap();
        let env = Environment::from_pairs([("ROOT", temp.path().to_string_lossy().to_string())]);
        (temp, env)
    }

    #[test]
    fn generic_predicate_accepts_both_kinds() {
        let (_temp, env) = setup();
        assert!(path_exists(&env, "%ROOT%/settings.ini"));
        assert!(path_exists(&env, "%ROOT%/Profiles"));
        assert!(!path_exists(&env, "%ROOT%/missing"));
    }

    #[test]
    fn kind_specific_predicates() {
        let (_temp, env) = setup();
        assert!(file_exists(&env, "%ROOT%/settings.ini"));
        assert!(!file_exists(&env, "%ROOT%/Profiles"));
        assert!(folder_exists(&env, "%ROOT%/Profiles"));
        assert!(!folder_exists(&env, "%ROOT%/settings.ini"));
    }

    #[test]
    fn unexpanded_placeholder_does_not_exist() {
        let (_temp, env) = setup();
        assert!(!path_exists(&env, "%UNSET_VARIABLE%/settings.ini"));
    }
}
