//! Configuration set validation and listing.
//!
//! A configuration set is a directory under the configs root that holds
//! every required file. Sets are created and removed by the user; this
//! module only reads them.

use std::fs;

use crate::error::{Result, SwitchError};
use crate::paths::Paths;

/// Validate a set name
///
/// Names must be a single path component so they cannot escape the configs root.
pub fn validate_set_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name cannot be empty"
    } else if name == "." || name == ".." {
        "name cannot be a relative directory reference"
    } else if name.contains('/') || name.contains('\\') {
        "name cannot contain path separators"
    } else if name.contains('\0') {
        "name cannot contain NUL bytes"
    } else {
        return Ok(());
    };

    Err(SwitchError::InvalidSetName {
        name: name.to_string(),
        reason,
    })
}

/// Strictly validate a set, failing on the first missing requirement
pub fn validate_set(paths: &Paths, name: &str) -> Result<()> {
    validate_set_name(name)?;

    let dir = paths.set_dir(name);
    if !dir.is_dir() {
        return Err(SwitchError::MissingConfigDirectory(dir));
    }

    for file in &paths.required_files {
        if !paths.set_file(name, file).is_file() {
            return Err(SwitchError::MissingRequiredFile {
                file: file.clone(),
                dir,
            });
        }
    }

    Ok(())
}

/// Non-strict validation used for filtering
pub fn is_valid_set(paths: &Paths, name: &str) -> bool {
    validate_set(paths, name).is_ok()
}

/// List valid sets, sorted ascending
pub fn list_sets(paths: &Paths) -> Result<Vec<String>> {
    let mut sets: Vec<String> = fs::read_dir(&paths.root_dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| is_valid_set(paths, name))
        .collect();
    sets.sort();
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_complete_set, make_set, setup_test_env};
    use tempfile::TempDir;

    #[test]
    fn test_set_name_validation() {
        assert!(validate_set_name("work").is_ok());
        assert!(validate_set_name("my config").is_ok());
        assert!(validate_set_name("v1.2").is_ok());

        assert!(validate_set_name("").is_err());
        assert!(validate_set_name(".").is_err());
        assert!(validate_set_name("..").is_err());
        assert!(validate_set_name("../etc").is_err());
        assert!(validate_set_name("a\\b").is_err());
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_complete_set(&env, "zeta");
        make_complete_set(&env, "alpha");
        make_complete_set(&env, "mid");
        make_set(&env, "partial", &["config.json"]);
        make_set(&env, "empty", &[]);
        // A stray file next to the sets is not a set
        fs::write(env.paths.root_dir.join("notes.txt"), "").unwrap();

        let sets = list_sets(&env.paths).unwrap();
        assert_eq!(sets, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_list_example_layout() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_set(&env, "a", &["config.json", "ui-config.json"]);
        make_set(&env, "b", &["config.json"]);

        assert_eq!(list_sets(&env.paths).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_required_file_must_be_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_set(&env, "odd", &["config.json"]);
        fs::create_dir(env.paths.set_dir("odd").join("ui-config.json")).unwrap();

        assert!(!is_valid_set(&env.paths, "odd"));
    }

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        fs::create_dir_all(&env.paths.root_dir).unwrap();

        let err = validate_set(&env.paths, "ghost").unwrap_err();
        assert!(matches!(err, SwitchError::MissingConfigDirectory(ref p) if p.ends_with("ghost")));
    }

    #[test]
    fn test_validate_missing_file_names_first_missing() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_set(&env, "b", &["config.json"]);

        let err = validate_set(&env.paths, "b").unwrap_err();
        match err {
            SwitchError::MissingRequiredFile { file, dir } => {
                assert_eq!(file, "ui-config.json");
                assert!(dir.ends_with("custom_configs/b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_complete_set() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_complete_set(&env, "a");
        assert!(validate_set(&env.paths, "a").is_ok());
        assert!(is_valid_set(&env.paths, "a"));
    }

    #[test]
    fn test_validate_rejects_escaping_name() {
        let temp_dir = TempDir::new().unwrap();
        let env = setup_test_env(&temp_dir);
        make_complete_set(&env, "a");

        let err = validate_set(&env.paths, "../custom_configs/a").unwrap_err();
        assert!(matches!(err, SwitchError::InvalidSetName { .. }));
    }
}
