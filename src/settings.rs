use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the settings file looked up in the working directory
pub const SETTINGS_FILE_NAME: &str = "cfgswitch.json";

/// Default directory holding the configuration sets
pub const DEFAULT_CONFIGS_ROOT: &str = "custom_configs";

/// Files every configuration set must provide, in link order
pub const DEFAULT_REQUIRED_FILES: &[&str] = &["config.json", "ui-config.json"];

/// What to do when a single managed link cannot be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report the file as failed and move on to the next one
    #[default]
    Continue,
    /// Stop the whole switch at the first failure
    Abort,
}

/// Optional settings stored in cfgswitch.json
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding one subdirectory per configuration set
    pub configs_root: PathBuf,

    /// File names each set must contain
    pub required_files: Vec<String>,

    pub on_error: FailurePolicy,

    /// Refuse to switch unless running as root on platforms that enforce it
    pub require_root: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            configs_root: PathBuf::from(DEFAULT_CONFIGS_ROOT),
            required_files: DEFAULT_REQUIRED_FILES
                .iter()
                .map(|f| f.to_string())
                .collect(),
            on_error: FailurePolicy::default(),
            require_root: true,
        }
    }
}

impl Settings {
    /// Read settings from a file and validate them
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

        settings
            .validate()
            .with_context(|| format!("Invalid settings file: {:?}", path))?;
        Ok(settings)
    }

    /// Resolve settings for a working directory.
    ///
    /// Lookup order:
    /// 1. `explicit` path (must exist)
    /// 2. `<workdir>/cfgswitch.json`
    /// 3. `<user config dir>/config.json`
    /// 4. built-in defaults
    pub fn load(workdir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let local = workdir.join(SETTINGS_FILE_NAME);
        if local.is_file() {
            return Self::read(&local);
        }

        if let Some(user) = user_settings_path().filter(|p| p.is_file()) {
            return Self::read(&user);
        }

        Ok(Self::default())
    }

    /// Check required file names are usable as link names in the working directory
    pub fn validate(&self) -> Result<()> {
        if self.required_files.is_empty() {
            bail!("required_files cannot be empty");
        }

        for (i, file) in self.required_files.iter().enumerate() {
            if file.is_empty() || file == "." || file == ".." {
                bail!("invalid required file name: {:?}", file);
            }
            if file.contains('/') || file.contains('\\') {
                bail!("required file name must not contain path separators: {:?}", file);
            }
            if self.required_files[..i].contains(file) {
                bail!("duplicate required file name: {:?}", file);
            }
        }

        if self.configs_root.as_os_str().is_empty() {
            bail!("configs_root cannot be empty");
        }

        Ok(())
    }
}

/// Per-user settings file, e.g. ~/.config/cfgswitch/config.json
pub fn user_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cfgswitch").map(|dirs| dirs.config_dir().join("config.json"))
}
