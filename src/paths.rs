use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::platform::{Identity, Platform};
use crate::settings::{FailurePolicy, Settings};

/// All computed paths used by cfgswitch
#[derive(Debug, Clone)]
pub struct Paths {
    /// Directory where the managed links live
    pub workdir: PathBuf,
    /// Configs root as configured; used verbatim in link targets
    pub configs_root: PathBuf,
    /// Configs root resolved against `workdir`
    pub root_dir: PathBuf,
    /// Files every set must provide, in link order
    pub required_files: Vec<String>,
}

impl Paths {
    pub fn new(workdir: &Path, configs_root: &Path, required_files: Vec<String>) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            configs_root: configs_root.to_path_buf(),
            root_dir: workdir.join(configs_root),
            required_files,
        }
    }

    /// Get the path to a specific set directory
    pub fn set_dir(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }

    /// Get the path to a required file inside a set
    pub fn set_file(&self, name: &str, file: &str) -> PathBuf {
        self.set_dir(name).join(file)
    }

    /// Path of the managed link for a required file
    pub fn link_path(&self, file: &str) -> PathBuf {
        self.workdir.join(file)
    }

    /// Target written into the managed link for a required file
    pub fn link_target(&self, name: &str, file: &str) -> PathBuf {
        self.configs_root.join(name).join(file)
    }

    /// Name of the set a link target points into, if it is under the configs root
    pub fn set_of_target(&self, target: &Path) -> Option<String> {
        let rest = target
            .strip_prefix(&self.configs_root)
            .or_else(|_| target.strip_prefix(&self.root_dir))
            .ok()?;
        let mut components = rest.components();
        let first = components.next()?.as_os_str().to_str()?.to_string();
        // Links always point at a file inside the set, never at the set itself
        components.next()?;
        Some(first)
    }
}

/// Explicit environment every operation runs against
#[derive(Debug, Clone)]
pub struct SwitchEnv {
    pub paths: Paths,
    pub platform: Platform,
    pub identity: Identity,
    pub policy: FailurePolicy,
    /// Whether the privilege guard applies at all
    pub require_root: bool,
}

impl SwitchEnv {
    /// Build the environment from settings for the given working directory
    pub fn new(workdir: &Path, settings: &Settings, platform: Platform, identity: Identity) -> Self {
        Self {
            paths: Paths::new(
                workdir,
                &settings.configs_root,
                settings.required_files.clone(),
            ),
            platform,
            identity,
            policy: settings.on_error,
            require_root: settings.require_root,
        }
    }

    /// Capture the current process state: platform, cwd, settings and identity
    pub fn from_process(settings_path: Option<&Path>) -> Result<Self> {
        let platform = Platform::detect()?;
        let workdir =
            std::env::current_dir().context("Failed to determine the working directory")?;
        let settings = Settings::load(&workdir, settings_path)?;
        Ok(Self::new(&workdir, &settings, platform, Identity::current()))
    }
}
