//! Configuration switching logic.
//!
//! This module implements the core mechanism of `cfgswitch`: pointing each
//! required file in the working directory at the chosen set. It handles:
//! - Detecting what currently occupies each managed path.
//! - Replacing managed symlinks and leaving everything else alone.
//! - Applying the configured failure policy per file.
//!
//! Links are processed in the order of the required file list. Nothing is
//! rolled back when a later file fails.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SwitchError};
use crate::guard::check_privilege;
use crate::paths::{Paths, SwitchEnv};
use crate::sets::validate_set;
use crate::settings::FailurePolicy;

/// What currently occupies a managed link path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Missing,
    RegularFile,
    Directory,
    Symlink { target: PathBuf },
    BrokenSymlink { target: PathBuf },
}

impl LinkStatus {
    pub fn detect(path: &Path) -> Result<Self> {
        // symlink_metadata does not follow the link
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::Missing),
            Err(err) => return Err(err.into()),
        };

        let status = if meta.file_type().is_symlink() {
            let target = fs::read_link(path)?;
            if path.exists() {
                Self::Symlink { target }
            } else {
                Self::BrokenSymlink { target }
            }
        } else if meta.is_dir() {
            Self::Directory
        } else {
            Self::RegularFile
        };
        Ok(status)
    }

    /// A link cfgswitch may remove and recreate
    pub fn is_managed(&self) -> bool {
        matches!(self, Self::Symlink { .. } | Self::BrokenSymlink { .. })
    }

    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Symlink { target } | Self::BrokenSymlink { target } => Some(target),
            _ => None,
        }
    }
}

/// Result of processing one required file
#[derive(Debug)]
pub enum LinkOutcome {
    /// Nothing was there; a new link was created
    Created,
    /// An old managed link was replaced
    Replaced { previous: PathBuf },
    /// The link already pointed at the requested set
    Unchanged,
    /// Left untouched (not a managed link)
    Skipped(SwitchError),
    /// Removal or creation failed and the policy said to continue
    Failed(SwitchError),
}

impl LinkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created | Self::Replaced { .. } | Self::Unchanged)
    }
}

/// Outcome for a single managed link
#[derive(Debug)]
pub struct FileReport {
    pub file: String,
    pub link: PathBuf,
    pub target: PathBuf,
    pub outcome: LinkOutcome,
}

/// Per-file outcomes of a switch, in required file order
#[derive(Debug)]
pub struct SwitchReport {
    pub set: String,
    pub files: Vec<FileReport>,
}

impl SwitchReport {
    /// Every required file now links into the set
    pub fn is_complete(&self) -> bool {
        self.files.iter().all(|f| f.outcome.is_success())
    }

    pub fn problems(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.outcome.is_success())
    }
}

/// Switch the working directory's managed links to a set.
///
/// Checks privilege and strictly validates the set before touching any file.
/// `on_progress` is called after each file is processed.
pub fn switch_to_set<F>(env: &SwitchEnv, name: &str, mut on_progress: F) -> Result<SwitchReport>
where
    F: FnMut(&FileReport),
{
    check_privilege(env)?;
    validate_set(&env.paths, name)?;

    let mut files = Vec::with_capacity(env.paths.required_files.len());
    for file in &env.paths.required_files {
        let report = switch_file(&env.paths, name, file, env.policy)?;
        on_progress(&report);
        files.push(report);
    }

    Ok(SwitchReport {
        set: name.to_string(),
        files,
    })
}

fn switch_file(paths: &Paths, name: &str, file: &str, policy: FailurePolicy) -> Result<FileReport> {
    let link = paths.link_path(file);
    let target = paths.link_target(name, file);

    let outcome = LinkStatus::detect(&link).and_then(|status| match status {
        LinkStatus::Missing => make_symlink(&target, &link).map(|()| LinkOutcome::Created),
        LinkStatus::Symlink { target: current } if current == target => {
            Ok(LinkOutcome::Unchanged)
        }
        LinkStatus::Symlink { target: previous } | LinkStatus::BrokenSymlink { target: previous } => {
            remove_link(&link)
                .and_then(|()| make_symlink(&target, &link))
                .map(|()| LinkOutcome::Replaced { previous })
        }
        LinkStatus::RegularFile | LinkStatus::Directory => Ok(LinkOutcome::Skipped(
            SwitchError::NotAManagedLink(link.clone()),
        )),
    });

    Ok(FileReport {
        file: file.to_string(),
        link,
        target,
        outcome: apply_policy(outcome, policy)?,
    })
}

/// Turn a per-file error into a reported failure or an abort
fn apply_policy(outcome: Result<LinkOutcome>, policy: FailurePolicy) -> Result<LinkOutcome> {
    match (outcome, policy) {
        (Ok(outcome), _) => Ok(outcome),
        (Err(err), FailurePolicy::Continue) => Ok(LinkOutcome::Failed(err)),
        (Err(err), FailurePolicy::Abort) => Err(err),
    }
}

fn remove_link(link: &Path) -> Result<()> {
    // remove_file removes the symlink itself, not what it points at
    fs::remove_file(link).map_err(|source| SwitchError::LinkRemovalFailure {
        path: link.to_path_buf(),
        source,
    })
}

fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let created = std::os::windows::fs::symlink_file(target, link);

    #[cfg(not(any(unix, windows)))]
    let created: std::io::Result<()> = Err(std::io::ErrorKind::Unsupported.into());

    created.map_err(|source| SwitchError::LinkCreationFailure {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source,
    })
}

/// Current status of every managed link, in required file order
pub fn link_statuses(paths: &Paths) -> Vec<(String, Result<LinkStatus>)> {
    paths
        .required_files
        .iter()
        .map(|file| (file.clone(), LinkStatus::detect(&paths.link_path(file))))
        .collect()
}

/// The set every managed link points into, if they all agree
pub fn active_set(paths: &Paths) -> Option<String> {
    let mut active: Option<String> = None;
    for (_, status) in link_statuses(paths) {
        let Ok(LinkStatus::Symlink { target }) = status else {
            return None;
        };
        let set = paths.set_of_target(&target)?;
        match &active {
            Some(current) if *current != set => return None,
            Some(_) => {}
            None => active = Some(set),
        }
    }
    active
}
