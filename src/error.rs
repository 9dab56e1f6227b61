//! Error types for set validation and switching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library operations.
#[derive(Error, Debug)]
pub enum SwitchError {
    /// The configs root directory is missing
    #[error("configs directory not found: {} (cannot locate configurations to switch)", .0.display())]
    MissingConfigRoot(PathBuf),

    /// The named set has no directory under the configs root
    #[error("target config directory does not exist: {}", .0.display())]
    MissingConfigDirectory(PathBuf),

    #[error("required config file \"{file}\" is not in \"{}\"", .dir.display())]
    MissingRequiredFile { file: String, dir: PathBuf },

    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("you must run this command with root permission (uid={uid}, gid={gid})")]
    InsufficientPrivilege { uid: u32, gid: u32 },

    #[error("failed to remove old link {}: {source}", .path.display())]
    LinkRemovalFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create link {} -> {}: {source}", .link.display(), .target.display())]
    LinkCreationFailure {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Something other than a symlink occupies a managed path
    #[error("cannot link \"{}\": target is not a symbolic link", .0.display())]
    NotAManagedLink(PathBuf),

    #[error("invalid configuration name '{name}': {reason}")]
    InvalidSetName { name: String, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, SwitchError>;
