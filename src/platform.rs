//! Operating system detection and process identity.
//!
//! The set of supported platforms is closed. Each one carries a small
//! capability table describing how switching behaves on it.

use crate::error::{Result, SwitchError};

/// Supported operating system families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// Detect the platform this binary is running on
    pub fn detect() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value onto a supported platform
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(SwitchError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Whether switching requires the process to run as root
    pub fn enforces_elevation(self) -> bool {
        match self {
            Self::Linux | Self::Darwin => true,
            Self::Windows => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Windows => "Windows",
        }
    }
}

/// Real user and group ids of a process.
///
/// `None` on platforms without numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

impl Identity {
    /// Identity of the current process
    #[cfg(unix)]
    pub fn current() -> Self {
        // SAFETY: getuid/getgid cannot fail and touch no memory.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self {
            uid: Some(uid),
            gid: Some(gid),
        }
    }

    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self::unknown()
    }

    pub fn root() -> Self {
        Self::user(0, 0)
    }

    pub fn user(uid: u32, gid: u32) -> Self {
        Self {
            uid: Some(uid),
            gid: Some(gid),
        }
    }

    pub fn unknown() -> Self {
        Self {
            uid: None,
            gid: None,
        }
    }

    /// Both ids are 0
    pub fn is_root(&self) -> bool {
        self.uid == Some(0) && self.gid == Some(0)
    }
}
