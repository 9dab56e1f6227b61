//! Preconditions checked before cfgswitch touches anything.

use crate::error::{Result, SwitchError};
use crate::paths::SwitchEnv;

/// Verify the configs root exists as a directory.
///
/// Platform support is checked earlier, when the environment is built.
pub fn check_environment(env: &SwitchEnv) -> Result<()> {
    if !env.paths.root_dir.is_dir() {
        return Err(SwitchError::MissingConfigRoot(env.paths.root_dir.clone()));
    }
    Ok(())
}

/// Verify the process may switch links on this platform
pub fn check_privilege(env: &SwitchEnv) -> Result<()> {
    if !env.require_root || !env.platform.enforces_elevation() {
        return Ok(());
    }

    if env.identity.is_root() {
        Ok(())
    } else {
        Err(SwitchError::InsufficientPrivilege {
            uid: env.identity.uid.unwrap_or(u32::MAX),
            gid: env.identity.gid.unwrap_or(u32::MAX),
        })
    }
}
