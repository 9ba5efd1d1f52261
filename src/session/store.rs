//! On-disk round-trip of the session, the console's replacement for the
//! browser-local storage the service's web client relied on.

use crate::errors::ConsoleError;
use crate::session::{RoleSet, Session};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub token: String,
    pub username: String,
    pub roles: String,
}

/// Default location under the user config dir.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("stockdesk").join("session.toml"))
}

/// Persist the current credential, or remove the file when logged out.
///
/// # Errors
/// Returns an error if the file or its parent directory cannot be written.
pub fn save_from(session: &Session, path: &Path) -> Result<(), ConsoleError> {
    let Some(token) = session.token() else {
        return clear_saved(path);
    };
    let file = SessionFile {
        token,
        username: session.username().unwrap_or_default(),
        roles: session.roles().joined(),
    };
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    let body = toml::to_string(&file).map_err(|e| ConsoleError::Config(e.to_string()))?;
    std::fs::write(path, body)?;
    Ok(())
}

/// Load a previously saved credential into the session. A missing file is
/// not an error; it simply leaves the session unauthenticated.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_into(session: &Session, path: &Path) -> Result<bool, ConsoleError> {
    if !path.exists() {
        return Ok(false);
    }
    let body = std::fs::read_to_string(path)?;
    let file: SessionFile = toml::from_str(&body).map_err(|e| ConsoleError::Config(e.to_string()))?;
    session.authenticate(&file.token, &file.username, RoleSet::parse(&file.roles));
    Ok(true)
}

/// # Errors
/// Returns an error if an existing file cannot be removed.
pub fn clear_saved(path: &Path) -> Result<(), ConsoleError> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
