use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Persisted OAuth credential
///
/// Field names follow the layout used by the Google OAuth helper libraries,
/// so an existing credential file can be picked up as-is.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Credentials {
    #[serde(default)]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
    pub client_id: String,
    pub client_secret: String,
    pub token_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub invalid: bool,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Credentials {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.token_expiry.is_some_and(|expiry| now >= expiry)
    }

    /// Not revoked, holds a token, and was granted `scope`
    pub fn is_usable_for(&self, scope: &str) -> bool {
        !self.invalid && !self.access_token.is_empty() && self.scopes.iter().any(|s| s == scope)
    }

    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

pub trait CredentialStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Credentials>, AuthError>;
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;
    fn location(&self) -> String;
}

/// Credential store backed by a single JSON file
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    fn store_err(&self, source: std::io::Error) -> AuthError {
        AuthError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.store_err(e))?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.store_err(e))?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.store_err(e))?;
        // mode() above only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.store_err(e))?;
        }
        file.write_all(&serde_json::to_vec_pretty(credentials)?)
            .map_err(|e| self.store_err(e))?;
        log::debug!("Wrote credentials to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
