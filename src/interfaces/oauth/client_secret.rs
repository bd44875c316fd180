use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::AuthError;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client registration as downloaded from the Google API console
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

// The console wraps the registration in a key naming the client type
#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ClientSecret {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let invalid = |reason: String| AuthError::ClientSecret {
            path: path.to_path_buf(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        Self::parse(&raw).map_err(invalid)
    }

    fn parse(raw: &str) -> Result<Self, String> {
        let file: ClientSecretFile = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| "expected an 'installed' or 'web' client".to_string())?;
        if secret.client_id.is_empty() || secret.client_secret.is_empty() {
            return Err("client_id and client_secret must not be empty".into());
        }
        Ok(secret)
    }
}
