use std::path::PathBuf;

use chrono::Utc;

use super::{AuthError, AuthorizationFlow, ClientSecret, CredentialStore, Credentials, TokenClient};

pub trait CredentialSource {
    fn credentials(&self) -> Result<Credentials, AuthError>;
}

/// Cached-or-interactive credential loading
///
/// 1. a stored, usable, unexpired credential is returned unchanged;
/// 2. a stored credential that has expired is refreshed and re-stored;
/// 3. otherwise the interactive flow runs and its result is stored.
pub struct CredentialLoader<S, F> {
    store: S,
    flow: F,
    tokens: TokenClient,
    client_secret_path: PathBuf,
    scope: String,
}

impl<S: CredentialStore, F: AuthorizationFlow> CredentialLoader<S, F> {
    pub fn new(
        store: S,
        flow: F,
        tokens: TokenClient,
        client_secret_path: impl Into<PathBuf>,
        scope: impl Into<String>,
    ) -> Self {
        CredentialLoader {
            store,
            flow,
            tokens,
            client_secret_path: client_secret_path.into(),
            scope: scope.into(),
        }
    }

    fn load_stored(&self) -> Option<Credentials> {
        match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable credentials at {}: {}",
                    self.store.location(),
                    e
                );
                None
            }
        }
    }

    /// `Ok(None)` when the refresh token was rejected and consent is needed again
    fn try_refresh(&self, stored: &Credentials) -> Result<Option<Credentials>, AuthError> {
        match self.tokens.refresh(stored) {
            Ok(refreshed) => {
                self.store.save(&refreshed)?;
                log::info!("Refreshed access token");
                Ok(Some(refreshed))
            }
            Err(AuthError::TokenEndpoint {
                status: status @ (400 | 401),
                body,
            }) => {
                log::warn!("Token refresh rejected (HTTP {}): {}", status, body.trim());
                let mut revoked = stored.clone();
                revoked.invalid = true;
                self.store.save(&revoked)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn run_flow(&self) -> Result<Credentials, AuthError> {
        let secret = ClientSecret::from_file(&self.client_secret_path)?;
        let credentials = self.flow.authorize(&secret, &self.scope)?;
        self.store.save(&credentials)?;
        println!("Storing credentials to {}", self.store.location());
        Ok(credentials)
    }
}

impl<S: CredentialStore, F: AuthorizationFlow> CredentialSource for CredentialLoader<S, F> {
    fn credentials(&self) -> Result<Credentials, AuthError> {
        match self.load_stored() {
            Some(stored) if stored.is_usable_for(&self.scope) => {
                if !stored.is_expired_at(Utc::now()) {
                    log::debug!("Using stored credentials from {}", self.store.location());
                    return Ok(stored);
                }
                if stored.refresh_token.is_some() {
                    if let Some(refreshed) = self.try_refresh(&stored)? {
                        return Ok(refreshed);
                    }
                } else {
                    log::info!("Stored access token has expired and cannot be refreshed");
                }
            }
            Some(_) => log::info!("Stored credentials are not valid for {}", self.scope),
            None => log::info!("No stored credentials at {}", self.store.location()),
        }
        self.run_flow()
    }
}
