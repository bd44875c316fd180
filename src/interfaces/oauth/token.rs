use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use ureq::Agent;

use super::{AuthError, ClientSecret, Credentials};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

/// Client for the provider's token endpoint
#[derive(Clone, Debug)]
pub struct TokenClient {
    agent: Agent,
    user_agent: String,
}

impl TokenClient {
    pub fn new(agent: Agent, user_agent: impl Into<String>) -> Self {
        TokenClient {
            agent,
            user_agent: user_agent.into(),
        }
    }

    /// Trade an authorization code for a credential granted `scope`
    pub fn exchange_code(
        &self,
        secret: &ClientSecret,
        code: &str,
        redirect_uri: &str,
        scope: &str,
    ) -> Result<Credentials, AuthError> {
        log::debug!("Exchanging authorization code at {}", secret.token_uri);
        let resp = self.request_token(
            &secret.token_uri,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &secret.client_id),
                ("client_secret", &secret.client_secret),
                ("redirect_uri", redirect_uri),
            ],
        )?;

        let now = Utc::now();
        Ok(Credentials {
            token_expiry: expiry_from(now, resp.expires_in),
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
            token_uri: secret.token_uri.clone(),
            scopes: vec![scope.to_string()],
            token_type: resp.token_type.unwrap_or_else(|| "Bearer".into()),
            user_agent: Some(self.user_agent.clone()),
            invalid: false,
        })
    }

    /// Obtain a fresh access token using the stored refresh token
    pub fn refresh(&self, credentials: &Credentials) -> Result<Credentials, AuthError> {
        let refresh_token = credentials
            .refresh_token
            .as_deref()
            .ok_or_else(|| AuthError::Denied("no refresh token stored".into()))?;

        log::debug!("Refreshing access token at {}", credentials.token_uri);
        let resp = self.request_token(
            &credentials.token_uri,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &credentials.client_id),
                ("client_secret", &credentials.client_secret),
            ],
        )?;

        let mut refreshed = credentials.clone();
        refreshed.token_expiry = expiry_from(Utc::now(), resp.expires_in);
        refreshed.access_token = resp.access_token;
        if let Some(token) = resp.refresh_token {
            refreshed.refresh_token = Some(token);
        }
        if let Some(token_type) = resp.token_type {
            refreshed.token_type = token_type;
        }
        Ok(refreshed)
    }

    fn request_token(
        &self,
        token_uri: &str,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, AuthError> {
        let mut response = self
            .agent
            .post(token_uri)
            .header("User-Agent", &self.user_agent)
            .send_form(form.iter().copied())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.body_mut().read_json::<TokenResponse>()?)
    }
}

fn expiry_from(now: DateTime<Utc>, expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
}
