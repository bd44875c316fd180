//! OAuth 2.0 credentials for the Sheets API
//!
//! [`CredentialLoader`] returns the stored credential when it is still good,
//! refreshes it when it has expired, and otherwise runs the interactive
//! [`InstalledAppFlow`] and persists the result through a
//! [`CredentialStore`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod client_secret;
mod credentials;
mod flow;
mod loader;
mod token;

pub use client_secret::ClientSecret;
pub use credentials::{CredentialStore, Credentials, FileStore};
pub use flow::{AuthorizationFlow, FlowOptions, InstalledAppFlow};
pub use loader::{CredentialLoader, CredentialSource};
pub use token::TokenClient;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("client secret file {path}: {reason}")]
    ClientSecret { path: PathBuf, reason: String },
    #[error("credential store {path}: {source}")]
    Store { path: PathBuf, source: io::Error },
    #[error("token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
    #[error("authorization was not granted: {0}")]
    Denied(String),
    #[error("authorization callback error: {0}")]
    Callback(String),
    #[error(transparent)]
    Http(#[from] ureq::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
