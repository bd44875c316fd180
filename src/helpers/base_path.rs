use std::{env, path::PathBuf};

use crate::constants::{defaults, envvars};

pub fn home_dir() -> Option<PathBuf> {
    env::var_os(envvars::HOME)
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// `~/.credentials/sheets.googleapis.raspi-sensor-sample.json`
pub fn default_credentials_path() -> Option<PathBuf> {
    home_dir().map(|home| {
        home.join(defaults::CREDENTIALS_DIR)
            .join(defaults::CREDENTIALS_FILE)
    })
}
