//! Runtime configuration
//!
//! Everything the pipeline needs is collected once into [`AppConfig`] at
//! process start and handed to each component. Values come from environment
//! variables (optionally seeded from `.env`) with the defaults in
//! [`crate::constants::defaults`].

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{defaults, envvars};
use crate::helpers::base_path;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("cannot determine credentials path: set {} or {}", envvars::CREDENTIALS_PATH, envvars::HOME)]
    NoCredentialsPath,
}

/// Spreadsheet and cell range rows are appended to
#[derive(Clone, Debug, PartialEq)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub range: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpioConfig {
    pub sysfs_root: PathBuf,
    pub pin: u32,
    pub active_high: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub sheet: SheetTarget,
    pub sheets_api_base_url: String,
    pub device_id: String,
    pub gpio: GpioConfig,
    pub client_secret_path: PathBuf,
    pub credentials_path: PathBuf,
    pub scope: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials_path = match env::var_os(envvars::CREDENTIALS_PATH) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => base_path::default_credentials_path().ok_or(ConfigError::NoCredentialsPath)?,
        };

        Ok(AppConfig {
            sheet: SheetTarget {
                spreadsheet_id: var_or(envvars::SPREADSHEET_ID, defaults::SPREADSHEET_ID),
                range: var_or(envvars::SHEET_RANGE, defaults::SHEET_RANGE),
            },
            sheets_api_base_url: var_or(envvars::SHEETS_API_BASE_URL, defaults::SHEETS_API_BASE_URL),
            device_id: var_or(envvars::DEVICE_ID, defaults::DEVICE_ID),
            gpio: GpioConfig {
                sysfs_root: var_or(envvars::GPIO_SYSFS_ROOT, defaults::GPIO_SYSFS_ROOT).into(),
                pin: parse_var(envvars::GPIO_PIN, defaults::GPIO_PIN)?,
                active_high: !parse_flag(envvars::GPIO_ACTIVE_LOW)?,
            },
            client_secret_path: var_or(envvars::CLIENT_SECRET_FILE, defaults::CLIENT_SECRET_FILE)
                .into(),
            credentials_path,
            scope: defaults::SHEETS_SCOPE.to_string(),
            user_agent: defaults::APPLICATION_NAME.to_string(),
            request_timeout: defaults::API_REQUEST_TIMEOUT,
        })
    }
}

fn var_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(v) if !v.is_empty() => v.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            value: v.clone(),
            reason: e.to_string(),
        }),
        _ => Ok(default),
    }
}

fn parse_flag(var: &'static str) -> Result<bool, ConfigError> {
    match env::var(var) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            _ => Err(ConfigError::InvalidValue {
                var,
                value: v,
                reason: "expected true or false".into(),
            }),
        },
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: &[&str] = &[
        envvars::SPREADSHEET_ID,
        envvars::SHEET_RANGE,
        envvars::SHEETS_API_BASE_URL,
        envvars::DEVICE_ID,
        envvars::GPIO_PIN,
        envvars::GPIO_SYSFS_ROOT,
        envvars::GPIO_ACTIVE_LOW,
        envvars::CLIENT_SECRET_FILE,
        envvars::CREDENTIALS_PATH,
    ];

    fn with_clean_env<F: FnOnce()>(extra: &[(&str, Option<&str>)], f: F) {
        let mut vars: Vec<(&str, Option<&str>)> = ALL_VARS
            .iter()
            .filter(|v| !extra.iter().any(|(k, _)| k == *v))
            .map(|v| (*v, None))
            .collect();
        if !extra.iter().any(|(k, _)| *k == envvars::HOME) {
            vars.push((envvars::HOME, Some("/home/pi")));
        }
        vars.extend_from_slice(extra);
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn defaults() {
        with_clean_env(&[], || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.sheet.spreadsheet_id, defaults::SPREADSHEET_ID);
            assert_eq!(config.sheet.range, "Sheet1!A1:C1");
            assert_eq!(config.device_id, "RasPi.0");
            assert_eq!(config.gpio.pin, 4);
            assert!(config.gpio.active_high);
            assert_eq!(config.gpio.sysfs_root, PathBuf::from("/sys/class/gpio"));
            assert_eq!(config.client_secret_path, PathBuf::from("client_secret.json"));
            assert_eq!(
                config.credentials_path,
                PathBuf::from("/home/pi/.credentials/sheets.googleapis.raspi-sensor-sample.json")
            );
            assert_eq!(config.scope, "https://www.googleapis.com/auth/spreadsheets");
        });
    }

    #[test]
    fn overrides() {
        with_clean_env(
            &[
                (envvars::SPREADSHEET_ID, Some("abc")),
                (envvars::SHEET_RANGE, Some("Motion!A:C")),
                (envvars::DEVICE_ID, Some("RasPi.7")),
                (envvars::GPIO_PIN, Some("17")),
                (envvars::GPIO_ACTIVE_LOW, Some("true")),
                (envvars::CREDENTIALS_PATH, Some("/tmp/creds.json")),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(
                    config.sheet,
                    SheetTarget {
                        spreadsheet_id: "abc".into(),
                        range: "Motion!A:C".into()
                    }
                );
                assert_eq!(config.device_id, "RasPi.7");
                assert_eq!(config.gpio.pin, 17);
                assert!(!config.gpio.active_high);
                assert_eq!(config.credentials_path, PathBuf::from("/tmp/creds.json"));
            },
        );
    }

    #[test]
    fn bad_pin_number() {
        with_clean_env(&[(envvars::GPIO_PIN, Some("four"))], || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == envvars::GPIO_PIN));
        });
    }

    #[test]
    fn bad_flag() {
        with_clean_env(&[(envvars::GPIO_ACTIVE_LOW, Some("maybe"))], || {
            assert!(AppConfig::from_env().is_err());
        });
    }

    #[test]
    fn no_home_and_no_credentials_path() {
        with_clean_env(&[(envvars::HOME, None)], || {
            assert_eq!(AppConfig::from_env(), Err(ConfigError::NoCredentialsPath));
        });
    }
}
