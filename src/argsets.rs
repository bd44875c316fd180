use pico_args::Arguments;

use crate::constants::defaults;
use crate::interfaces::oauth::FlowOptions;

#[derive(Debug, PartialEq)]
pub struct PostStatusArgs {
    pub flow: FlowOptions,
    pub logging_level: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ArgsError {
    #[error(transparent)]
    Parse(#[from] pico_args::Error),
    #[error("unexpected arguments: {0}")]
    Unexpected(String),
    #[error("unknown logging level '{0}'")]
    LoggingLevel(String),
}

impl PostStatusArgs {
    pub fn from_args(mut args: Arguments) -> Result<Self, ArgsError> {
        let auth_host_name = args
            .opt_value_from_str::<_, String>("--auth_host_name")?
            .unwrap_or_else(|| defaults::AUTH_HOST_NAME.to_string());
        let mut auth_host_ports: Vec<u16> = args.values_from_str("--auth_host_port")?;
        if auth_host_ports.is_empty() {
            auth_host_ports = defaults::AUTH_HOST_PORTS.to_vec();
        }
        let noauth_local_webserver = args.contains("--noauth_local_webserver");
        let logging_level = args
            .opt_value_from_str::<_, String>("--logging_level")?
            .map(|l| log_filter(&l))
            .transpose()?;

        let rest = args.finish();
        if !rest.is_empty() {
            let rest: Vec<String> = rest
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            return Err(ArgsError::Unexpected(rest.join(" ")));
        }

        Ok(PostStatusArgs {
            flow: FlowOptions {
                auth_host_name,
                auth_host_ports,
                noauth_local_webserver,
            },
            logging_level,
        })
    }
}

// Accepts the Python-style names (WARNING, CRITICAL) as well as log's own
fn log_filter(level: &str) -> Result<String, ArgsError> {
    match level.to_ascii_lowercase().as_str() {
        "critical" | "error" => Ok("error".into()),
        "warning" | "warn" => Ok("warn".into()),
        l @ ("info" | "debug" | "trace" | "off") => Ok(l.into()),
        _ => Err(ArgsError::LoggingLevel(level.to_string())),
    }
}
