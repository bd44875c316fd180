use anyhow::Result;
use env_logger::Env;

use raspi_sensor::argsets::PostStatusArgs;
use raspi_sensor::command;
use raspi_sensor::config::AppConfig;
use raspi_sensor::constants::{defaults, envvars};
use raspi_sensor::helpers;

const HELP: &str = "\
Append the current motion sensor state to a Google Sheets spreadsheet

USAGE:
  raspi-sensor [OPTIONS]

OPTIONS:
  --auth_host_name <HOST>     Host for the local authorization callback [default: localhost]
  --auth_host_port <PORT>     Port for the callback; repeat to try several [default: 8080 8090]
  --noauth_local_webserver    Paste the verification code instead of running a local webserver
  --logging_level <LEVEL>     Log level (overrides LOG_LEVEL) [default: info]
  -h, --help                  Print help
";

fn main() -> Result<()> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }
    let args = PostStatusArgs::from_args(pargs)?;

    let dotenv_loaded = helpers::load_dotenv();
    let mut logger =
        env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL));
    if let Some(level) = &args.logging_level {
        logger.parse_filters(level);
    }
    logger.init();
    if dotenv_loaded {
        log::debug!("Loaded local .env");
    }

    let config = AppConfig::from_env()?;
    command::post_status(&config, args.flow)
}
