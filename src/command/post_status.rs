use anyhow::{Context, Result};
use embedded_hal::digital::InputPin;
use serde_json::Value;

use crate::config::AppConfig;
use crate::data_mgmt::Reading;
use crate::interfaces::gpio::SysfsPin;
use crate::interfaces::http::build_agent;
use crate::interfaces::oauth::{
    CredentialLoader, CredentialSource, FileStore, FlowOptions, InstalledAppFlow, TokenClient,
};
use crate::interfaces::sheets::{RowAppender, SheetsClient};
use crate::readers::pir::MotionSensor;

/// Sample the motion sensor once and append the reading to the spreadsheet
pub fn post_status(config: &AppConfig, flow_options: FlowOptions) -> Result<()> {
    // The pin is claimed first so a missing sensor fails before any network traffic
    let pin = SysfsPin::open(&config.gpio.sysfs_root, config.gpio.pin)
        .context("Could not initialize motion sensor")?;
    let mut sensor = MotionSensor::new(pin, config.gpio.active_high);

    let agent = build_agent(config.request_timeout);
    let tokens = TokenClient::new(agent.clone(), &config.user_agent);
    let loader = CredentialLoader::new(
        FileStore::new(&config.credentials_path),
        InstalledAppFlow::new(flow_options, tokens.clone()),
        tokens,
        &config.client_secret_path,
        &config.scope,
    );
    let sheets = SheetsClient::new(
        agent,
        &config.sheets_api_base_url,
        config.sheet.clone(),
        &config.user_agent,
    )?;

    let response = run_once(&config.device_id, &loader, &mut sensor, &sheets)?;
    println!("{response}");
    Ok(())
}

pub fn run_once<C, P, A>(
    device_id: &str,
    credentials: &C,
    sensor: &mut MotionSensor<P>,
    appender: &A,
) -> Result<Value>
where
    C: CredentialSource,
    P: InputPin,
    P::Error: std::error::Error + Send + Sync + 'static,
    A: RowAppender,
{
    let credentials = credentials
        .credentials()
        .context("Could not obtain credentials")?;

    let active = sensor
        .is_active()
        .context("Could not read motion sensor")?;
    let reading = Reading::new(active, device_id);
    log::info!(
        "Motion {} at {} on {}",
        if reading.active { "detected" } else { "not detected" },
        reading.timestamp,
        reading.device_id
    );

    let response = appender
        .append_row(&credentials.authorization_header(), reading.to_row())
        .context("Could not append reading to spreadsheet")?;
    log::debug!("Append response: {}", response);
    Ok(response)
}
