use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const LOG_LEVEL: &str = "info";

pub const APPLICATION_NAME: &str = "raspi-sensor-sample";
pub const DEVICE_ID: &str = "RasPi.0";

pub const SPREADSHEET_ID: &str = "1SpW44RSzx5zFnnSJgH_H_w4e788FNxTfANffqdqNUAE";
pub const SHEET_RANGE: &str = "Sheet1!A1:C1";
pub const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

// BCM numbering
pub const GPIO_PIN: u32 = 4;
pub const GPIO_SYSFS_ROOT: &str = "/sys/class/gpio";

pub const CLIENT_SECRET_FILE: &str = "client_secret.json";
pub const CREDENTIALS_DIR: &str = ".credentials";
pub const CREDENTIALS_FILE: &str = "sheets.googleapis.raspi-sensor-sample.json";

pub const AUTH_HOST_NAME: &str = "localhost";
pub const AUTH_HOST_PORTS: &[u16] = &[8080, 8090];
