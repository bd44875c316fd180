pub const HOME: &str = "HOME";

pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const SPREADSHEET_ID: &str = "SPREADSHEET_ID";
pub const SHEET_RANGE: &str = "SHEET_RANGE";
pub const SHEETS_API_BASE_URL: &str = "SHEETS_API_BASE_URL";
pub const DEVICE_ID: &str = "DEVICE_ID";

pub const GPIO_PIN: &str = "GPIO_PIN";
pub const GPIO_SYSFS_ROOT: &str = "GPIO_SYSFS_ROOT";
pub const GPIO_ACTIVE_LOW: &str = "GPIO_ACTIVE_LOW";

pub const CLIENT_SECRET_FILE: &str = "CLIENT_SECRET_FILE";
pub const CREDENTIALS_PATH: &str = "CREDENTIALS_PATH";
