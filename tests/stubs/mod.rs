#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeDelta, Utc};
use serde_json::{json, Value};

pub const SPREADSHEET_ID: &str = "sheet-123";
pub const APPEND_PATH: &str = "/v4/spreadsheets/sheet-123/values/Sheet1!A1:C1:append";
pub const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Lay out `<root>/gpio4/{direction,value}` the way sysfs does
pub fn fake_gpio(root: &Path, level: &str) -> PathBuf {
    let gpio_root = root.join("gpio");
    let pin_dir = gpio_root.join("gpio4");
    fs::create_dir_all(&pin_dir).unwrap();
    fs::write(pin_dir.join("direction"), "in\n").unwrap();
    fs::write(pin_dir.join("value"), format!("{level}\n")).unwrap();
    gpio_root
}

pub fn stored_credentials(access_token: &str, expires_in_secs: i64, token_uri: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": "1/refresh",
        "token_expiry": (Utc::now() + TimeDelta::seconds(expires_in_secs)).to_rfc3339(),
        "client_id": "client-id",
        "client_secret": "client-secret",
        "token_uri": token_uri,
        "scopes": [SCOPE],
        "token_type": "Bearer",
        "invalid": false
    })
}

pub fn write_client_secret(dir: &Path, token_uri: &str) {
    let secret = json!({
        "installed": {
            "client_id": "client-id",
            "client_secret": "client-secret",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": token_uri,
            "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
        }
    });
    fs::write(dir.join("client_secret.json"), secret.to_string()).unwrap();
}

pub fn write_credentials(path: &Path, credentials: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec(credentials).unwrap()).unwrap();
}

pub fn append_response() -> Value {
    json!({
        "spreadsheetId": SPREADSHEET_ID,
        "tableRange": "Sheet1!A1:C7",
        "updates": {
            "spreadsheetId": SPREADSHEET_ID,
            "updatedRange": "Sheet1!A8:C8",
            "updatedRows": 1,
            "updatedColumns": 3,
            "updatedCells": 3
        }
    })
}
