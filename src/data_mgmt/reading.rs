use serde_json::{json, Value};

use crate::helpers;

/// One motion sample, sent as a single spreadsheet row
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub active: bool,
    pub timestamp: String,
    pub device_id: String,
}

impl Reading {
    /// Stamp a sensor state with the current local time
    pub fn new(active: bool, device_id: impl Into<String>) -> Self {
        Reading {
            active,
            timestamp: helpers::now_local(),
            device_id: device_id.into(),
        }
    }

    /// Columns in table order: state, timestamp, device
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            json!(self.active),
            json!(self.timestamp),
            json!(self.device_id),
        ]
    }
}
