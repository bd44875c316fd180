use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use ureq::Agent;
use url::Url;

use crate::config::SheetTarget;

const VALUE_INPUT_OPTION: &str = "RAW";

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("invalid Sheets API base URL: {0}")]
    BaseUrl(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] ureq::Error),
    #[error("Sheets API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

pub trait RowAppender {
    /// Append `row` below the last row of the target table, returning the
    /// service response
    fn append_row(&self, authorization: &str, row: Vec<Value>) -> Result<Value, SheetsError>;
}

#[derive(Serialize)]
struct ValueRange {
    values: Vec<Vec<Value>>,
}

/// `spreadsheets.values.append` against one spreadsheet range
pub struct SheetsClient {
    agent: Agent,
    base_url: Url,
    target: SheetTarget,
    user_agent: String,
}

impl SheetsClient {
    pub fn new(
        agent: Agent,
        base_url: &str,
        target: SheetTarget,
        user_agent: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::BaseUrl(base_url.to_string()));
        }
        Ok(SheetsClient {
            agent,
            base_url,
            target,
            user_agent: user_agent.into(),
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}:append?valueInputOption=RAW`
    pub fn append_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let range_action = format!("{}:append", self.target.range);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v4",
                "spreadsheets",
                self.target.spreadsheet_id.as_str(),
                "values",
                range_action.as_str(),
            ]);
        }
        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT_OPTION);
        url
    }
}

impl RowAppender for SheetsClient {
    fn append_row(&self, authorization: &str, row: Vec<Value>) -> Result<Value, SheetsError> {
        let url = self.append_url();
        log::debug!("POST {}", url);

        let mut response = self
            .agent
            .post(url.as_str())
            .header("Authorization", authorization)
            .header("User-Agent", &self.user_agent)
            .send_json(&ValueRange { values: vec![row] })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.body_mut().read_json::<Value>()?)
    }
}
