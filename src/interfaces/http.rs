use std::time::Duration;

use ureq::tls::{TlsConfig, TlsProvider};
use ureq::Agent;

/// Blocking HTTP agent shared by the token endpoint and the Sheets API.
///
/// Non-2xx responses are returned as normal responses so callers can
/// surface the error body.
pub fn build_agent(timeout: Duration) -> Agent {
    let config = Agent::config_builder()
        .tls_config(
            TlsConfig::builder()
                .provider(TlsProvider::NativeTls)
                .build(),
        )
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build();
    Agent::new_with_config(config)
}
