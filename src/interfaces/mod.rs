pub mod gpio;
pub mod http;
pub mod oauth;
pub mod sheets;
