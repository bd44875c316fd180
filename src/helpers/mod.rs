mod commands;
mod load_dotenv;
mod time;

pub use commands::open_browser;
pub use load_dotenv::load_dotenv;
pub use time::{now_local, parse_local};

pub mod base_path;
