mod post_status;

pub use post_status::{post_status, run_once};
