use std::process::{Command, Stdio};

const BROWSER_OPENERS: &[&str] = &["xdg-open", "open"];

/// Try to open `url` in a desktop browser. Returns whether any opener launched.
pub fn open_browser(url: &str) -> bool {
    for opener in BROWSER_OPENERS {
        match Command::new(opener)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => {
                log::debug!("Launched {} for authorization URL", opener);
                return true;
            }
            Err(e) => log::debug!("Could not run {}: {}", opener, e),
        }
    }
    false
}
