use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Connection and launch settings for a WebDriver session.
pub struct DriverOptions {
    /// WebDriver endpoint (chromedriver by default).
    pub webdriver_url: String,
    pub headless: bool,
    /// Upper bound for a single navigation.
    pub page_load_timeout: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            page_load_timeout: Duration::from_secs(60),
        }
    }
}

/// Construct Chrome command‑line arguments for the session.
pub fn build_chrome_arguments(options: &DriverOptions) -> Vec<String> {
    let mut args = vec![
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
    ];
    if options.headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}
