use crate::folio_browser::{
    options::{build_chrome_arguments, DriverOptions},
    page::FolioPage,
};
use anyhow::{Context, Result};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct FolioDriver {
    pub client: Client,
    pub options: DriverOptions,
}

impl FolioDriver {
    /// Create a new driver connected to a running WebDriver service.
    pub async fn new(options: DriverOptions) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();
        chrome_opts.insert("args".to_string(), json!(build_chrome_arguments(&options)));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&options.webdriver_url)
            .await
            .with_context(|| format!("failed to connect to WebDriver at {}", options.webdriver_url))?;

        client
            .update_timeouts(TimeoutConfiguration::new(
                None,
                Some(options.page_load_timeout),
                None,
            ))
            .await
            .context("failed to set page load timeout")?;

        info!(
            target: "browser.session",
            endpoint = %options.webdriver_url,
            headless = options.headless,
            "webdriver session opened"
        );

        Ok(Self { client, options })
    }

    /// Navigate to `url` and return a [`FolioPage`] bound to the loaded document.
    pub async fn goto(&self, url: &Url) -> Result<FolioPage> {
        debug!(target: "browser.session", %url, "navigating");
        self.client
            .goto(url.as_str())
            .await
            .with_context(|| format!("failed to load {url}"))?;
        Ok(FolioPage::new(self.client.clone()))
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!(target: "browser.session", "webdriver session closed");
        Ok(())
    }
}
