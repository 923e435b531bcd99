use async_trait::async_trait;
use folio_common::{FolioError, Result};
use folio_drivers::folio_browser::driver::FolioDriver;
use folio_drivers::folio_browser::options::DriverOptions;
use folio_drivers::folio_browser::page::{FolioElement, FolioPage};
use tracing::debug;
use url::Url;

/// A browser tab that can load pages and query the loaded document.
#[async_trait]
pub trait PageSession: Send {
    type Element: PageElement;

    /// Load `url`; failures surface as [`FolioError::Navigation`].
    async fn navigate(&mut self, url: &Url) -> Result<()>;

    /// First element matching `selector` on the current page, if any.
    async fn select_first(&self, selector: &str) -> Result<Option<Self::Element>>;
}

/// An element handle on the loaded page.
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    async fn inner_html(&self) -> Result<String>;

    /// Descendants matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

/// Session backed by the fantoccini WebDriver driver.
pub struct WebDriverSession {
    driver: FolioDriver,
    page: Option<FolioPage>,
}

impl WebDriverSession {
    /// Connect to the WebDriver endpoint and open a browser session.
    pub async fn connect(options: DriverOptions) -> Result<Self> {
        let driver = FolioDriver::new(options)
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))?;
        Ok(Self::new(driver))
    }

    pub fn new(driver: FolioDriver) -> Self {
        Self { driver, page: None }
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.driver
            .close()
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))
    }
}

#[async_trait]
impl PageSession for WebDriverSession {
    type Element = FolioElement;

    async fn navigate(&mut self, url: &Url) -> Result<()> {
        self.page = None;
        let page = self
            .driver
            .goto(url)
            .await
            .map_err(|e| FolioError::Navigation {
                url: url.to_string(),
                message: format!("{e:#}"),
            })?;
        if let Ok(landed) = page.get_url().await {
            debug!(target: "browser.session", requested = %url, %landed, "page loaded");
        }
        self.page = Some(page);
        Ok(())
    }

    async fn select_first(&self, selector: &str) -> Result<Option<FolioElement>> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| FolioError::Browser("no page loaded".into()))?;
        page.find_element(selector)
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))
    }
}

#[async_trait]
impl PageElement for FolioElement {
    async fn inner_html(&self) -> Result<String> {
        self.get_inner_html()
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        self.find_elements(selector)
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.get_attribute(name)
            .await
            .map_err(|e| FolioError::Browser(format!("{e:#}")))
    }
}
