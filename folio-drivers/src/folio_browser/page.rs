use anyhow::Result;
use fantoccini::{elements::Element, error::CmdError, Client, Locator};

/// Page wrapper providing element queries on the current document.
pub struct FolioPage {
    pub(crate) client: Client,
}

impl FolioPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Return the current page URL.
    pub async fn get_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }

    /// Find the first element matching a CSS selector, or `None` if absent.
    pub async fn find_element(&self, selector: &str) -> Result<Option<FolioElement>> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(FolioElement::new(element))),
            Err(err) if is_missing(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Find zero or more elements by CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<FolioElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements.into_iter().map(FolioElement::new).collect())
    }
}

fn is_missing(err: &CmdError) -> bool {
    err.is_no_such_element()
}

// =========================
// FolioElement Definition
// =========================

#[derive(Clone)]
/// Wrapper for DOM elements with typed helpers consistent with [`FolioPage`].
pub struct FolioElement {
    pub element: Element,
}

impl FolioElement {
    /// Construct an element wrapper.
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Find zero or more descendant elements by CSS selector, in document order.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<FolioElement>> {
        let elements = self.element.find_all(Locator::Css(selector)).await?;
        Ok(elements.into_iter().map(FolioElement::new).collect())
    }

    /// Return the element's inner HTML.
    pub async fn get_inner_html(&self) -> Result<String> {
        self.element.html(true).await.map_err(anyhow::Error::from)
    }

    /// Read an attribute value.
    pub async fn get_attribute(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }
}
