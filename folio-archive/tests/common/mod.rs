#![allow(dead_code)]

use async_trait::async_trait;
use folio_archive::{ArchivePipeline, ArchiveStore, PageElement, PageSession, PipelineOptions};
use folio_common::{FolioError, Result};
use folio_http::{AssetFetcher, FetchOptions};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// In-memory stand-in for a browser element.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub html: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<FakeElement>,
}

impl FakeElement {
    pub fn image(src: Option<&str>) -> Self {
        let mut attributes = HashMap::new();
        if let Some(src) = src {
            attributes.insert("src".to_string(), src.to_string());
        }
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// A content region whose markup contains one `<img>` per entry in `srcs`.
    pub fn region(srcs: &[Option<&str>]) -> Self {
        let mut html = String::from("<h1>Title</h1>");
        for (i, src) in srcs.iter().enumerate() {
            match src {
                Some(src) => html.push_str(&format!("<p>para {i}</p><img src=\"{src}\">")),
                None => html.push_str(&format!("<p>para {i}</p><img>")),
            }
        }
        Self {
            html,
            attributes: HashMap::new(),
            children: srcs.iter().map(|src| Self::image(*src)).collect(),
        }
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn inner_html(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        assert_eq!(selector, "img");
        Ok(self.children.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }
}

/// Pages keyed by URL; a URL without a page fails navigation.
#[derive(Debug, Default)]
pub struct FakeSession {
    pub pages: HashMap<String, Option<FakeElement>>,
    pub visited: Vec<String>,
    current: Option<String>,
}

impl FakeSession {
    pub fn with_page(mut self, url: &str, region: Option<FakeElement>) -> Self {
        self.pages.insert(url.to_string(), region);
        self
    }
}

#[async_trait]
impl PageSession for FakeSession {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &Url) -> Result<()> {
        self.visited.push(url.to_string());
        if self.pages.contains_key(url.as_str()) {
            self.current = Some(url.to_string());
            Ok(())
        } else {
            self.current = None;
            Err(FolioError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".into(),
            })
        }
    }

    async fn select_first(&self, selector: &str) -> Result<Option<FakeElement>> {
        assert_eq!(selector, "section");
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| FolioError::Browser("no page loaded".into()))?;
        Ok(self.pages.get(current).cloned().flatten())
    }
}

pub fn pipeline(root: &Path) -> ArchivePipeline {
    pipeline_with(root, PipelineOptions::default())
}

pub fn pipeline_with(root: &Path, options: PipelineOptions) -> ArchivePipeline {
    let fetcher = AssetFetcher::new(FetchOptions {
        timeout: Duration::from_secs(5),
        ..FetchOptions::default()
    })
    .expect("client builds");
    ArchivePipeline::new(ArchiveStore::new(root), fetcher, options)
}
