//! Archiving a single article: navigate, extract, localize images, persist.

use crate::browser::{PageElement, PageSession};
use crate::hasher::ArticleId;
use crate::links::ArticleUrl;
use crate::rewrite::rewrite_images;
use crate::store::{write_new, ArchiveFolder, ArchiveStore};
use folio_common::{FolioError, Result};
use folio_http::AssetFetcher;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// Per-run knobs for [`ArchivePipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Selector of the content region kept from each page.
    pub content_selector: String,
    /// Selector of the images inside the content region.
    pub image_selector: String,
    /// Keep the raw extracted markup as `article_original.html`.
    pub save_original: bool,
    /// Attribute that receives the local image path in `article.html`.
    pub marker_attribute: String,
    /// Download images again even when the local file already exists.
    pub refetch_images: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            content_selector: "section".into(),
            image_selector: "img".into(),
            save_original: true,
            marker_attribute: "data-local-src".into(),
            refetch_images: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub index: usize,
    pub source: Url,
    pub path: PathBuf,
    /// False when an existing local copy was kept instead of downloading.
    pub downloaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    pub index: usize,
    pub reason: String,
}

/// What one pipeline run did for an article.
#[derive(Debug, Clone)]
pub struct ArticleReport {
    pub url: String,
    pub id: ArticleId,
    pub folder: ArchiveFolder,
    pub saved_images: Vec<SavedImage>,
    pub skipped_images: Vec<SkippedImage>,
    /// `article_original.html` was created by this run.
    pub original_written: bool,
    /// `article.html` was created by this run.
    pub article_written: bool,
}

pub struct ArchivePipeline {
    store: ArchiveStore,
    fetcher: AssetFetcher,
    options: PipelineOptions,
}

impl ArchivePipeline {
    pub fn new(store: ArchiveStore, fetcher: AssetFetcher, options: PipelineOptions) -> Self {
        Self {
            store,
            fetcher,
            options,
        }
    }

    /// Archive one article through `session`.
    ///
    /// Navigation, lookup, provisioning and HTML writes abort the article;
    /// image failures are recorded in the report and skipped.
    pub async fn archive<S: PageSession>(
        &self,
        session: &mut S,
        article: &ArticleUrl,
    ) -> Result<ArticleReport> {
        let url = article.url();
        session.navigate(url).await?;

        let region = session
            .select_first(&self.options.content_selector)
            .await?
            .ok_or_else(|| FolioError::NotFound {
                selector: self.options.content_selector.clone(),
                url: article.to_string(),
            })?;
        let html = region.inner_html().await?;

        let id = article.id();
        let folder = self.store.provision(&id).await?;
        debug!(%url, identifier = %id, folder = %folder.root.display(), "archive.folder.ready");

        let (saved_images, skipped_images) = self.save_images(&region, url, &folder).await?;

        let original_written = if self.options.save_original {
            write_new(&folder.original_path(), &html).await?
        } else {
            false
        };

        let local_paths: BTreeMap<usize, String> = saved_images
            .iter()
            .map(|img| (img.index, img.path.to_string_lossy().into_owned()))
            .collect();
        let rewritten = rewrite_images(
            &html,
            &self.options.image_selector,
            &self.options.marker_attribute,
            &local_paths,
        )
        .map_err(|e| FolioError::Markup(e.to_string()))?;
        let article_written = write_new(&folder.article_path(), &rewritten).await?;

        info!(
            %url,
            identifier = %id,
            images = saved_images.len(),
            skipped = skipped_images.len(),
            original_written,
            article_written,
            "archive.article.done"
        );

        Ok(ArticleReport {
            url: article.to_string(),
            id,
            folder,
            saved_images,
            skipped_images,
            original_written,
            article_written,
        })
    }

    async fn save_images<E: PageElement>(
        &self,
        region: &E,
        page_url: &Url,
        folder: &ArchiveFolder,
    ) -> Result<(Vec<SavedImage>, Vec<SkippedImage>)> {
        let images = region.find_all(&self.options.image_selector).await?;
        let mut saved = Vec::with_capacity(images.len());
        let mut skipped = Vec::new();

        for (index, image) in images.iter().enumerate() {
            let source = match image_source(image, page_url).await {
                Ok(source) => source,
                Err(reason) => {
                    warn!(%page_url, index, %reason, "archive.image.skipped");
                    skipped.push(SkippedImage { index, reason });
                    continue;
                }
            };

            let path = folder.image_path(index);
            if !self.options.refetch_images && tokio::fs::try_exists(&path).await.unwrap_or(false)
            {
                debug!(%page_url, index, path = %path.display(), "archive.image.kept");
                saved.push(SavedImage {
                    index,
                    source,
                    path,
                    downloaded: false,
                });
                continue;
            }

            match self.fetcher.fetch(&source, &path).await {
                Ok(bytes) => {
                    debug!(%page_url, index, %source, bytes, "archive.image.saved");
                    saved.push(SavedImage {
                        index,
                        source,
                        path,
                        downloaded: true,
                    });
                }
                Err(err) => {
                    let reason = err.to_string();
                    warn!(%page_url, index, %source, %reason, "archive.image.skipped");
                    skipped.push(SkippedImage { index, reason });
                }
            }
        }

        Ok((saved, skipped))
    }
}

/// Resolve an image's `src` against the page URL.
///
/// Missing, empty, unparsable or non-HTTP sources are reported as a skip
/// reason rather than an error.
async fn image_source<E: PageElement>(
    image: &E,
    page_url: &Url,
) -> std::result::Result<Url, String> {
    let raw = match image.attribute("src").await {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return Err("missing src attribute".to_string()),
        Err(e) => return Err(format!("could not read src attribute: {e}")),
    };
    let source = page_url
        .join(raw.trim())
        .map_err(|e| format!("malformed src `{raw}`: {e}"))?;
    if !matches!(source.scheme(), "http" | "https") {
        return Err(format!("unsupported src scheme `{}`", source.scheme()));
    }
    Ok(source)
}
