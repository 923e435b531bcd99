//! Reading the line-delimited list of article URLs.

use crate::hasher::ArticleId;
use folio_common::{FolioError, Result};
use std::fmt;
use std::path::Path;
use url::Url;

/// An article URL as written in the input, plus its parsed form.
///
/// The identifier is derived from the text as written, so
/// `https://example.com` and `https://example.com/` archive separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUrl {
    raw: String,
    url: Url,
}

impl ArticleUrl {
    /// Accept absolute `http`/`https` URLs only.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| format!("`{raw}`: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("`{raw}`: unsupported scheme `{}`", url.scheme()));
        }
        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn id(&self) -> ArticleId {
        ArticleId::from_url(&self.raw)
    }
}

impl fmt::Display for ArticleUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One non-blank line of the links file.
#[derive(Debug)]
pub struct LinkEntry {
    /// 1-based line number in the source.
    pub line: usize,
    pub raw: String,
    pub parsed: Result<ArticleUrl>,
}

/// Split `text` into link entries, skipping blank lines.
pub fn parse_links(text: &str) -> Vec<LinkEntry> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_no = i + 1;
            let raw = line.trim().to_string();
            let parsed = ArticleUrl::parse(&raw).map_err(|message| FolioError::Parse {
                line: line_no,
                message,
            });
            LinkEntry {
                line: line_no,
                raw,
                parsed,
            }
        })
        .collect()
}

/// Read and parse a UTF-8 links file.
pub async fn read_links(path: &Path) -> Result<Vec<LinkEntry>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FolioError::io(path, e))?;
    Ok(parse_links(&text))
}
