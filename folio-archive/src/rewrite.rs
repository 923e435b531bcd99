//! Image reference rewriting built on `lol_html`.

use lol_html::errors::{RewritingError, SelectorError};
use lol_html::{rewrite_str, ElementContentHandlers, RewriteStrSettings, Selector};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Mark every image element that has a local copy with its local path.
///
/// Images are counted in document order over `image_selector` matches; the
/// image at position `i` receives `attribute="<local_paths[i]>"`. Images
/// without an entry (skipped downloads) are left untouched, as is all other
/// markup.
pub fn rewrite_images(
    html: &str,
    image_selector: &str,
    attribute: &str,
    local_paths: &BTreeMap<usize, String>,
) -> Result<String, RewriteError> {
    let selector: Selector = image_selector.parse().map_err(RewriteError::Selector)?;

    let mut index = 0usize;
    let handlers = ElementContentHandlers::default().element(|el| {
        if let Some(path) = local_paths.get(&index) {
            el.set_attribute(attribute, path)?;
        }
        index += 1;
        Ok(())
    });

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![(Cow::Owned(selector), handlers)],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(RewriteError::Rewrite)
}

/// Errors surfaced while rewriting markup.
#[derive(Debug)]
pub enum RewriteError {
    /// The image selector is not a supported CSS selector.
    Selector(SelectorError),
    /// The rewriter rejected the markup or a handler failed.
    Rewrite(RewritingError),
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(err) => write!(f, "invalid image selector: {err}"),
            Self::Rewrite(err) => write!(f, "html rewrite error: {err}"),
        }
    }
}

impl Error for RewriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Selector(err) => Some(err),
            Self::Rewrite(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[(usize, &str)]) -> BTreeMap<usize, String> {
        entries.iter().map(|(i, p)| (*i, p.to_string())).collect()
    }

    #[test]
    fn marks_images_in_document_order() {
        let html = r#"<p>intro</p><img src="a.png"><div><img src="b.png"></div><img src="c.png">"#;
        let local = paths(&[
            (0, "images/image_0.png"),
            (1, "images/image_1.png"),
            (2, "images/image_2.png"),
        ]);

        let out = rewrite_images(html, "img", "data-local-src", &local).unwrap();

        assert_eq!(out.matches("<img").count(), 3);
        let a = out.find(r#"data-local-src="images/image_0.png""#).unwrap();
        let b = out.find(r#"data-local-src="images/image_1.png""#).unwrap();
        let c = out.find(r#"data-local-src="images/image_2.png""#).unwrap();
        assert!(a < b && b < c);
        assert!(out.contains(r#"src="a.png""#));
        assert!(out.starts_with("<p>intro</p>"));
    }

    #[test]
    fn unmapped_images_are_left_untouched() {
        let html = r#"<img src="a.png"><img><img src="c.png">"#;
        let local = paths(&[(0, "p0"), (2, "p2")]);

        let out = rewrite_images(html, "img", "data-local-src", &local).unwrap();

        assert_eq!(
            out,
            r#"<img src="a.png" data-local-src="p0"><img><img src="c.png" data-local-src="p2">"#
        );
    }

    #[test]
    fn can_target_the_alt_attribute() {
        let html = r#"<img src="a.png" alt="a chart">"#;
        let local = paths(&[(0, "savedArticles/x/images/image_0.png")]);

        let out = rewrite_images(html, "img", "alt", &local).unwrap();

        assert_eq!(
            out,
            r#"<img src="a.png" alt="savedArticles/x/images/image_0.png">"#
        );
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let err = rewrite_images("<img>", "img[", "alt", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, RewriteError::Selector(_)));
    }

    #[test]
    fn markup_without_images_is_unchanged() {
        let html = "<h1>Title</h1><p>No pictures here.</p>";
        let out = rewrite_images(html, "img", "data-local-src", &BTreeMap::new()).unwrap();
        assert_eq!(out, html);
    }
}
