use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 digest of an article URL, used as its folder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(String);

impl ArticleId {
    /// Length of every identifier, in hex characters.
    pub const LEN: usize = 64;

    /// Hash the URL text exactly as given. Never fails.
    pub fn from_url(url: &str) -> Self {
        Self(hex::encode(Sha256::digest(url.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_digests() {
        assert_eq!(
            ArticleId::from_url("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            ArticleId::from_url("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn same_url_same_id() {
        let url = "https://example.com/a";
        assert_eq!(ArticleId::from_url(url), ArticleId::from_url(url));
    }

    #[test]
    fn different_urls_different_ids() {
        assert_ne!(
            ArticleId::from_url("https://example.com/a"),
            ArticleId::from_url("https://example.com/b")
        );
    }

    #[test]
    fn is_fixed_length_lowercase_hex() {
        for url in ["", "https://example.com/a", "not a url at all ✓"] {
            let id = ArticleId::from_url(url);
            assert_eq!(id.as_str().len(), ArticleId::LEN);
            assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
