//! On-disk layout of the archive.
//!
//! ```text
//! <archive_root>/<identifier>/
//!     images/image_0.png, image_1.png, ...
//!     videos/
//!     article_original.html
//!     article.html
//! ```

use crate::hasher::ArticleId;
use folio_common::{FolioError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const IMAGES_DIR: &str = "images";
// Reserved for media other than images; provisioned but never written.
pub const VIDEOS_DIR: &str = "videos";
pub const ORIGINAL_FILE: &str = "article_original.html";
pub const ARTICLE_FILE: &str = "article.html";

/// Root directory under which article folders are provisioned.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

/// Paths of one provisioned article folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFolder {
    pub root: PathBuf,
    pub images: PathBuf,
    pub videos: PathBuf,
}

impl ArchiveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Folder paths for `id`, without touching the filesystem.
    pub fn folder(&self, id: &ArticleId) -> ArchiveFolder {
        let root = self.root.join(id.as_str());
        ArchiveFolder {
            images: root.join(IMAGES_DIR),
            videos: root.join(VIDEOS_DIR),
            root,
        }
    }

    /// Create the article folder and its subfolders if absent.
    ///
    /// Re-provisioning an existing folder is a no-op. A non-directory in the
    /// way is reported as [`FolioError::Io`].
    pub async fn provision(&self, id: &ArticleId) -> Result<ArchiveFolder> {
        let folder = self.folder(id);
        for dir in [&folder.root, &folder.images, &folder.videos] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| FolioError::io(dir.clone(), e))?;
        }
        Ok(folder)
    }
}

impl ArchiveFolder {
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.images.join(format!("image_{index}.png"))
    }

    pub fn original_path(&self) -> PathBuf {
        self.root.join(ORIGINAL_FILE)
    }

    pub fn article_path(&self) -> PathBuf {
        self.root.join(ARTICLE_FILE)
    }
}

/// Create `path` exclusively and write `contents` into it.
///
/// Returns `Ok(false)` without touching the file when it already exists. A
/// failed write removes the partially written file.
pub async fn write_new(path: &Path, contents: &str) -> Result<bool> {
    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(FolioError::io(path, e)),
    };

    let written = async {
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path).await;
        return Err(FolioError::io(path, e));
    }
    Ok(true)
}
