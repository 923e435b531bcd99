//! Article archiving: fetch a page, keep its content region, localize images.
//!
//! - URL hashing into stable folder names (`hasher`)
//! - On-disk archive layout and exclusive writes (`store`)
//! - Image reference rewriting over extracted markup (`rewrite`)
//! - Browser seam and WebDriver-backed implementation (`browser`)
//! - Links file parsing (`links`)
//! - Per-article pipeline (`pipeline`) and sequential batch runner (`batch`)

pub mod batch;
pub mod browser;
pub mod hasher;
pub mod links;
pub mod pipeline;
pub mod rewrite;
pub mod store;

pub use batch::{ArticleOutcome, ArticleStatus, BatchReport, BatchRunner};
pub use browser::{PageElement, PageSession, WebDriverSession};
pub use hasher::ArticleId;
pub use links::{read_links, ArticleUrl, LinkEntry};
pub use pipeline::{ArchivePipeline, ArticleReport, PipelineOptions};
pub use store::{ArchiveFolder, ArchiveStore};
