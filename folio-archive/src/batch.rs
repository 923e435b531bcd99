//! Sequential archiving of a list of articles over one browser session.

use crate::browser::PageSession;
use crate::links::LinkEntry;
use crate::pipeline::{ArchivePipeline, ArticleReport};
use folio_common::FolioError;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug)]
pub enum ArticleStatus {
    Archived(ArticleReport),
    Failed(FolioError),
}

/// Result of one links-file entry.
#[derive(Debug)]
pub struct ArticleOutcome {
    /// The entry as written in the links file.
    pub source: String,
    pub line: usize,
    pub status: ArticleStatus,
}

impl ArticleOutcome {
    pub fn is_archived(&self) -> bool {
        matches!(self.status, ArticleStatus::Archived(_))
    }
}

impl fmt::Display for ArticleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ArticleStatus::Archived(report) => {
                write!(f, "archived  {} -> {}", self.source, report.folder.root.display())?;
                if !report.skipped_images.is_empty() {
                    write!(f, " ({} image(s) skipped)", report.skipped_images.len())?;
                }
                Ok(())
            }
            ArticleStatus::Failed(err) => write!(f, "failed    {}: {err}", self.source),
        }
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ArticleOutcome>,
}

impl BatchReport {
    pub fn archived(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_archived()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.archived()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ArticleOutcome, &FolioError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            ArticleStatus::Failed(err) => Some((o, err)),
            ArticleStatus::Archived(_) => None,
        })
    }
}

pub struct BatchRunner<'a> {
    pipeline: &'a ArchivePipeline,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: &'a ArchivePipeline) -> Self {
        Self { pipeline }
    }

    /// Archive every entry in order, reusing `session` throughout.
    ///
    /// A failing entry is recorded and the batch moves on to the next one.
    pub async fn run_all<S: PageSession>(
        &self,
        session: &mut S,
        entries: Vec<LinkEntry>,
    ) -> BatchReport {
        let total = entries.len();
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(total),
        };
        info!(total, "batch.start");

        for (done, entry) in (1usize..).zip(entries) {
            let status = match entry.parsed {
                Ok(article) => match self.pipeline.archive(session, &article).await {
                    Ok(article_report) => ArticleStatus::Archived(article_report),
                    Err(err) => ArticleStatus::Failed(err),
                },
                Err(err) => ArticleStatus::Failed(err),
            };

            match &status {
                ArticleStatus::Archived(_) => {
                    info!(done, total, url = %entry.raw, status = "archived", "batch.progress")
                }
                ArticleStatus::Failed(err) => warn!(
                    done,
                    total,
                    url = %entry.raw,
                    line = entry.line,
                    status = "failed",
                    error = %err,
                    "batch.progress"
                ),
            }

            report.outcomes.push(ArticleOutcome {
                source: entry.raw,
                line: entry.line,
                status,
            });
        }

        info!(
            total,
            archived = report.archived(),
            failed = report.failed(),
            "batch.done"
        );
        report
    }
}
