use anyhow::{Context, Result};
use folio_archive::{
    ArchivePipeline, ArchiveStore, BatchReport, BatchRunner, PipelineOptions, WebDriverSession,
    read_links,
};
use folio_common::observability::{LogConfig, LogFormat, init_logging};
use folio_config::{DEFAULT_CONFIG_FILE, FolioConfig, FolioConfigLoader, LogFormatSetting};
use folio_drivers::folio_browser::options::DriverOptions;
use folio_http::{AssetFetcher, FetchOptions};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins over folio.yaml)
    let cfg: FolioConfig = FolioConfigLoader::new()
        .with_optional_file(DEFAULT_CONFIG_FILE)
        .load()
        .context("failed to load configuration")?;

    let log_path = init_logging(log_config(&cfg))?;
    tracing::debug!(log_path = %log_path.display(), "logging initialised");

    let entries = read_links(&cfg.links_file).await?;
    println!(
        "Archiving {} article(s) from {}",
        entries.len(),
        cfg.links_file.display()
    );

    let fetcher = AssetFetcher::new(fetch_options(&cfg))?;
    let pipeline = ArchivePipeline::new(
        ArchiveStore::new(&cfg.archive_root),
        fetcher,
        pipeline_options(&cfg),
    );

    let mut session = WebDriverSession::connect(driver_options(&cfg)).await?;
    let report = BatchRunner::new(&pipeline)
        .run_all(&mut session, entries)
        .await;
    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "failed to close browser session");
    }

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    println!(
        "{} archived, {} failed",
        report.archived(),
        report.failed()
    );
}

fn log_config(cfg: &FolioConfig) -> LogConfig {
    LogConfig {
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.emit_stderr,
        format: match cfg.logging.format {
            LogFormatSetting::Text => LogFormat::Text,
            LogFormatSetting::Json => LogFormat::Json,
        },
        default_filter: cfg.logging.filter.clone(),
        ..LogConfig::default()
    }
}

fn fetch_options(cfg: &FolioConfig) -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(cfg.fetch.timeout_secs),
        connect_timeout: Duration::from_secs(cfg.fetch.connect_timeout_secs),
        user_agent: cfg.fetch.user_agent.clone(),
    }
}

fn driver_options(cfg: &FolioConfig) -> DriverOptions {
    DriverOptions {
        webdriver_url: cfg.browser.webdriver_url.clone(),
        headless: cfg.browser.headless,
        page_load_timeout: Duration::from_secs(cfg.browser.page_load_timeout_secs),
    }
}

fn pipeline_options(cfg: &FolioConfig) -> PipelineOptions {
    PipelineOptions {
        content_selector: cfg.content_selector.clone(),
        image_selector: cfg.image_selector.clone(),
        save_original: cfg.save_original,
        marker_attribute: cfg.marker_attribute.clone(),
        refetch_images: cfg.refetch_images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_maps_onto_component_options() {
        let cfg = FolioConfigLoader::new()
            .with_yaml_str(
                r#"
content_selector: article
marker_attribute: alt
browser:
  headless: false
  page_load_timeout_secs: 10
fetch:
  timeout_secs: 3
logging:
  format: json
  filter: debug
"#,
            )
            .load()
            .unwrap();

        let pipeline = pipeline_options(&cfg);
        assert_eq!(pipeline.content_selector, "article");
        assert_eq!(pipeline.marker_attribute, "alt");
        assert!(pipeline.save_original);

        let driver = driver_options(&cfg);
        assert!(!driver.headless);
        assert_eq!(driver.page_load_timeout, Duration::from_secs(10));

        assert_eq!(fetch_options(&cfg).timeout, Duration::from_secs(3));

        let log = log_config(&cfg);
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.default_filter, "debug");
        assert_eq!(log.app_name, "folio");
    }
}
