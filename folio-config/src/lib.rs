//! Loader for Folio configuration with YAML + environment overlays.
//!
//! Sources are merged in order: an optional `folio.yaml` (or any file added
//! with [`FolioConfigLoader::with_file`]), inline YAML snippets, and finally
//! `FOLIO__`-prefixed environment variables, which win. Nested keys use `__`
//! as separator, so `FOLIO__BROWSER__HEADLESS=false` overrides
//! `browser.headless`. String values may reference `${VAR}` placeholders.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Default file looked up by the binary when present.
pub const DEFAULT_CONFIG_FILE: &str = "folio.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Line-delimited list of article URLs.
    pub links_file: PathBuf,
    /// Base directory holding one folder per archived article.
    pub archive_root: PathBuf,
    /// Selector of the content region extracted from each page.
    pub content_selector: String,
    /// Selector of the images inside the content region.
    pub image_selector: String,
    pub save_original: bool,
    /// Attribute that receives the local image path in `article.html`.
    pub marker_attribute: String,
    /// Download images again even when the local file already exists.
    pub refetch_images: bool,
    pub browser: BrowserConfig,
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            links_file: PathBuf::from("links.txt"),
            archive_root: PathBuf::from("savedArticles"),
            content_selector: "section".into(),
            image_selector: "img".into(),
            save_original: true,
            marker_attribute: "data-local-src".into(),
            refetch_images: false,
            browser: BrowserConfig::default(),
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub page_load_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            page_load_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 5,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatSetting {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormatSetting,
    pub emit_stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormatSetting::Text,
            emit_stderr: true,
            filter: "info".into(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (files + env overrides).
pub struct FolioConfigLoader {
    files: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FolioConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FolioConfigLoader {
    /// Start with no file sources; environment overrides are added at load time.
    ///
    /// ```
    /// use folio_config::FolioConfigLoader;
    ///
    /// let config = FolioConfigLoader::new()
    ///     .with_yaml_str("archive_root: /srv/articles")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.archive_root.to_str(), Some("/srv/articles"));
    /// assert_eq!(config.content_selector, "section");
    /// ```
    pub fn new() -> Self {
        Self {
            files: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files = self
            .files
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when it does not exist.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files = self
            .files
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use folio_config::{FolioConfigLoader, LogFormatSetting};
    ///
    /// let cfg = FolioConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// content_selector: "article"
    /// browser:
    ///   headless: false
    /// logging:
    ///   format: json
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.content_selector, "article");
    /// assert!(!cfg.browser.headless);
    /// assert_eq!(cfg.browser.webdriver_url, "http://localhost:9515");
    /// assert_eq!(cfg.logging.format, LogFormatSetting::Json);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.files = self
            .files
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into [`FolioConfig`].
    ///
    /// `${VAR}` placeholders are expanded after merging, so they may come from
    /// either the files or the environment overlay.
    pub fn load(self) -> Result<FolioConfig, ConfigError> {
        let cfg = self
            .files
            .add_source(
                Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
