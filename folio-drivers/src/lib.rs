//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver session and the page/element helpers
//! used to load articles and read their markup.
//!
//! - [`folio_browser::driver::FolioDriver`]: WebDriver client wrapper
//! - [`folio_browser::page::FolioPage`]: DOM queries on the loaded page
//! - [`folio_browser::page::FolioElement`]: markup and attribute access
//! - [`folio_browser::options::DriverOptions`]: endpoint, headless mode and timeouts
pub mod folio_browser;
