//! Course catalog extraction for the HTW Saar module database.
//!
//! This crate fetches the module database page and extracts a lookup
//! table mapping a short course abbreviation to its detail-page URL. It
//! includes:
//!
//! - **Extractor**: locates the marker table in the page markup, skips
//!   the header row, and collects (abbreviation, URL) pairs while
//!   tolerating malformed rows
//! - **Loader**: performs the single blocking HTTP fetch of the catalog
//!   page and runs the extractor over the body
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use moduledb_scraper::prelude::*;
//!
//! fn main() -> Result<(), ScraperError> {
//!     // One blocking fetch of the module database, then extraction.
//!     let courses = fetch_courses()?;
//!
//!     if let Some(url) = courses.get("PRG1") {
//!         println!("Programmierung 1: {url}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Extraction is independent of the network: [`extract_courses`] accepts
//! raw page bytes directly.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractor;
pub mod loader;

pub use crate::error::{Result, ScraperError};
pub use crate::extractor::{extract_courses, CourseExtractor, CourseMap, ExtractorConfig};
pub use crate::loader::{fetch_courses, CourseLoader, LoaderConfig, MODULEDB_URL};

/// Re-export commonly used types and functions.
pub mod prelude {
    pub use crate::error::{Result as ScraperResult, ScraperError};
    pub use crate::extractor::{extract_courses, CourseExtractor, CourseMap, ExtractorConfig};
    pub use crate::loader::{fetch_courses, CourseLoader, LoaderConfig, MODULEDB_URL};
}
