//! Course table extraction from catalog markup.
//!
//! This module implements the structural extraction at the heart of the
//! crate: locate the marker table in a parsed HTML document, walk its body
//! rows past the header, and collect a detail-page URL and a course
//! abbreviation from each well-formed row. Irregular rows are tolerated
//! and skipped; only a missing table or missing body aborts extraction.

use std::collections::HashMap;

use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::error::{Result, ScraperError};

/// Mapping from course abbreviation to detail-page URL.
pub type CourseMap = HashMap<String, String>;

/// Configuration for course table extraction.
///
/// The defaults describe the layout of the HTW Saar module database page.
/// Making them configurable keeps the extraction logic testable against
/// synthetic documents with other shapes.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Exact `class` attribute value that marks the target table.
    pub marker_class: String,
    /// Minimum number of `td` cells a row must have to be usable. The
    /// abbreviation is read from the last required column.
    pub min_columns: usize,
    /// Number of leading `tr` rows discarded as header rows, regardless
    /// of their content.
    pub header_rows: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            marker_class: "pretty-table".to_string(),
            min_columns: 7,
            header_rows: 1,
        }
    }
}

impl ExtractorConfig {
    /// Set the marker class of the target table.
    pub fn with_marker_class<S: Into<String>>(mut self, marker_class: S) -> Self {
        self.marker_class = marker_class.into();
        self
    }

    /// Set the minimum number of cells a usable row must have.
    pub fn with_min_columns(mut self, min_columns: usize) -> Self {
        self.min_columns = min_columns;
        self
    }

    /// Set the number of header rows to discard.
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }
}

/// Outcome of examining a single data row.
///
/// Every failure mode at row granularity is a skip, never an error; the
/// reason is kept so the behavior stays testable and traceable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowOutcome {
    /// The row yielded a course entry.
    Matched {
        /// Trimmed abbreviation text from the label cell.
        abbreviation: String,
        /// Entity-unescaped link target from the first cell's anchor.
        url: String,
    },
    /// The row was discarded.
    Skipped(SkipReason),
}

/// Why a data row was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    /// Fewer cells than the configured minimum.
    TooFewCells(usize),
    /// No anchor element among the first cell's direct children.
    NoAnchor,
    /// The anchor carries no `href`, or it unescapes to an empty string.
    EmptyHref,
    /// The label cell's text content is empty after trimming.
    EmptyLabel,
}

/// Extracts the course table from raw catalog markup.
///
/// # Examples
///
/// ```
/// use moduledb_scraper::extractor::CourseExtractor;
///
/// let html = r#"
///   <table class="pretty-table"><tbody>
///     <tr><td>Module</td></tr>
///     <tr>
///       <td><a href="/m/1">Programmierung 1</a></td>
///       <td></td><td></td><td></td><td></td><td></td>
///       <td>PRG1</td>
///     </tr>
///   </tbody></table>
/// "#;
///
/// let courses = CourseExtractor::new().extract(html.as_bytes())?;
/// assert_eq!(courses.get("PRG1").map(String::as_str), Some("/m/1"));
/// # Ok::<(), moduledb_scraper::ScraperError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseExtractor {
    config: ExtractorConfig,
}

impl CourseExtractor {
    /// Create an extractor with the default catalog configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the extractor configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the course mapping from raw page bytes.
    ///
    /// An empty mapping is a valid result: it means every data row was
    /// skipped, or there were none. Only an undecodable body or a missing
    /// structural anchor (table, tbody) is an error.
    pub fn extract(&self, bytes: &[u8]) -> Result<CourseMap> {
        let body = std::str::from_utf8(bytes)
            .map_err(|e| ScraperError::parse(format!("body is not valid UTF-8: {e}")))?;
        let document = Html::parse_document(body);
        self.extract_from_document(&document)
    }

    fn extract_from_document(&self, document: &Html) -> Result<CourseMap> {
        let marker = self.config.marker_class.as_str();

        let table =
            find_marked_table(document, marker).ok_or_else(|| ScraperError::TableNotFound {
                marker: marker.to_string(),
            })?;

        // tbody must be a direct child of the table, not a deep descendant.
        let tbody = table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "tbody")
            .ok_or_else(|| ScraperError::BodyNotFound {
                marker: marker.to_string(),
            })?;

        let mut courses = CourseMap::new();

        // Stray non-tr nodes under tbody do not advance the row counter.
        let rows = tbody
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "tr");

        for (index, row) in rows.enumerate() {
            if index < self.config.header_rows {
                trace!(row = index + 1, "Discarding header row");
                continue;
            }

            let cells: Vec<ElementRef> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "td")
                .collect();

            match self.classify_row(&cells) {
                RowOutcome::Matched { abbreviation, url } => {
                    // Last write wins on duplicate abbreviations.
                    courses.insert(abbreviation, url);
                }
                RowOutcome::Skipped(reason) => {
                    trace!(row = index + 1, ?reason, "Skipping row");
                }
            }
        }

        debug!("Extracted {} course entries", courses.len());
        Ok(courses)
    }

    /// Examine one row's cells and either produce a course entry or a
    /// skip reason.
    fn classify_row(&self, cells: &[ElementRef]) -> RowOutcome {
        if cells.len() < self.config.min_columns {
            return RowOutcome::Skipped(SkipReason::TooFewCells(cells.len()));
        }

        // Only direct children of the first cell count; nested anchors are
        // not part of the expected layout.
        let Some(anchor) = cells
            .first()
            .into_iter()
            .flat_map(|cell| cell.children())
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")
        else {
            return RowOutcome::Skipped(SkipReason::NoAnchor);
        };

        // The parser has already entity-unescaped attribute values.
        let href = anchor.value().attr("href").unwrap_or_default();
        if href.is_empty() {
            return RowOutcome::Skipped(SkipReason::EmptyHref);
        }

        let label_index = self.config.min_columns.saturating_sub(1);
        let abbreviation = cells
            .get(label_index)
            .map(|cell| text_content(*cell))
            .unwrap_or_default();
        if abbreviation.is_empty() {
            return RowOutcome::Skipped(SkipReason::EmptyLabel);
        }

        RowOutcome::Matched {
            abbreviation,
            url: href.to_string(),
        }
    }
}

/// Extract the course mapping from raw page bytes with the default
/// catalog configuration.
///
/// This is the main entry point of the crate and is callable without any
/// network access, which keeps extraction deterministic to test.
pub fn extract_courses(bytes: &[u8]) -> Result<CourseMap> {
    CourseExtractor::new().extract(bytes)
}

/// Find the first table element, in pre-order document order, whose
/// `class` attribute value exactly equals the marker string.
///
/// Exact equality is intentional: `class="pretty-table wide"` does not
/// match, mirroring the catalog page's markup.
fn find_marked_table<'a>(document: &'a Html, marker: &str) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table" && el.value().attr("class") == Some(marker))
}

/// Concatenate every descendant text node of an element in document
/// order, with no inserted separators, and trim the result.
fn text_content(element: ElementRef) -> String {
    let text: String = element.text().collect();
    text.trim().to_string()
}
