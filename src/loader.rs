//! Catalog page loader.
//!
//! Fetches the course catalog page over HTTP and hands the body to the
//! extractor. One blocking request, no retries, no caching; a transport
//! error or non-success status is fatal and returned to the caller.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{Result, ScraperError};
use crate::extractor::{CourseExtractor, CourseMap, ExtractorConfig};

/// URL of the HTW Saar module database.
pub const MODULEDB_URL: &str = "https://moduledb.htwsaar.de/";

/// Configuration for catalog page loading.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent string to use.
    pub user_agent: String,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "moduledb-scraper/0.1".to_string(),
            follow_redirects: true,
        }
    }
}

impl LoaderConfig {
    /// Set the request timeout in seconds.
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set whether redirects are followed.
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}

/// Loads the course catalog from a URL.
///
/// # Examples
///
/// ```rust,no_run
/// use moduledb_scraper::loader::{CourseLoader, MODULEDB_URL};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let loader = CourseLoader::new(MODULEDB_URL)?;
///     let courses = loader.load()?;
///
///     for (abbreviation, url) in &courses {
///         println!("{abbreviation}: {url}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CourseLoader {
    /// URL to load from.
    url: String,
    /// HTTP client for making requests.
    client: Client,
    /// Extractor applied to the fetched body.
    extractor: CourseExtractor,
}

impl CourseLoader {
    /// Create a loader for the given URL with default configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new<S: Into<String>>(url: S) -> Result<Self> {
        Self::with_config(url, LoaderConfig::default(), ExtractorConfig::default())
    }

    /// Create a loader with custom loader and extractor configuration.
    pub fn with_config<S: Into<String>>(
        url: S,
        config: LoaderConfig,
        extractor_config: ExtractorConfig,
    ) -> Result<Self> {
        let url = url.into();

        if url::Url::parse(&url).is_err() {
            return Err(ScraperError::configuration(format!("Invalid URL: {url}")));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| {
                ScraperError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            client,
            extractor: CourseExtractor::with_config(extractor_config),
        })
    }

    /// Get the URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the catalog page and return the response body.
    ///
    /// The request blocks until the server answers or the timeout
    /// elapses. A non-success status is an error; the body is never read
    /// after a failed request.
    pub fn fetch(&self) -> Result<Vec<u8>> {
        debug!("Fetching course catalog from {}", self.url);

        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Http {
                status,
                url: self.url.clone(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    /// Fetch the catalog page and extract the course mapping from it.
    pub fn load(&self) -> Result<CourseMap> {
        let body = self.fetch()?;
        let courses = self.extractor.extract(&body)?;

        info!("Loaded {} courses from {}", courses.len(), self.url);
        Ok(courses)
    }
}

/// Fetch the HTW Saar module database and return the course mapping.
///
/// Convenience wrapper around [`CourseLoader`] with all defaults.
pub fn fetch_courses() -> Result<CourseMap> {
    CourseLoader::new(MODULEDB_URL)?.load()
}
