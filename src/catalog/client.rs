//! Catalog client implementation

use super::types::{
    decode_slug, language_code_from_key, language_name, normalize_subjects, path_to_slug,
    AuthorRef, Book, BookSummary, RawAuthor, RawDetails, RawSearchPage, RawSubjectPage,
    SearchPage, SubjectPage, TextOrValue,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig};
use futures::future::join_all;
use std::time::Duration;
use tracing::debug;

/// Default subject shown on the landing listing
pub const DEFAULT_SUBJECT: &str = "fantasy";

/// Default number of works in a subject listing
pub const DEFAULT_BROWSE_LIMIT: u32 = 12;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: u32 = 24;

/// At most this many authors are resolved per book
const MAX_AUTHORS: usize = 6;

/// Name shown when an author record cannot be resolved
const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Cover placeholder for books without one
const PLACEHOLDER_COVER: &str = "https://placehold.co/600x800?text=No+Cover";

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog API base URL
    pub base_url: String,
    /// Cover image base URL
    pub covers_base_url: String,
    /// Total fetch attempts per request
    pub retries: u32,
    /// Base delay for linear backoff between attempts
    pub base_delay: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Optional courtesy rate limiter
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            covers_base_url: "https://covers.openlibrary.org".to_string(),
            retries: 3,
            base_delay: Duration::from_millis(1000),
            timeout: Duration::from_secs(10),
            rate_limit: None,
        }
    }
}

/// Client for the external catalog service
#[derive(Debug)]
pub struct CatalogClient {
    http: HttpClient,
    base_url: String,
    covers_base_url: String,
}

impl CatalogClient {
    /// Create a catalog client from configuration
    pub fn new(config: CatalogConfig) -> Self {
        let mut builder = HttpClientConfig::builder()
            .base_url(&config.base_url)
            .retries(config.retries)
            .base_delay(config.base_delay)
            .timeout(config.timeout);

        if let Some(rate_limit) = config.rate_limit.clone() {
            builder = builder.rate_limit(rate_limit);
        }

        Self {
            http: HttpClient::with_config(builder.build()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            covers_base_url: config.covers_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Probe catalog reachability with a minimal subject request
    pub async fn check(&self) -> Result<()> {
        let url = format!("/subjects/{DEFAULT_SUBJECT}.json");
        self.http
            .get_with_config(&url, RequestConfig::new().query("limit", "1"))
            .await?;
        Ok(())
    }

    /// List works filed under a subject
    pub async fn browse_subject(&self, subject: &str, limit: u32) -> Result<SubjectPage> {
        let subject = subject.trim().to_lowercase();
        if subject.is_empty() {
            return Err(Error::validation("subject must not be empty"));
        }

        let url = format!("/subjects/{subject}.json");
        let raw: RawSubjectPage = self
            .http
            .get_json_with_config(&url, RequestConfig::new().query("limit", limit.to_string()))
            .await?;

        let works = raw
            .works
            .into_iter()
            .filter_map(|work| {
                let key = work.key?;
                let title = work.title.unwrap_or_else(|| "Untitled".to_string());
                let authors = work
                    .authors
                    .into_iter()
                    .map(|author| AuthorRef {
                        key: author.key,
                        name: author.name.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
                    })
                    .collect();
                Some(BookSummary {
                    slug: path_to_slug(&key),
                    cover_url: self.cover_url(work.cover_id),
                    cover_id: work.cover_id,
                    key,
                    title,
                    authors,
                })
            })
            .collect();

        Ok(SubjectPage {
            subject: raw.name.unwrap_or(subject),
            works,
        })
    }

    /// Full-text search across the catalog
    pub async fn search(&self, query: &str, limit: u32) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("search query must not be empty"));
        }

        let raw: RawSearchPage = self
            .http
            .get_json_with_config(
                "/search.json",
                RequestConfig::new()
                    .query("q", query)
                    .query("limit", limit.to_string()),
            )
            .await?;

        let books = raw
            .docs
            .into_iter()
            .filter_map(|doc| {
                // Documents without any usable key cannot link anywhere
                let key = doc.best_key()?;
                let title = doc.title.clone().unwrap_or_else(|| "Untitled".to_string());
                let authors = doc
                    .author_name
                    .iter()
                    .map(|name| AuthorRef {
                        key: None,
                        name: name.clone(),
                    })
                    .collect();
                Some(BookSummary {
                    slug: path_to_slug(&key),
                    cover_url: self.cover_url(doc.cover_i),
                    cover_id: doc.cover_i,
                    key,
                    title,
                    authors,
                })
            })
            .collect();

        Ok(SearchPage {
            num_found: raw.num_found,
            books,
        })
    }

    /// Fetch and normalize one book's detail by slug
    ///
    /// The slug addresses either a work (`works-...`) or an edition
    /// (`books-...`). Authors are resolved concurrently; a failed author
    /// lookup degrades to an anonymous name and never fails the page.
    pub async fn book_detail(&self, slug: &str) -> Result<Book> {
        let path = decode_slug(slug).ok_or_else(|| Error::InvalidSlug {
            slug: slug.to_string(),
        })?;

        let details: RawDetails = self.http.get_json(&format!("{path}.json")).await?;
        debug!("fetched catalog detail for {}", path);

        let author_keys: Vec<String> = details
            .authors
            .iter()
            .filter_map(|entry| entry.author_key().map(ToString::to_string))
            .take(MAX_AUTHORS)
            .collect();
        let authors = join_all(author_keys.iter().map(|key| self.resolve_author(key))).await;

        let first_publish = details
            .first_publish_date
            .clone()
            .or_else(|| details.publish_date.clone())
            .or_else(|| {
                details
                    .created
                    .as_ref()
                    .map(|stamp| stamp.value.chars().take(10).collect::<String>())
            });

        let number_of_pages = details
            .number_of_pages
            .or_else(|| details.pagination.as_deref().and_then(leading_number));

        let cover_id = details.covers.first().copied();

        let languages = details
            .languages
            .iter()
            .filter_map(|lang| language_code_from_key(&lang.key))
            .map(language_name)
            .collect();

        let key = details.key.clone().unwrap_or_else(|| path.clone());

        Ok(Book {
            title: details
                .title
                .unwrap_or_else(|| "Untitled".to_string()),
            subtitle: details.subtitle,
            description: details
                .description
                .and_then(TextOrValue::into_text)
                .unwrap_or_else(|| "No description available.".to_string()),
            subjects: normalize_subjects(details.subjects),
            first_publish,
            number_of_pages,
            cover_url: self.cover_url(cover_id),
            cover_id,
            authors,
            publish_date: details.publish_date,
            publishers: details.publishers.map(|p| p.into_vec()).unwrap_or_default(),
            publish_places: details
                .publish_places
                .map(|p| p.into_vec())
                .unwrap_or_default(),
            series: details.series.map(|s| s.into_vec()).unwrap_or_default(),
            languages,
            isbn_10: details.isbn_10,
            isbn_13: details.isbn_13,
            first_sentence: details.first_sentence.and_then(TextOrValue::into_text),
            notes: details.notes.and_then(TextOrValue::into_text),
            copyright_date: details.copyright_date,
            physical_format: details.physical_format,
            physical_dimensions: details.physical_dimensions,
            weight: details.weight,
            edition_name: details.edition_name,
            lccn: details.lccn.map(|l| l.into_vec()).unwrap_or_default(),
            oclc_numbers: details
                .oclc_numbers
                .map(|o| o.into_vec())
                .unwrap_or_default(),
            dewey_decimal_class: details
                .dewey_decimal_class
                .map(|d| d.into_vec())
                .unwrap_or_default(),
            by_statement: details.by_statement,
            catalog_url: format!("{}{path}", self.base_url),
            key,
        })
    }

    /// Resolve a single author record, degrading to an anonymous name
    async fn resolve_author(&self, key: &str) -> AuthorRef {
        let name = match self.http.get_json::<RawAuthor>(&format!("{key}.json")).await {
            Ok(author) => author.name.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            Err(e) => {
                debug!("author lookup failed for {}: {}", key, e);
                ANONYMOUS_AUTHOR.to_string()
            }
        };
        AuthorRef {
            key: Some(key.to_string()),
            name,
        }
    }

    /// Build a cover image URL, falling back to a placeholder
    fn cover_url(&self, cover_id: Option<i64>) -> String {
        match cover_id {
            Some(id) => format!("{}/b/id/{id}-L.jpg", self.covers_base_url),
            None => PLACEHOLDER_COVER.to_string(),
        }
    }
}

/// Parse the leading integer out of a pagination string like "viii, 336 p."
fn leading_number(pagination: &str) -> Option<u64> {
    let digits: String = pagination
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
