use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{Certificate, Contact, Course, Placement, Training};
use crate::config::{ApiConfig, AppConfig};
use crate::{Error, Result};

/// Resolves backend image paths to absolute URLs
///
/// Shared between the fetcher and the widget layer so cards can carry their
/// resolved image URL without holding an HTTP client.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
    uploads_path: String,
}

impl ImageResolver {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            uploads_path: api.uploads_path.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute http(s) URLs are used verbatim, everything else is relative
    /// to the backend.
    pub fn image(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Certificates live under the upload directory, so bare filenames get
    /// the uploads prefix before the base join.
    pub fn certificate_image(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!(
                "{}{}/{}",
                self.base_url,
                self.uploads_path.trim_end_matches('/'),
                path
            )
        }
    }
}

/// Content fetcher for the institute backend
///
/// One attempt per request, no retry: a failed fetch is logged by the caller
/// and the affected widget keeps its last good state.
pub struct ContentFetcher {
    client: Client,
    resolver: ImageResolver,
}

impl ContentFetcher {
    /// Create a new fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Validate the base URL up front so a bad config fails at startup,
        // not on the first poll.
        Url::parse(&config.api.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.request_timeout_secs))
            .gzip(true)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            resolver: ImageResolver::new(&config.api),
        })
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    pub async fn certificates(&self) -> Result<Vec<Certificate>> {
        self.fetch_list("/api/certificates").await
    }

    pub async fn courses(&self) -> Result<Vec<Course>> {
        self.fetch_list("/api/courses").await
    }

    pub async fn trainings(&self) -> Result<Vec<Training>> {
        self.fetch_list("/api/trainings").await
    }

    pub async fn placements(&self) -> Result<Vec<Placement>> {
        self.fetch_list("/api/placements").await
    }

    pub async fn contacts(&self) -> Result<Vec<Contact>> {
        self.fetch_list("/api/contacts").await
    }

    /// The upcoming batch is the last element of the courses collection
    pub async fn latest_course(&self) -> Result<Option<Course>> {
        Ok(newest(self.courses().await?))
    }

    /// The footer contact is the last element of the contacts collection
    pub async fn latest_contact(&self) -> Result<Option<Contact>> {
        Ok(newest(self.contacts().await?))
    }

    /// Fetch a JSON array of typed records
    ///
    /// An empty or absent collection is "nothing to render", not an error.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.resolver.base_url(), path);
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Other(format!("HTTP {} for URL: {}", status, url)));
        }

        let raw: Vec<serde_json::Value> = response.json().await?;
        Ok(decode_entries(raw, path))
    }

    /// Download raw image bytes from an already-resolved URL
    pub async fn image_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Other(format!("HTTP {} for URL: {}", status, url)));
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub fn resolve_image_url(&self, path: &str) -> String {
        self.resolver.image(path)
    }

    pub fn resolve_certificate_image(&self, path: &str) -> String {
        self.resolver.certificate_image(path)
    }
}

/// Decode a raw JSON array entry by entry, skipping malformed records
///
/// One bad record must not take the whole collection down; survivors keep
/// their original order.
fn decode_entries<T: DeserializeOwned>(raw: Vec<serde_json::Value>, path: &str) -> Vec<T> {
    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!("Skipping malformed entry {} from {}: {}", index, path, e);
            }
        }
    }
    items
}

/// The backend appends new records, so "latest" is the last element
fn newest<T>(mut items: Vec<T>) -> Option<T> {
    items.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> ImageResolver {
        let mut api = ApiConfig::default();
        api.base_url = "https://backend.example.com".to_string();
        ImageResolver::new(&api)
    }

    #[test]
    fn test_absolute_url_passthrough() {
        assert_eq!(
            resolver().image("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn test_relative_path_joined_to_base() {
        assert_eq!(
            resolver().image("/images/x.png"),
            "https://backend.example.com/images/x.png"
        );
    }

    #[test]
    fn test_certificate_bare_filename_gets_uploads_prefix() {
        assert_eq!(
            resolver().certificate_image("cert-1.png"),
            "https://backend.example.com/uploads/cert-1.png"
        );
    }

    #[test]
    fn test_certificate_rooted_path_skips_uploads_prefix() {
        assert_eq!(
            resolver().certificate_image("/media/cert-1.png"),
            "https://backend.example.com/media/cert-1.png"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(ContentFetcher::new(&config).is_err());
    }

    #[test]
    fn test_malformed_entries_skipped_in_order() {
        let raw = vec![
            json!({"id": 1, "title": "First", "image": "/a.png"}),
            json!(42),
            json!({"title": "No image field"}),
            json!({"id": 2, "title": "Second", "image": "/b.png"}),
        ];

        let certs: Vec<Certificate> = decode_entries(raw, "/api/certificates");
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].display_title(), "First");
        assert_eq!(certs[1].display_title(), "Second");
    }

    #[test]
    fn test_all_malformed_yields_empty() {
        let raw = vec![json!("nope"), json!(null)];
        let certs: Vec<Certificate> = decode_entries(raw, "/api/certificates");
        assert!(certs.is_empty());
    }

    #[test]
    fn test_newest_is_last_element() {
        assert_eq!(newest(vec![1, 2, 3]), Some(3));
        assert_eq!(newest(Vec::<i32>::new()), None);
    }
}
