//! Template lookup: files, ids, URLs, inline JSON and names.

use flix_types::{parse_template, TemplateDescriptor};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{Result, SdkError};

/// Default template registry.
pub const DEFAULT_FLIX_SERVER_URL: &str = "https://flix.flow.com/v1/templates";

/// How a template query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Existing file on disk
    Path,
    /// 64-char hex template id
    Id,
    /// Absolute URL
    Url,
    /// Inline template document
    Json,
    /// Registry name
    Name,
}

impl QueryKind {
    /// Classify a query. Checked in order: path, id, URL, JSON, name.
    pub fn classify(query: &str) -> Self {
        if Path::new(query).is_file() {
            QueryKind::Path
        } else if is_template_id(query) {
            QueryKind::Id
        } else if is_url(query) {
            QueryKind::Url
        } else if serde_json::from_str::<serde::de::IgnoredAny>(query).is_ok() {
            QueryKind::Json
        } else {
            QueryKind::Name
        }
    }
}

fn is_template_id(query: &str) -> bool {
    query.len() == 64 && hex::decode(query).is_ok()
}

/// Absolute URL with both scheme and host.
pub fn is_url(query: &str) -> bool {
    url::Url::parse(query)
        .map(|u| u.has_host() && !u.scheme().is_empty())
        .unwrap_or(false)
}

/// Where a template document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocation {
    File(PathBuf),
    Remote(String),
    Inline,
}

impl TemplateLocation {
    pub fn is_remote(&self) -> bool {
        matches!(self, TemplateLocation::Remote(_))
    }
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateLocation::File(path) => write!(f, "{}", path.display()),
            TemplateLocation::Remote(url) => write!(f, "{}", url),
            TemplateLocation::Inline => write!(f, "<inline>"),
        }
    }
}

/// Resolves template queries to documents.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    http: reqwest::Client,
    server_url: String,
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new(DEFAULT_FLIX_SERVER_URL)
    }
}

impl TemplateSource {
    /// Create a source backed by the given registry.
    pub fn new(server_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Fetch the raw document for `query`.
    pub async fn fetch(&self, query: &str) -> Result<(String, TemplateLocation)> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SdkError::EmptyQuery);
        }

        let kind = QueryKind::classify(query);
        debug!("Template query {:?} classified as {:?}", query, kind);

        match kind {
            QueryKind::Path => {
                let json = tokio::fs::read_to_string(query).await.map_err(|e| SdkError::Fetch {
                    query: query.to_string(),
                    reason: e.to_string(),
                })?;
                Ok((json, TemplateLocation::File(PathBuf::from(query))))
            }
            QueryKind::Id => self.get(&format!("{}/{}", self.server_url, query), query).await,
            QueryKind::Url => self.get(query, query).await,
            QueryKind::Json => Ok((query.to_string(), TemplateLocation::Inline)),
            QueryKind::Name => self.get(&format!("{}?name={}", self.server_url, query), query).await,
        }
    }

    /// Fetch and parse the template for `query`.
    pub async fn load(&self, query: &str) -> Result<(TemplateDescriptor, TemplateLocation)> {
        let (json, location) = self.fetch(query).await?;
        let descriptor = parse_template(&json)?;
        info!("Loaded template '{}' from {}", descriptor.title, location);
        Ok((descriptor, location))
    }

    async fn get(&self, url: &str, query: &str) -> Result<(String, TemplateLocation)> {
        let fetch_err = |reason: String| SdkError::Fetch {
            query: query.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("server returned {}", status)));
        }

        let body = response.text().await.map_err(|e| fetch_err(e.to_string()))?;
        Ok((body, TemplateLocation::Remote(url.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MULTIPLY: &str = r#"{
        "f_type": "InteractionTemplate",
        "f_version": "1.1.0",
        "id": "",
        "data": {
            "type": "script",
            "messages": [{ "key": "title", "i18n": [{ "tag": "en-US", "translation": "Multiply" }] }],
            "cadence": { "body": "access(all) fun main(x: Int): Int { return x }" },
            "parameters": [{ "label": "x", "index": 0, "type": "Int", "messages": [] }]
        }
    }"#;

    #[test]
    fn test_classify_queries() {
        let id = "290b6b6222b2a77b16db896a80ddf29ebd1fa3038c9e6625a933fa213fce51fa";
        assert_eq!(QueryKind::classify(id), QueryKind::Id);
        assert_eq!(QueryKind::classify("https://flix.flow.com/v1/templates/abc"), QueryKind::Url);
        assert_eq!(QueryKind::classify(r#"{"f_version":"1.1.0"}"#), QueryKind::Json);
        assert_eq!(QueryKind::classify("transfer-flow"), QueryKind::Name);
        // 63 chars: not an id
        assert_eq!(QueryKind::classify(&id[1..]), QueryKind::Name);
    }

    #[test]
    fn test_classify_existing_file_first() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(QueryKind::classify(path), QueryKind::Path);
    }

    #[test]
    fn test_is_url_requires_host() {
        assert!(is_url("http://localhost:8888"));
        assert!(!is_url("mailto:someone"));
        assert!(!is_url("./multiply.template.json"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MULTIPLY.as_bytes()).unwrap();

        let source = TemplateSource::default();
        let (template, location) = source.load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(template.title, "Multiply");
        assert_eq!(location, TemplateLocation::File(file.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_load_inline_json() {
        let (template, location) = TemplateSource::default().load(MULTIPLY).await.unwrap();
        assert!(template.is_query());
        assert_eq!(location, TemplateLocation::Inline);
    }

    #[tokio::test]
    async fn test_empty_query() {
        let err = TemplateSource::default().fetch("   ").await.unwrap_err();
        assert_eq!(err, SdkError::EmptyQuery);
    }

    #[test]
    fn test_server_url_trailing_slash() {
        let source = TemplateSource::new("http://localhost:3333/v1/templates/");
        assert_eq!(source.server_url(), "http://localhost:3333/v1/templates");
    }
}
