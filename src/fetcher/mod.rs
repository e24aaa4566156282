pub mod file_source;
pub mod http_source;
pub mod retry;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PostCollection;

/// A single failed attempt to retrieve the post collection.
///
/// The display strings are what the error classifier inspects, so they keep
/// the `HTTP error! status:` / `network timeout` / `Failed to fetch` wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Network(String),

    #[error("Failed to parse posts: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn network_timeout(target: &str) -> Self {
        FetchError::Network(format!("network timeout while fetching {}", target))
    }

    pub fn failed_to_fetch(target: &str, cause: impl std::fmt::Display) -> Self {
        FetchError::Network(format!("Failed to fetch {}: {}", target, cause))
    }
}

/// One attempt, no retries, no timeout.
#[async_trait]
pub trait ContentSource {
    async fn fetch(&self) -> Result<PostCollection, FetchError>;

    /// Where the posts come from, for log lines.
    fn describe(&self) -> String;
}

/// Decode a `posts.json` body.
pub fn decode_posts(body: &[u8]) -> Result<PostCollection, FetchError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(PostCollection::from_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_posts() {
        let body = br#"[{"index": 0, "header": "Featured"}, {"index": 1, "header": "Older"}]"#;
        let posts = decode_posts(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts.featured().unwrap().header, "Featured");
    }

    #[test]
    fn test_decode_malformed_json_is_parse_error() {
        let err = decode_posts(b"[{\"index\": 0,").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_error_messages_carry_classifier_keywords() {
        assert_eq!(FetchError::HttpStatus(404).to_string(), "HTTP error! status: 404");
        assert!(FetchError::network_timeout("posts.json")
            .to_string()
            .contains("network timeout"));
        assert!(FetchError::failed_to_fetch("posts.json", "refused")
            .to_string()
            .starts_with("Failed to fetch"));
    }
}
