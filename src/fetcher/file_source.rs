use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::PostCollection;
use crate::fetcher::{decode_posts, ContentSource, FetchError};

/// Reads `posts.json` from disk, for rendering a site checkout without a
/// server. A missing file reports as a 404.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch(&self) -> Result<PostCollection, FetchError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::HttpStatus(404),
            _ => FetchError::failed_to_fetch(&self.path.display().to_string(), e),
        })?;

        decode_posts(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
