use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::file_source::FileSource;
use crate::fetcher::http_source::HttpSource;
use crate::fetcher::retry::RetryPolicy;
use crate::fetcher::ContentSource;
use crate::loader::PresentationStateMachine;
use crate::page::Page;

/// Wires configuration and a content source together.
pub struct AppContext {
    pub config: Config,
    pub source: Arc<dyn ContentSource + Send + Sync>,
}

impl AppContext {
    /// Build a context from the loaded config.
    ///
    /// `source_override` takes precedence over `[source]`: anything that parses
    /// as an `http(s)` URL is fetched over HTTP, everything else is read as a
    /// local file path.
    pub fn new(config: Config, source_override: Option<&str>) -> Result<Self> {
        let source: Arc<dyn ContentSource + Send + Sync> = match source_override {
            Some(raw) => Self::source_from_arg(raw, &config)?,
            None => Arc::new(HttpSource::new(config.source.posts_url()?, &config.http)?),
        };

        Ok(Self { config, source })
    }

    pub fn with_source(config: Config, source: Arc<dyn ContentSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    fn source_from_arg(raw: &str, config: &Config) -> Result<Arc<dyn ContentSource + Send + Sync>> {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Ok(Arc::new(HttpSource::new(url, &config.http)?))
            }
            _ => Ok(Arc::new(FileSource::new(PathBuf::from(raw)))),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.config.loader)
    }

    /// The default page skeleton for the configured layout.
    pub fn skeleton_page(&self) -> Page {
        Page::skeleton(&self.config.layout)
    }

    pub fn state_machine(&self, page: Page) -> PresentationStateMachine {
        PresentationStateMachine::new(
            self.source.clone(),
            page,
            self.retry_policy(),
            self.config.loader.deadline(),
        )
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
