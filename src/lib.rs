//! # Seedposter
//!
//! Renders a featured post and a sidebar of recent posts into a static page
//! from a small `posts.json` document.
//!
//! ## Architecture
//!
//! ```text
//! ContentSource → RetryScheduler ─┐
//!                                 ├→ PresentationStateMachine → Renderers → Page
//!                  DeadlineGuard ─┘
//! ```
//!
//! The state machine renders a loading placeholder, then whichever of
//! content, the empty fallback (deadline) or the error fallback (retries
//! exhausted) comes first. A fetch that succeeds after a fallback still
//! renders.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render the default page against a local posts file
//! seedposter render --source site/assets/js/newsletter/posts.json --output index.html
//!
//! # Check what the server returns
//! seedposter fetch --source https://seedscribe.example/assets/js/newsletter/posts.json
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
///
/// - `render` - Run the loader against the default page skeleton
/// - `fetch` - One fetch attempt, list posts by index
/// - `config` - Show the effective configuration
pub mod cli;

/// TOML configuration, loaded from `~/.config/seedposter/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Post`](domain::Post) and [`PostCollection`](domain::PostCollection)
/// - [`RenderState`](domain::RenderState): what the page currently shows
/// - [`ErrorCategory`](domain::ErrorCategory): user-facing error buckets
pub mod domain;

/// Fetching the post collection.
///
/// - [`ContentSource`](fetcher::ContentSource): single-attempt async trait
/// - [`HttpSource`](fetcher::http_source::HttpSource): reqwest-based implementation
/// - [`FileSource`](fetcher::file_source::FileSource): local file implementation
/// - [`RetryScheduler`](fetcher::retry::RetryScheduler): bounded fixed-delay retry
pub mod fetcher;

/// Deadline timer and the presentation state machine.
pub mod loader;

/// In-memory page tree and HTML output.
pub mod page;

/// Featured, sidebar and image grid renderers.
pub mod render;
