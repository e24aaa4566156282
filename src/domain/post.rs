use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One content item from `posts.json`.
///
/// `index` is the positional slot: `0` is the featured post, `1..N` map to
/// sidebar slots and grid images. Text fields missing from the JSON default
/// to empty, `null` reads as empty and numbers or booleans as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub index: u32,
    #[serde(deserialize_with = "lenient_text")]
    pub header: String,
    #[serde(deserialize_with = "lenient_text")]
    pub subheader: String,
    #[serde(rename = "postDate", deserialize_with = "lenient_text")]
    pub post_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tags: String,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_text")]
    pub thumbnail: String,
    #[serde(deserialize_with = "lenient_text")]
    pub alttext: String,
    #[serde(deserialize_with = "lenient_text")]
    pub link: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {}", other))),
    }
}

impl Post {
    /// Shown immediately on page ready.
    pub fn loading_placeholder() -> Self {
        Self {
            thumbnail: "loading-placeholder.jpg".into(),
            ..Self::loading_copy()
        }
    }

    /// Shown when a loaded collection has no post at index 0.
    pub fn featured_placeholder() -> Self {
        Self {
            thumbnail: "featured-placeholder.jpg".into(),
            ..Self::loading_copy()
        }
    }

    fn loading_copy() -> Self {
        Self {
            index: 0,
            header: "Loading latest post...".into(),
            subheader: "Loading latest post...".into(),
            post_date: "Loading...".into(),
            tags: "Loading...".into(),
            summary: "Loading latest post... Please be patient...".into(),
            thumbnail: String::new(),
            alttext: "Loading latest post...".into(),
            link: "#".into(),
        }
    }

    /// Shown when the deadline elapses before any content arrives.
    pub fn empty_fallback() -> Self {
        Self {
            index: 0,
            header: "No featured post available".into(),
            subheader: "Please check back later...".into(),
            post_date: "N/A".into(),
            tags: "none".into(),
            summary: "We're currently updating our content. Please check back soon!".into(),
            thumbnail: "fallback-placeholder.jpg".into(),
            alttext: "No featured post available".into(),
            link: "#".into(),
        }
    }

    /// Shown once every fetch attempt has failed. `summary` carries the
    /// user-facing copy for the error category.
    pub fn error_fallback(summary: impl Into<String>) -> Self {
        Self {
            index: 0,
            header: "Sorry, we couldn't load the content.".into(),
            subheader: "Please check back later...".into(),
            post_date: "N/A".into(),
            tags: "none".into(),
            summary: summary.into(),
            thumbnail: "images/placeholders/error_tbn.png".into(),
            alttext: "Error loading content".into(),
            link: "#".into(),
        }
    }

    /// Fills a sidebar slot with no matching post.
    pub fn sidebar_placeholder() -> Self {
        Self {
            header: "No older posts available...".into(),
            post_date: "...".into(),
            link: "#".into(),
            ..Self::default()
        }
    }

    /// Fills a grid image with no matching post.
    pub fn image_placeholder() -> Self {
        Self {
            thumbnail: "placeholder.jpg".into(),
            alttext: "Placeholder image".into(),
            ..Self::default()
        }
    }
}

/// Posts as returned by a content source. Order is irrelevant; lookup is by
/// [`Post::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a `posts.json` value.
    ///
    /// Anything other than an array yields an empty collection. Array elements
    /// that are not post-shaped are skipped.
    pub fn from_json(value: Value) -> Self {
        let Value::Array(entries) = value else {
            warn!("Posts document is not an array, treating it as empty");
            return Self::empty();
        };

        let posts = entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match serde_json::from_value::<Post>(entry) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping malformed post at position {}: {}", position, e);
                    None
                }
            })
            .collect();

        Self { posts }
    }

    /// First post whose `index` matches. Duplicates resolve to the earliest.
    pub fn find_by_index(&self, index: u32) -> Option<&Post> {
        self.posts.iter().find(|post| post.index == index)
    }

    pub fn featured(&self) -> Option<&Post> {
        self.find_by_index(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl From<Vec<Post>> for PostCollection {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}
