//! Test double that replays a fixed list of attempt outcomes on virtual time.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::{Post, PostCollection};
use crate::fetcher::{ContentSource, FetchError};

pub(crate) enum Step {
    /// Resolve after `after` with the given outcome.
    Resolve {
        after: Duration,
        outcome: Result<PostCollection, FetchError>,
    },
    /// Never resolve.
    Hang,
}

pub(crate) struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedSource {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ok(posts: PostCollection) -> Step {
        Self::ok_after(Duration::ZERO, posts)
    }

    pub(crate) fn ok_after(after: Duration, posts: PostCollection) -> Step {
        Step::Resolve {
            after,
            outcome: Ok(posts),
        }
    }

    pub(crate) fn fail(error: FetchError) -> Step {
        Self::fail_after(Duration::ZERO, error)
    }

    pub(crate) fn fail_after(after: Duration, error: FetchError) -> Step {
        Step::Resolve {
            after,
            outcome: Err(error),
        }
    }

    /// Start times of every attempt made so far.
    pub(crate) fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for ScriptedSource {
    async fn fetch(&self) -> Result<PostCollection, FetchError> {
        self.attempts.lock().unwrap().push(Instant::now());
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Resolve { after, outcome }) => {
                tokio::time::sleep(after).await;
                outcome
            }
            Some(Step::Hang) => std::future::pending::<Result<PostCollection, FetchError>>().await,
            None => Err(FetchError::Network("script exhausted".into())),
        }
    }

    fn describe(&self) -> String {
        "scripted".into()
    }
}

pub(crate) fn post(index: u32, header: &str) -> Post {
    Post {
        index,
        header: header.into(),
        subheader: format!("{} subheader", header),
        post_date: "2024-05-01".into(),
        tags: "garden".into(),
        summary: format!("{} summary", header),
        thumbnail: format!("images/{}.jpg", index),
        alttext: format!("{} image", header),
        link: format!("posts/{}.html", index),
    }
}

pub(crate) fn collection(indices: &[u32]) -> PostCollection {
    indices
        .iter()
        .map(|&i| post(i, &format!("Post {}", i)))
        .collect::<Vec<_>>()
        .into()
}
