use hlsforged_playlist::{Segment, SlidingPlaylist};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::PublisherConfig;

/// How long a producer keeps retrying a rejected append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// Retries after the first attempt; zero means fail on the first rejection.
    pub max_retries: u32,
}

impl From<&PublisherConfig> for RetryPolicy {
    fn from(config: &PublisherConfig) -> Self {
        Self {
            interval: config.retry_interval(),
            max_retries: config.max_retries,
        }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    /// The window stayed full for the whole retry budget.
    #[error("Segment {uri} rejected after {attempts} attempts: {source}")]
    RetriesExhausted {
        uri: String,
        attempts: u32,
        #[source]
        source: hlsforged_playlist::Error,
    },
}

/// Producer handle appending segments to a shared sliding playlist.
#[derive(Debug, Clone)]
pub struct Publisher {
    playlist: Arc<SlidingPlaylist>,
    policy: RetryPolicy,
}

impl Publisher {
    pub fn new(playlist: Arc<SlidingPlaylist>, policy: RetryPolicy) -> Self {
        Self { playlist, policy }
    }

    pub fn playlist(&self) -> &Arc<SlidingPlaylist> {
        &self.playlist
    }

    /// Append `segment`, sleeping between attempts while the window is full.
    pub async fn publish(&self, segment: Segment) -> Result<(), PublishError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let err = match self.playlist.append(segment.clone()) {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            if !err.is_retryable() || attempts > self.policy.max_retries {
                tracing::warn!(
                    "Giving up on segment {} after {} attempts: {}",
                    segment.uri,
                    attempts,
                    err
                );
                return Err(PublishError::RetriesExhausted {
                    uri: segment.uri,
                    attempts,
                    source: err,
                });
            }

            tracing::debug!("Window full, retrying {} in {:?}", segment.uri, self.policy.interval);
            tokio::time::sleep(self.policy.interval).await;
        }
    }
}
