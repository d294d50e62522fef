use hlsforged_playlist::{Key, Widevine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub playlist: PlaylistConfig,

    #[serde(default)]
    pub publisher: PublisherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistConfig {
    /// Number of segments in the live window (pending limit is `2 * window_size - 1`)
    #[serde(default = "default_window_size")]
    pub window_size: u16,

    /// Stream identifier appended to every segment URI as `?<sid>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Default key for segments that carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<Key>,

    /// Widevine metadata emitted before every segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widevine: Option<Widevine>,
}

fn default_window_size() -> u16 {
    4
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            sid: None,
            encryption: None,
            widevine: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherConfig {
    /// Delay between append attempts while the window is full
    #[serde(default = "default_retry_interval")]
    pub retry_interval_ms: u64,

    /// Retries after the first rejected append before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// How often the render loop produces a new revision
    #[serde(default = "default_render_interval")]
    pub render_interval_ms: u64,

    /// Revisions buffered between the render loop and its consumer
    #[serde(default = "default_revision_buffer")]
    pub revision_buffer: usize,
}

fn default_retry_interval() -> u64 {
    50
}
fn default_max_retries() -> u32 {
    20
}
fn default_render_interval() -> u64 {
    500
}
fn default_revision_buffer() -> usize {
    16
}

impl PublisherConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: default_retry_interval(),
            max_retries: default_max_retries(),
            render_interval_ms: default_render_interval(),
            revision_buffer: default_revision_buffer(),
        }
    }
}
