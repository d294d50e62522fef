//! Live publishing pipeline around a [`SlidingPlaylist`].
//!
//! The playlist itself fails fast when its window is full and does not care
//! who renders it. This module supplies the policies a streaming service
//! needs on top:
//!
//! - [`Publisher`] - appends segments, retrying while the window is full
//! - [`RenderLoop`] - the single task that renders a playlist, forwarding
//!   every new revision to a consumer (e.g. a manifest-serving handler)
//! - [`LiveStream`] - wires both together from [`PublisherConfig`]

mod publisher;
mod render_loop;

pub use publisher::{PublishError, Publisher, RetryPolicy};
pub use render_loop::{ManifestRevision, RenderLoop};

use anyhow::{Context, Result};
use hlsforged_playlist::SlidingPlaylist;
use std::num::NonZeroU16;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{PlaylistConfig, PublisherConfig};

/// Build a sliding playlist with the configured window, sid and defaults.
pub fn build_playlist(config: &PlaylistConfig) -> Result<SlidingPlaylist> {
    let window_size =
        NonZeroU16::new(config.window_size).context("playlist.window_size must be at least 1")?;

    let mut playlist = SlidingPlaylist::new(window_size);
    if let Some(ref sid) = config.sid {
        playlist = playlist.with_sid(sid.clone());
    }
    playlist.set_key(config.encryption.clone());
    playlist.set_widevine(config.widevine.clone());

    Ok(playlist)
}

/// A running render loop plus the handles to feed and stop it.
pub struct LiveStream {
    publisher: Publisher,
    revisions: Option<mpsc::Receiver<ManifestRevision>>,
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl LiveStream {
    /// Spawn the render loop for `playlist` on the current tokio runtime.
    pub fn start(playlist: Arc<SlidingPlaylist>, config: &PublisherConfig) -> Self {
        let (revision_tx, revision_rx) = mpsc::channel(config.revision_buffer);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        let render_loop = RenderLoop::new(
            Arc::clone(&playlist),
            config.render_interval(),
            revision_tx,
            shutdown_rx,
        );
        let handle = tokio::spawn(render_loop.run());

        Self {
            publisher: Publisher::new(playlist, RetryPolicy::from(config)),
            revisions: Some(revision_rx),
            shutdown_tx,
            handle,
        }
    }

    /// A publisher feeding this stream; clone it for multiple producers.
    pub fn publisher(&self) -> Publisher {
        self.publisher.clone()
    }

    /// Take the revision receiver. Returns `None` after the first call.
    pub fn take_revisions(&mut self) -> Option<mpsc::Receiver<ManifestRevision>> {
        self.revisions.take()
    }

    /// Stop the render loop after one last revision carrying the end marker.
    ///
    /// If the receiver was never taken it is dropped here and the final
    /// revision is discarded. A taken receiver must keep being drained until
    /// the final revision arrives.
    pub async fn finish(mut self) {
        drop(self.revisions.take());
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.handle.await {
            tracing::error!("Render loop panicked: {}", e);
        }
    }
}
