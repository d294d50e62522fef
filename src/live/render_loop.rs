use bytes::{Bytes, BytesMut};
use hlsforged_playlist::SlidingPlaylist;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// One complete manifest document produced by the render loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRevision {
    /// `#EXT-X-MEDIA-SEQUENCE` of this revision.
    pub seq_no: u64,
    pub body: Bytes,
    /// Last revision of the stream; `body` ends with `#EXT-X-ENDLIST`.
    pub is_final: bool,
}

/// Sole renderer of a sliding playlist.
///
/// Renders on every tick and forwards revisions that differ from the last one
/// sent. Cached re-reads are not forwarded.
pub struct RenderLoop {
    playlist: Arc<SlidingPlaylist>,
    interval: Duration,
    revision_tx: mpsc::Sender<ManifestRevision>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl RenderLoop {
    pub fn new(
        playlist: Arc<SlidingPlaylist>,
        interval: Duration,
        revision_tx: mpsc::Sender<ManifestRevision>,
        shutdown_rx: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            playlist,
            interval,
            revision_tx,
            shutdown_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            "Render loop started (window {}, every {:?})",
            self.playlist.window_size(),
            self.interval
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Bytes::new();

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.recv() => {
                    break;
                }
                _ = ticker.tick() => {}
            }

            let body = self.playlist.render();
            if body == last {
                continue;
            }
            last = body.clone();

            let revision = ManifestRevision {
                seq_no: self.current_seq_no(),
                body,
                is_final: false,
            };
            // A consumer that stops reading must not keep shutdown waiting.
            tokio::select! {
                biased;

                sent = self.revision_tx.send(revision) => {
                    if sent.is_err() {
                        tracing::info!("Revision receiver dropped, stopping render loop");
                        return;
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    tracing::debug!("Shutdown while waiting for revision buffer space");
                    break;
                }
            }
        }

        // The final revision drains anything still pending.
        let body = self.playlist.render();
        let end = self.playlist.render_end();
        let mut buf = BytesMut::with_capacity(body.len() + end.len());
        buf.extend_from_slice(&body);
        buf.extend_from_slice(&end);

        let revision = ManifestRevision {
            seq_no: self.current_seq_no(),
            body: buf.freeze(),
            is_final: true,
        };
        let _ = self.revision_tx.send(revision).await;
        tracing::info!("Render loop stopped");
    }

    fn current_seq_no(&self) -> u64 {
        // Every render path that emits a new body has just advanced the counter.
        self.playlist.seq_no().saturating_sub(1)
    }
}
