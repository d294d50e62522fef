//! Live/DVR playlists over a bounded window of pending segments.
//!
//! Producers [`append`](SlidingPlaylist::append) segments from any thread.
//! Each [`render`](SlidingPlaylist::render) drains whatever is pending into a
//! new manifest revision and advances the media sequence. When nothing is
//! pending, the previous revision is served again unchanged.
//!
//! Rendering is meant to be driven by one consumer per playlist. Renderer
//! state sits behind its own lock, so concurrent renders are serialized, but
//! two consumers would still split the drained segments between them.

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use std::num::NonZeroU16;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::queue::SegmentQueue;
use crate::types::{Key, Segment, Widevine};
use crate::version::{AtomicVersion, ProtocolVersion, BYTE_RANGE_VERSION, KEY_VERSION};
use crate::writer::{ManifestWriter, ENDLIST, EXTM3U};

/// Playlist-wide encryption defaults for segments without their own key.
#[derive(Debug, Default)]
struct Defaults {
    key: Option<Key>,
    widevine: Option<Widevine>,
}

/// State owned by the rendering side.
#[derive(Debug, Default)]
struct RenderState {
    seq_no: u64,
    cache: Bytes,
}

/// Sliding-window media playlist for live streams.
#[derive(Debug)]
pub struct SlidingPlaylist {
    window_size: NonZeroU16,
    queue: SegmentQueue,
    version: AtomicVersion,
    /// `f64` bits of the longest duration ever appended.
    target_duration: AtomicU64,
    defaults: RwLock<Defaults>,
    sid: Option<String>,
    renderer: Mutex<RenderState>,
}

impl SlidingPlaylist {
    pub fn new(window_size: NonZeroU16) -> Self {
        Self {
            window_size,
            queue: SegmentQueue::for_window(window_size),
            version: AtomicVersion::new(),
            target_duration: AtomicU64::new(0f64.to_bits()),
            defaults: RwLock::new(Defaults::default()),
            sid: None,
            renderer: Mutex::new(RenderState::default()),
        }
    }

    /// Append `?<sid>` to every segment URI.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn window_size(&self) -> NonZeroU16 {
        self.window_size
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version.get()
    }

    /// Longest segment duration appended over the playlist's lifetime.
    ///
    /// This never shrinks as rendered segments leave the window.
    pub fn target_duration(&self) -> f64 {
        f64::from_bits(self.target_duration.load(Ordering::Acquire))
    }

    /// Media sequence number the next full render will emit.
    pub fn seq_no(&self) -> u64 {
        self.renderer.lock().seq_no
    }

    /// Segments appended but not yet rendered.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue a segment for the next render.
    ///
    /// Fails with [`Error::QueueFull`](crate::Error::QueueFull) once
    /// `2 * window_size - 1` segments are pending. A rejected segment is
    /// dropped and the playlist is left untouched; retrying is up to the caller.
    pub fn append(&self, segment: Segment) -> Result<()> {
        let result = self.queue.try_push_with(segment, |segment| {
            if segment.byte_range.is_some() {
                self.version.raise(BYTE_RANGE_VERSION);
            }
            if segment.key.as_ref().is_some_and(Key::has_method) {
                self.version.raise(KEY_VERSION);
            }
            self.raise_target_duration(segment.duration);
            tracing::trace!(uri = %segment.uri, duration = segment.duration, "Segment queued");
        });

        if let Err(ref e) = result {
            tracing::debug!("Rejected segment: {}", e);
        }
        result
    }

    /// Replace the default key used for segments without their own.
    ///
    /// Only later renders are affected; a cached revision is served as is.
    pub fn set_key(&self, key: Option<Key>) {
        if key.as_ref().is_some_and(Key::has_method) {
            self.version.raise(KEY_VERSION);
        }
        self.defaults.write().key = key;
    }

    /// Replace the Widevine metadata emitted before every segment.
    pub fn set_widevine(&self, widevine: Option<Widevine>) {
        self.defaults.write().widevine = widevine;
    }

    /// Drain pending segments into a new manifest revision.
    ///
    /// With nothing pending and a previous revision available, that revision
    /// is returned again and the media sequence does not move. Otherwise the
    /// media sequence advances by one, even if no segment was drained.
    pub fn render(&self) -> Bytes {
        let mut state = self.renderer.lock();

        if self.queue.is_empty() && !state.cache.is_empty() {
            tracing::trace!(seq_no = state.seq_no, "Serving cached playlist");
            return state.cache.clone();
        }

        // Drain before reading the header fields so every drained segment's
        // version and duration effects are reflected in this revision.
        let segments = self.queue.drain_available();
        let defaults = self.defaults.read();

        let mut w = ManifestWriter::new();
        w.line(EXTM3U);
        w.tag("#EXT-X-VERSION", self.version());
        w.line("#EXT-X-ALLOW-CACHE:NO");
        w.tag(
            "#EXT-X-TARGETDURATION",
            format_args!("{:.2}", self.target_duration()),
        );
        w.tag("#EXT-X-MEDIA-SEQUENCE", state.seq_no);

        for segment in &segments {
            if let Some(key) = segment.key.as_ref().or(defaults.key.as_ref()) {
                w.key(key);
            }
            if let Some(ref wv) = defaults.widevine {
                if !wv.cypher_version.is_empty() {
                    w.tag("#WV-CYPHER-VERSION", &wv.cypher_version);
                }
                if !wv.ecm.is_empty() {
                    w.tag("#WV-ECM", &wv.ecm);
                }
            }
            w.extinf(segment.duration);
            w.uri(&segment.uri, self.sid.as_deref());
        }
        drop(defaults);

        let body = w.finish();
        tracing::debug!(
            seq_no = state.seq_no,
            segments = segments.len(),
            "Rendered sliding playlist"
        );
        state.seq_no += 1;
        state.cache = body.clone();
        body
    }

    /// Standalone end-of-stream marker to append after the final revision.
    pub fn render_end(&self) -> Bytes {
        let mut w = ManifestWriter::new();
        w.line(ENDLIST);
        w.finish()
    }

    fn raise_target_duration(&self, duration: f64) {
        let _ = self
            .target_duration
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (duration > f64::from_bits(bits)).then(|| duration.to_bits())
            });
    }
}
