//! Video-on-demand playlists with a complete, unbounded segment list.

use bytes::Bytes;

use crate::types::Segment;
use crate::version::{ProtocolVersion, BYTE_RANGE_VERSION, KEY_VERSION};
use crate::writer::{ManifestWriter, ENDLIST, EXTM3U};

/// VOD media playlist.
#[derive(Debug, Clone, Default)]
pub struct FixedPlaylist {
    segments: Vec<Segment>,
    version: ProtocolVersion,
    target_duration: f64,
    iframes_only: bool,
    sid: Option<String>,
}

impl FixedPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playlist flagged with `#EXT-X-I-FRAMES-ONLY`.
    pub fn iframes_only() -> Self {
        Self {
            iframes_only: true,
            ..Self::default()
        }
    }

    /// Append `?<sid>` to every segment URI.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn add_segment(&mut self, segment: Segment) {
        if segment.byte_range.is_some() {
            self.version.raise(BYTE_RANGE_VERSION);
        }
        if segment.key.is_some() {
            self.version.raise(KEY_VERSION);
        }
        if self.target_duration < segment.duration {
            self.target_duration = segment.duration;
        }
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Longest segment duration, in seconds.
    pub fn target_duration(&self) -> f64 {
        self.target_duration
    }

    /// Render the complete manifest, including `#EXT-X-ENDLIST`.
    pub fn render(&self) -> Bytes {
        let mut w = ManifestWriter::new();

        w.line(EXTM3U);
        w.tag("#EXT-X-TARGETDURATION", self.target_duration.ceil() as u64);
        w.tag("#EXT-X-VERSION", self.version);
        w.line("#EXT-X-MEDIA-SEQUENCE:0");
        w.line("#EXT-X-PLAYLIST-TYPE:VOD");
        if self.iframes_only {
            w.line("#EXT-X-I-FRAMES-ONLY");
        }

        for segment in &self.segments {
            if let Some(ref key) = segment.key {
                w.key(key);
            }
            w.extinf(segment.duration);
            // Offset-only ranges still count for the version but have no tag.
            if let Some(range) = segment.byte_range.filter(|r| r.size != 0) {
                w.byte_range(range);
            }
            w.uri(&segment.uri, self.sid.as_deref());
        }

        w.line(ENDLIST);
        w.finish()
    }
}

impl Extend<Segment> for FixedPlaylist {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        for segment in iter {
            self.add_segment(segment);
        }
    }
}

impl FromIterator<Segment> for FixedPlaylist {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut playlist = Self::new();
        playlist.extend(iter);
        playlist
    }
}
