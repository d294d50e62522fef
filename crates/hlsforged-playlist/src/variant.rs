//! Variant (master) playlists listing alternate-bitrate renditions.

use bytes::Bytes;

use crate::types::Variant;
use crate::version::ProtocolVersion;
use crate::writer::{ManifestWriter, EXTM3U};

#[derive(Debug, Clone, Default)]
pub struct VariantPlaylist {
    variants: Vec<Variant>,
    version: ProtocolVersion,
    sid: Option<String>,
}

impl VariantPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `?<sid>` to every rendition URI.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn add_variant(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn render(&self) -> Bytes {
        let mut w = ManifestWriter::new();

        w.line(EXTM3U);
        w.tag("#EXT-X-VERSION", self.version);

        for variant in &self.variants {
            let mut inf = format!(
                "#EXT-X-STREAM-INF:PROGRAM-ID={},BANDWIDTH={}",
                variant.program_id, variant.bandwidth
            );
            if let Some(codecs) = variant.codecs.as_deref().filter(|c| !c.is_empty()) {
                inf.push_str(",CODECS=");
                inf.push_str(codecs);
            }
            if let Some(resolution) = variant.resolution.as_deref().filter(|r| !r.is_empty()) {
                inf.push_str(",RESOLUTION=\"");
                inf.push_str(resolution);
                inf.push('"');
            }
            w.line(&inf);
            w.uri(&variant.uri, self.sid.as_deref());
        }

        w.finish()
    }
}

impl Extend<Variant> for VariantPlaylist {
    fn extend<I: IntoIterator<Item = Variant>>(&mut self, iter: I) {
        self.variants.extend(iter);
    }
}

impl FromIterator<Variant> for VariantPlaylist {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        let mut playlist = Self::new();
        playlist.extend(iter);
        playlist
    }
}
