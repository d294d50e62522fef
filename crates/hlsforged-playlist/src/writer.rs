//! Line-oriented M3U8 emission shared by the playlist renderers.

use bytes::Bytes;
use std::fmt::{self, Write};

use crate::types::{ByteRange, Key};

pub(crate) const EXTM3U: &str = "#EXTM3U";
pub(crate) const ENDLIST: &str = "#EXT-X-ENDLIST";

/// Accumulates newline-terminated manifest lines.
#[derive(Debug, Default)]
pub(crate) struct ManifestWriter {
    out: String,
}

impl ManifestWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    /// `<tag>:<value>`
    pub(crate) fn tag(&mut self, tag: &str, value: impl fmt::Display) {
        self.line_fmt(format_args!("{tag}:{value}"));
    }

    /// `#EXT-X-KEY:METHOD=<m>,URI=<u>[,IV=<iv>]`
    pub(crate) fn key(&mut self, key: &Key) {
        self.out.push_str("#EXT-X-KEY:METHOD=");
        self.out.push_str(&key.method);
        self.out.push_str(",URI=");
        self.out.push_str(&key.uri);
        if let Some(iv) = key.iv.as_deref().filter(|iv| !iv.is_empty()) {
            self.out.push_str(",IV=");
            self.out.push_str(iv);
        }
        self.out.push('\n');
    }

    /// `#EXTINF:<seconds, 3 decimals>,<TAB>`
    pub(crate) fn extinf(&mut self, duration: f64) {
        self.line_fmt(format_args!("#EXTINF:{duration:.3},\t"));
    }

    pub(crate) fn byte_range(&mut self, range: ByteRange) {
        self.line_fmt(format_args!(
            "#EXT-X-BYTERANGE:{}@{}",
            range.size, range.offset
        ));
    }

    /// Resource URI, with the shared stream identifier appended as a query.
    /// An empty identifier adds nothing.
    pub(crate) fn uri(&mut self, uri: &str, sid: Option<&str>) {
        self.out.push_str(uri);
        if let Some(sid) = sid.filter(|s| !s.is_empty()) {
            self.out.push('?');
            self.out.push_str(sid);
        }
        self.out.push('\n');
    }

    pub(crate) fn finish(self) -> Bytes {
        Bytes::from(self.out)
    }

    fn line_fmt(&mut self, args: fmt::Arguments<'_>) {
        // Formatting into a String only fails if a Display impl does.
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_line_with_and_without_iv() {
        let mut w = ManifestWriter::new();
        w.key(&Key::new("AES-128", "https://k/1"));
        w.key(&Key::new("AES-128", "https://k/2").with_iv("0xABCD"));
        assert_eq!(
            w.finish(),
            "#EXT-X-KEY:METHOD=AES-128,URI=https://k/1\n\
             #EXT-X-KEY:METHOD=AES-128,URI=https://k/2,IV=0xABCD\n"
        );
    }

    #[test]
    fn test_extinf_and_uri() {
        let mut w = ManifestWriter::new();
        w.extinf(6.1);
        w.uri("seg.ts", Some("sid=1"));
        w.uri("seg.ts", None);
        assert_eq!(w.finish(), "#EXTINF:6.100,\t\nseg.ts?sid=1\nseg.ts\n");
    }

    #[test]
    fn test_empty_sid_adds_no_query() {
        let mut w = ManifestWriter::new();
        w.uri("seg.ts", Some(""));
        assert_eq!(w.finish(), "seg.ts\n");
    }
}
