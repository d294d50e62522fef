//! Value records shared by every playlist kind.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One media chunk referenced by a manifest entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Segment URI as written into the manifest.
    pub uri: String,
    /// Duration in seconds.
    pub duration: f64,
    /// Sub-range of the resource at `uri`.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub byte_range: Option<ByteRange>,
    /// Segment-specific encryption; overrides any playlist default.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub key: Option<Key>,
}

impl Segment {
    /// Create a plain segment with no byte range and no key.
    pub fn new(uri: impl Into<String>, duration: f64) -> Self {
        Self {
            uri: uri.into(),
            duration,
            byte_range: None,
            key: None,
        }
    }

    /// Restrict the segment to `size` bytes starting at `offset`.
    ///
    /// A zero size and zero offset means "whole resource" and clears the range.
    pub fn with_byte_range(mut self, size: u64, offset: u64) -> Self {
        self.byte_range = ByteRange::new(size, offset);
        self
    }

    /// Attach a segment-specific key.
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }
}

/// Byte range payload of `#EXT-X-BYTERANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ByteRange {
    /// Length in bytes.
    pub size: u64,
    /// Start offset in bytes.
    pub offset: u64,
}

impl ByteRange {
    /// Build a range, or `None` when both fields are zero.
    pub fn new(size: u64, offset: u64) -> Option<Self> {
        if size == 0 && offset == 0 {
            None
        } else {
            Some(Self { size, offset })
        }
    }
}

/// Payload of one `#EXT-X-KEY` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Key {
    /// Encryption method, e.g. `AES-128`.
    pub method: String,
    /// Key fetch location.
    pub uri: String,
    /// Initialization vector as a hex string.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub iv: Option<String>,
}

impl Key {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            iv: None,
        }
    }

    pub fn with_iv(mut self, iv: impl Into<String>) -> Self {
        self.iv = Some(iv.into());
        self
    }

    /// A key with an empty method does not count as encryption for
    /// version negotiation.
    pub fn has_method(&self) -> bool {
        !self.method.is_empty()
    }
}

/// Widevine DRM metadata attached to a whole sliding playlist.
///
/// Both values are opaque to the renderer; empty strings suppress their line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Widevine {
    #[cfg_attr(feature = "serialize", serde(default))]
    pub cypher_version: String,
    #[cfg_attr(feature = "serialize", serde(default))]
    pub ecm: String,
}

impl Widevine {
    pub fn new(cypher_version: impl Into<String>, ecm: impl Into<String>) -> Self {
        Self {
            cypher_version: cypher_version.into(),
            ecm: ecm.into(),
        }
    }
}

/// One alternate rendition listed by a variant (master) playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Variant {
    pub program_id: u32,
    /// Peak bandwidth in bits per second.
    pub bandwidth: u32,
    /// RFC 6381 codec list, e.g. `avc1.64001f,mp4a.40.2`.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub codecs: Option<String>,
    /// Resolution such as `1280x720`.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub resolution: Option<String>,
    /// Media playlist URI for this rendition.
    pub uri: String,
}

impl Variant {
    pub fn new(program_id: u32, bandwidth: u32, uri: impl Into<String>) -> Self {
        Self {
            program_id,
            bandwidth,
            codecs: None,
            resolution: None,
            uri: uri.into(),
        }
    }

    pub fn with_codecs(mut self, codecs: impl Into<String>) -> Self {
        self.codecs = Some(codecs.into());
        self
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }
}
