//! hlsforged-playlist: HLS (M3U8) manifest rendering.
//!
//! This crate turns in-memory segment descriptions into playlist text for
//! three kinds of output:
//!
//! - [`SlidingPlaylist`] - live/DVR windows fed concurrently by producers and
//!   drained into a new revision on every render
//! - [`FixedPlaylist`] - complete VOD playlists ending in `#EXT-X-ENDLIST`
//! - [`VariantPlaylist`] - master playlists listing alternate renditions
//!
//! # Modules
//!
//! - `types` - segments, keys, Widevine metadata and variants
//! - `version` - `#EXT-X-VERSION` negotiation
//!
//! # Example
//!
//! ```
//! use hlsforged_playlist::{Segment, SlidingPlaylist};
//! use std::num::NonZeroU16;
//!
//! let playlist = SlidingPlaylist::new(NonZeroU16::new(4).unwrap());
//! playlist.append(Segment::new("seg0.ts", 6.0))?;
//! let m3u8 = playlist.render();
//! assert!(m3u8.starts_with(b"#EXTM3U\n"));
//! # Ok::<(), hlsforged_playlist::Error>(())
//! ```

pub mod error;
mod fixed;
mod queue;
mod sliding;
pub mod types;
mod variant;
pub mod version;
mod writer;

pub use error::{Error, Result};
pub use fixed::FixedPlaylist;
pub use sliding::SlidingPlaylist;
pub use types::{ByteRange, Key, Segment, Variant, Widevine};
pub use variant::VariantPlaylist;
pub use version::ProtocolVersion;
