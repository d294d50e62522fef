use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hlsforged")]
#[command(author, version, about = "HLS manifest generator for VOD, ABR and live streams")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a VOD or variant playlist from a JSON description
    Render {
        #[command(subcommand)]
        kind: RenderKind,
    },

    /// Run a live stream with synthetic segments and print every revision
    Simulate {
        /// Number of segments to publish
        #[arg(short = 'n', long, default_value = "10")]
        segments: usize,

        /// Duration of each segment in seconds
        #[arg(short, long, default_value = "5.0")]
        duration: f64,

        /// Segment URI; `{n}` is replaced with the segment index
        #[arg(long, default_value = "segment{n}.ts")]
        uri: String,

        /// Override playlist.window_size
        #[arg(short, long)]
        window: Option<u16>,

        /// Override publisher.render_interval_ms
        #[arg(long)]
        render_interval_ms: Option<u64>,

        /// Pause between published segments
        #[arg(long, default_value = "0")]
        segment_interval_ms: u64,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        path: PathBuf,

        /// Replace the sections of an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum RenderKind {
    /// VOD playlist from a JSON array of segments
    Fixed {
        /// JSON file with segments
        input: PathBuf,

        /// Stream identifier appended to every URI
        #[arg(long)]
        sid: Option<String>,

        /// Mark the playlist as I-frames only
        #[arg(long)]
        iframes: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Master playlist from a JSON array of variants
    Variant {
        /// JSON file with variants
        input: PathBuf,

        /// Stream identifier appended to every URI
        #[arg(long)]
        sid: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
