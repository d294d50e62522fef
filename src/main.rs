mod cli;

use hlsforged::{config, input, live};
use hlsforged_playlist::{FixedPlaylist, Segment, VariantPlaylist};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RenderKind};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlsforged=debug,hlsforged_playlist=trace".to_string()
        } else {
            "hlsforged=info,hlsforged_playlist=info".to_string()
        }
    });

    // Manifests go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { kind } => render(kind),
        Commands::Simulate {
            segments,
            duration,
            uri,
            window,
            render_interval_ms,
            segment_interval_ms,
        } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(window) = window {
                config.playlist.window_size = window;
            }
            if let Some(interval) = render_interval_ms {
                config.publisher.render_interval_ms = interval;
            }
            config::validate_config(&config)?;

            let opts = SimulateOpts {
                segments,
                duration,
                uri,
                segment_interval: Duration::from_millis(segment_interval_ms),
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(simulate(config, opts))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::InitConfig { path, force } => init_config(&path, force),
        Commands::Version => {
            println!("hlsforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn render(kind: RenderKind) -> Result<()> {
    let (body, output) = match kind {
        RenderKind::Fixed {
            input,
            sid,
            iframes,
            output,
        } => {
            let segments = input::load_segments(&input)?;
            tracing::info!("Rendering VOD playlist with {} segments", segments.len());

            let mut playlist = if iframes {
                FixedPlaylist::iframes_only()
            } else {
                FixedPlaylist::new()
            };
            if let Some(sid) = sid {
                playlist = playlist.with_sid(sid);
            }
            playlist.extend(segments);
            (playlist.render(), output)
        }
        RenderKind::Variant { input, sid, output } => {
            let variants = input::load_variants(&input)?;
            tracing::info!("Rendering variant playlist with {} variants", variants.len());

            let mut playlist = VariantPlaylist::new();
            if let Some(sid) = sid {
                playlist = playlist.with_sid(sid);
            }
            playlist.extend(variants);
            (playlist.render(), output)
        }
    };

    match output {
        Some(path) => std::fs::write(&path, &body)
            .with_context(|| format!("Failed to write playlist: {:?}", path)),
        None => write_stdout(&body),
    }
}

struct SimulateOpts {
    segments: usize,
    duration: f64,
    uri: String,
    segment_interval: Duration,
}

async fn simulate(config: config::Config, opts: SimulateOpts) -> Result<()> {
    let playlist = Arc::new(live::build_playlist(&config.playlist)?);
    let mut stream = live::LiveStream::start(Arc::clone(&playlist), &config.publisher);

    let mut revisions = stream
        .take_revisions()
        .context("Revision receiver already taken")?;
    let printer = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(revision) = revisions.recv().await {
            tracing::debug!("Revision {} ({} bytes)", revision.seq_no, revision.body.len());
            if let Err(e) = write_stdout(&revision.body).and_then(|_| write_stdout(b"\n")) {
                tracing::error!("Failed to print revision: {}", e);
            }
            count += 1;
        }
        count
    });

    let total = opts.segments;
    let publisher = stream.publisher();
    let producer = tokio::spawn(async move {
        for n in 0..opts.segments {
            let uri = opts.uri.replace("{n}", &n.to_string());
            publisher.publish(Segment::new(uri, opts.duration)).await?;
            if !opts.segment_interval.is_zero() {
                tokio::time::sleep(opts.segment_interval).await;
            }
        }
        Ok::<_, live::PublishError>(())
    });

    let published = producer.await.context("Producer task panicked")?;
    stream.finish().await;
    let count = printer.await.context("Printer task panicked")?;
    published?;

    tracing::info!(
        "Published {} segments in {} revisions (target duration {:.2})",
        total,
        count,
        playlist.target_duration()
    );
    Ok(())
}

fn write_stdout(data: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(data)?;
    stdout.flush()?;
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config_summary(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config_summary(config: &config::Config) {
    println!("  Window size: {}", config.playlist.window_size);
    println!(
        "  Pending limit: {}",
        usize::from(config.playlist.window_size) * 2 - 1
    );
    println!(
        "  Default key: {}",
        config
            .playlist
            .encryption
            .as_ref()
            .map(|k| k.method.as_str())
            .unwrap_or("none")
    );
    println!("  Widevine: {}", config.playlist.widevine.is_some());
    println!(
        "  Render interval: {}ms",
        config.publisher.render_interval_ms
    );
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Config file already exists: {:?} (use --force to overwrite)", path);
    }

    config::persist::save_config(path, &config::Config::default())?;
    println!("Wrote default config to {:?}", path);
    Ok(())
}
