//! Integration tests for the live publishing pipeline.

use hlsforged::config::PublisherConfig;
use hlsforged::live::{LiveStream, PublishError, Publisher, RetryPolicy};
use hlsforged_playlist::{Segment, SlidingPlaylist};
use std::num::NonZeroU16;
use std::sync::Arc;
use std::time::Duration;

fn playlist(window: u16) -> Arc<SlidingPlaylist> {
    Arc::new(SlidingPlaylist::new(NonZeroU16::new(window).unwrap()))
}

fn fast_config() -> PublisherConfig {
    PublisherConfig {
        retry_interval_ms: 5,
        max_retries: 200,
        render_interval_ms: 5,
        revision_buffer: 4,
    }
}

#[tokio::test]
async fn publish_gives_up_when_nobody_renders() {
    let playlist = playlist(1);
    let publisher = Publisher::new(
        Arc::clone(&playlist),
        RetryPolicy {
            interval: Duration::from_millis(1),
            max_retries: 3,
        },
    );

    publisher.publish(Segment::new("a.ts", 1.0)).await.unwrap();
    let err = publisher.publish(Segment::new("b.ts", 1.0)).await.unwrap_err();

    let PublishError::RetriesExhausted { uri, attempts, .. } = err;
    assert_eq!(uri, "b.ts");
    assert_eq!(attempts, 4);
    assert_eq!(playlist.pending(), 1);
}

#[tokio::test]
async fn publish_succeeds_once_render_frees_the_window() {
    let playlist = playlist(1);
    let publisher = Publisher::new(
        Arc::clone(&playlist),
        RetryPolicy {
            interval: Duration::from_millis(2),
            max_retries: 100,
        },
    );
    publisher.publish(Segment::new("a.ts", 1.0)).await.unwrap();

    let renderer = {
        let playlist = Arc::clone(&playlist);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            playlist.render()
        })
    };

    publisher.publish(Segment::new("b.ts", 1.0)).await.unwrap();
    let first = renderer.await.unwrap();
    assert!(first.windows(4).any(|w| w == b"a.ts"));
    assert_eq!(playlist.pending(), 1);
}

#[tokio::test]
async fn live_stream_delivers_every_segment_and_ends() {
    let playlist = playlist(2);
    let mut stream = LiveStream::start(Arc::clone(&playlist), &fast_config());
    let mut revisions = stream.take_revisions().unwrap();
    assert!(stream.take_revisions().is_none());

    let collector = tokio::spawn(async move {
        let mut all = Vec::new();
        while let Some(revision) = revisions.recv().await {
            all.push(revision);
        }
        all
    });

    let publisher = stream.publisher();
    for n in 0..20 {
        publisher
            .publish(Segment::new(format!("seg{n}.ts"), 2.0))
            .await
            .unwrap();
    }
    stream.finish().await;
    let all = collector.await.unwrap();

    let last = all.last().unwrap();
    assert!(last.is_final);
    assert!(last.body.ends_with(b"#EXT-X-ENDLIST\n"));
    assert!(all[..all.len() - 1].iter().all(|r| !r.is_final));

    // Every segment shows up in some revision.
    let text: String = all
        .iter()
        .map(|r| String::from_utf8(r.body.to_vec()).unwrap())
        .collect();
    for n in 0..20 {
        assert!(text.contains(&format!("\nseg{n}.ts\n")), "missing seg{n}.ts");
    }

    // Media sequence numbers only move forward.
    assert!(all.windows(2).all(|w| w[0].seq_no <= w[1].seq_no));
    assert_eq!(playlist.pending(), 0);
}

#[tokio::test]
async fn render_loop_skips_cached_revisions() {
    let playlist = playlist(4);
    playlist.append(Segment::new("only.ts", 3.0)).unwrap();
    let mut stream = LiveStream::start(Arc::clone(&playlist), &fast_config());
    let mut revisions = stream.take_revisions().unwrap();

    // Many ticks pass with nothing new to render.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let collector = tokio::spawn(async move {
        let mut all = Vec::new();
        while let Some(revision) = revisions.recv().await {
            all.push(revision);
        }
        all
    });
    stream.finish().await;
    let all = collector.await.unwrap();

    let seqs: Vec<(u64, bool)> = all.iter().map(|r| (r.seq_no, r.is_final)).collect();
    assert_eq!(seqs, vec![(0, false), (0, true)]);
    assert!(all[0].body.ends_with(b"\nonly.ts\n"));
    assert_eq!(&all[1].body[..all[0].body.len()], &all[0].body[..]);
    assert_eq!(playlist.seq_no(), 1);
}

#[tokio::test]
async fn finish_returns_when_revisions_are_never_read() {
    let playlist = playlist(4);
    let config = PublisherConfig {
        revision_buffer: 1,
        ..fast_config()
    };
    let stream = LiveStream::start(Arc::clone(&playlist), &config);

    let publisher = stream.publisher();
    for n in 0..4 {
        publisher
            .publish(Segment::new(format!("seg{n}.ts"), 2.0))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let finished = tokio::time::timeout(Duration::from_secs(2), stream.finish()).await;
    assert!(finished.is_ok(), "finish waited on a full revision buffer");
}
