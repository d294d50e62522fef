//! CLI end-to-end tests
//!
//! Tests for the hlsforged command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the hlsforged binary
#[allow(deprecated)]
fn hlsforged_cmd() -> Command {
    Command::cargo_bin("hlsforged").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = hlsforged_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = hlsforged_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hlsforged"));
}

#[test]
fn test_render_fixed_exact_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("segments.json");
    fs::write(
        &input,
        r#"[{"uri": "test02.ts?111", "duration": 5.0}, {"uri": "test03.ts?111", "duration": 6.1}]"#,
    )
    .unwrap();

    let expected = "#EXTM3U\n#EXT-X-TARGETDURATION:7\n#EXT-X-VERSION:1\n\
#EXT-X-MEDIA-SEQUENCE:0\n#EXT-X-PLAYLIST-TYPE:VOD\n\
#EXTINF:5.000,\t\ntest02.ts?111\n#EXTINF:6.100,\t\ntest03.ts?111\n#EXT-X-ENDLIST\n";

    let mut cmd = hlsforged_cmd();
    cmd.args(["render", "fixed"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn test_render_fixed_to_file_with_sid() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("segments.json");
    let output = dir.path().join("vod.m3u8");
    fs::write(&input, r#"[{"uri": "a.ts", "duration": 4.0}]"#).unwrap();

    let mut cmd = hlsforged_cmd();
    cmd.args(["render", "fixed"])
        .arg(&input)
        .args(["--sid", "s=1", "--iframes", "-o"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("#EXT-X-I-FRAMES-ONLY\n"));
    assert!(content.contains("\na.ts?s=1\n"));
}

#[test]
fn test_render_variant() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("variants.json");
    fs::write(
        &input,
        r#"[{"program_id": 1, "bandwidth": 1280000, "codecs": "avc1.4d401f", "resolution": "1280x720", "uri": "mid.m3u8"}]"#,
    )
    .unwrap();

    let mut cmd = hlsforged_cmd();
    cmd.args(["render", "variant"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=1280000,CODECS=avc1.4d401f,RESOLUTION=\"1280x720\"\nmid.m3u8\n",
        ));
}

#[test]
fn test_render_missing_input_fails() {
    let mut cmd = hlsforged_cmd();
    cmd.args(["render", "fixed", "/nonexistent/segments.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_simulate_prints_revisions_and_end_marker() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("hlsforged.toml");
    fs::write(&config, "[publisher]\nretry_interval_ms = 5\nmax_retries = 400\n").unwrap();

    let mut cmd = hlsforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args([
            "simulate",
            "-n",
            "10",
            "--uri",
            "sample.ts",
            "--window",
            "4",
            "--render-interval-ms",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("#EXT-X-ALLOW-CACHE:NO"))
        .stdout(predicate::str::contains("#EXTINF:5.000,\t\nsample.ts\n"))
        .stdout(predicate::str::contains("#EXT-X-TARGETDURATION:5.00"))
        .stdout(predicate::str::ends_with("#EXT-X-ENDLIST\n\n"));
}

#[test]
fn test_init_then_validate_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("hlsforged.toml");

    let mut cmd = hlsforged_cmd();
    cmd.arg("init-config").arg(&config).assert().success();
    assert!(config.exists());

    // Refuses to clobber without --force.
    let mut cmd = hlsforged_cmd();
    cmd.arg("init-config").arg(&config).assert().failure();

    let mut cmd = hlsforged_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Pending limit: 7"));
}

#[test]
fn test_validate_rejects_zero_window() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[playlist]\nwindow_size = 0\n").unwrap();

    let mut cmd = hlsforged_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));
}
