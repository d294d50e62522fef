//! Hlsforged - HLS manifest generation
//!
//! This library crate exposes configuration, input loading and the live
//! publishing pipeline for the `hlsforged` binary and integration tests.

pub mod config;
pub mod input;
pub mod live;
