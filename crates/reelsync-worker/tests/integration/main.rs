//! Integration test runner.
//!
//! Run all integration tests:
//!   cargo test -p reelsync-worker --test integration
//!
//! Run tests that need yt-dlp, FFmpeg or network access:
//!   cargo test -p reelsync-worker --test integration -- --ignored

mod batch_tests;
mod tools_tests;
