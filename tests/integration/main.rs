//! Integration tests for AWACS
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! broken link check and the full crawl cycle end-to-end.

mod broken_links;
mod crawl;
