//! URL handling module for AWACS
//!
//! This module provides href filtering and resolution, host comparison,
//! scope membership and URL normalization for the crawl frontier.

mod domain;
mod normalize;
mod resolve;
mod scope;

// Re-export main functions
pub use domain::{extract_domain, same_host};
pub use normalize::normalize_url;
pub use resolve::{is_followable, is_web_url, resolve_href};
pub use scope::is_in_scope;
