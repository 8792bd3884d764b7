//! Configuration module for AWACS
//!
//! Run arguments come from the command line, optionally layered on top of a
//! TOML configuration file. Command line values always win.
//!
//! # Example
//!
//! ```no_run
//! use awacs::config::{load_config, ArgumentOverrides};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("awacs.toml")).unwrap();
//! let arguments = file.into_arguments(ArgumentOverrides::default()).unwrap();
//! println!("Crawling scope: {}", arguments.scope);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArgumentOverrides, CrawlConfig, FileConfig, HttpConfig, OutputFormat, RunArguments,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, parse_scope};
pub use validation::validate;
