//! Configuration module for Linktrace
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linktrace::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Searching from {} to {}",
//!     config.search.start_reference, config.search.final_reference);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SearchConfig, SiteConfig};

// Re-export parser functions
pub use parser::load_config;
