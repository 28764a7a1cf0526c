//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key is optional; missing keys take the defaults in [`types`].
//!
//! # Example
//!
//! ```no_run
//! use ssr_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Scraping {} pages", config.scraper.total_pages);
//! ```

mod parser;
pub mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
