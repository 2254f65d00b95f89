//! # Configuration Module
//!
//! This module handles client configuration loading.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vetcare_connect::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Search debounce: {}ms", settings.search.debounce_ms);
//! ```

mod settings;

pub use settings::*;
