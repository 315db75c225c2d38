//! # carnet-core
//!
//! Core library for carnet - a personal dining history tracker.
//!
//! This library provides:
//! - Domain types for restaurants and visits
//! - Snapshot loading from JSON exports
//! - Statistics engine (aggregation, ranking, badges, comparisons)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use carnet_core::analytics::{compute, Period};
//! use carnet_core::{Config, Snapshot};
//!
//! let config = Config::load().expect("failed to load config");
//! let snapshot = Snapshot::load_from("export.json".as_ref()).expect("failed to load snapshot");
//! let stats = compute(&snapshot, Period::Year(2024), &config.stats);
//! println!("{} visits", stats.visit_count);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use snapshot::Snapshot;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod snapshot;
pub mod types;
