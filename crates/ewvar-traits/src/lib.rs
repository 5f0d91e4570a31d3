//! # EWVaR Traits
//!
//! Trait definitions for the collaborators the VaR engine consumes.
//!
//! This crate contains ONLY trait definitions and their error type.
//! Implementations live in extension crates such as `ewvar-ext-file`.
//!
//! ## Module Structure
//!
//! - [`market_data`]: Price history sources
//! - [`error`]: Common error type for source operations
//!
//! ## Dependency Injection
//!
//! The engine takes its price source as a trait object:
//!
//! ```ignore
//! let engine = VarEngine::new(Arc::new(CsvPriceHistorySource::new("prices.csv")?));
//! let var = engine.compute_var(&request).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

// Re-export commonly used types
pub use error::TraitError;
pub use market_data::{PriceHistoryFetcher, SourceType};
