//! Domain types and the pure rules the engine is built from

pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod log;
pub mod quote;
pub mod rate;
pub mod validate;

// Re-export main types for cleaner imports
pub use currency::Currency;
pub use error::ExchangeError;
pub use quote::{QuoteSource, QuoteTable};
