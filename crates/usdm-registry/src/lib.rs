//! Exchange metadata registry.
//!
//! Fetches the exchange's published symbol filters through the
//! resilient executor and serves them from a process-lifetime cache.

pub mod filters;

pub use filters::FilterCache;
