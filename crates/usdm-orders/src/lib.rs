//! Order pipeline.
//!
//! Composes the rule validators, the numeric rounders, and the filter
//! cache into [`OrderPipeline`], which turns raw requests into
//! exchange-ready payloads and places them through the resilient
//! executor.

pub mod pipeline;

pub use pipeline::OrderPipeline;
