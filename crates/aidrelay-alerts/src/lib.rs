//! Disaster-alert collection for aidrelay.
//!
//! Polls the seismic catalog, per-city weather conditions, and the
//! multi-hazard public feed, normalizes everything into
//! [`aidrelay_core::DisasterAlert`] records, deduplicates reports of the same
//! real-world event, and ranks results by severity then recency. Every source
//! degrades to an empty list on failure, so one dead upstream never blocks
//! the rest of a cycle.

pub mod aggregator;
pub mod error;
pub mod synthetic;

mod sources;

pub use aggregator::AlertAggregator;
pub use error::AlertError;
