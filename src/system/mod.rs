//! Sampling and derivation over the Linux proc filesystem.
//!
//! Raw text flows reader → fields → metrics → {process, snapshot}; the
//! [`collector::Collector`] drives that pipeline on demand.

pub mod collector;
pub mod fields;
pub mod metrics;
pub mod platform;
pub mod process;
pub mod reader;
pub mod snapshot;
pub mod source;
