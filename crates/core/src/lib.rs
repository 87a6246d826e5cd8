//! Domain types shared by the synthesis gateway crates.
//!
//! Nothing in here performs I/O: job status classification, the cached job
//! record, and the inbound synthesis request with its defaults.

pub mod job;
pub mod synthesis;
pub mod types;
