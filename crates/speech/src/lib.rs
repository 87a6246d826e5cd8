//! Client side of the cloud avatar batch-synthesis service.
//!
//! Provides the vendor REST client ([`api::SpeechApi`]), the
//! [`backend::SynthesisBackend`] seam it implements, the request payload
//! builder, the submission [`gateway::SynthesisGateway`], and the
//! [`tracker::JobTracker`] that caches job status and runs one background
//! poll loop per submitted job.

pub mod api;
pub mod backend;
pub mod config;
pub mod gateway;
pub mod payload;
pub mod tracker;
