//! transcoding-api - one job and preset model over cloud transcoding services
//!
//! The library exposes the provider layer and its configuration so the
//! binary and integration tests can drive adapters directly.

pub mod aws;
pub mod config;
pub mod provider;
