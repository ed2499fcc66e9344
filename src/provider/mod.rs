//! Provider abstraction and translation layer.
//!
//! This module defines the [`Provider`] contract every transcoding backend
//! implements, the [`ProviderRegistry`] that resolves a provider name to a
//! live adapter, and the pieces of translation logic all adapters share.
//!
//! # Module layout
//!
//! - [`contract`] -- The [`Provider`] trait and [`NativePreset`].
//! - [`registry`] -- Name-keyed provider factories.
//! - [`output`] -- Deterministic output keys and playlist assembly.
//! - [`status`] -- Vendor status normalization.
//! - [`providers`] -- Concrete adapters (Elastic Transcoder, MediaConvert).

pub mod contract;
pub mod output;
pub mod providers;
pub mod registry;
pub mod status;

pub use contract::{NativePreset, Provider};
pub use registry::{ProviderFactory, ProviderRegistry};
