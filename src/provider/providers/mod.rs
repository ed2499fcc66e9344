//! Concrete transcoding provider implementations.
//!
//! Each submodule wraps a single vendor API and implements the
//! [`Provider`](super::Provider) trait.

pub mod elastictranscoder;
pub mod mediaconvert;

pub use elastictranscoder::ElasticTranscoderProvider;
pub use mediaconvert::MediaConvertProvider;

use transcoding_common::{Error, Result};

/// Fail with [`Error::InvalidConfig`] naming every empty setting.
pub(crate) fn require_settings(provider: &str, settings: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = settings
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_config(
            provider,
            format!("missing {}", missing.join(", ")),
        ))
    }
}
