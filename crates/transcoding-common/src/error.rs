//! Common error type used by the registry and every provider adapter.
//!
//! Vendor failures are carried as an opaque boxed source so the caller sees
//! exactly what the vendor said. No variant is ever retried or logged here.

/// Boxed error coming from a vendor API or its transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Common error type for transcoding providers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required credentials or settings are missing for a provider.
    #[error("invalid {provider} config: {reason}")]
    InvalidConfig {
        /// Registered name of the provider whose configuration is incomplete.
        provider: String,
        /// Which settings are missing.
        reason: String,
    },

    /// No factory was registered under the requested name.
    #[error("provider not found: {0}")]
    UnknownProvider(String),

    /// A preset map has no native preset ID for the active provider.
    #[error("preset map not found: preset {preset:?} has no mapping for provider {provider:?}")]
    PresetMapNotFound {
        /// Canonical preset name.
        preset: String,
        /// Provider the submission was aimed at.
        provider: String,
    },

    /// A native preset is missing fields the adapter depends on.
    #[error("misconfigured preset: {0}")]
    MisconfiguredPreset(String),

    /// The vendor call itself failed. Displayed verbatim.
    #[error(transparent)]
    Vendor(BoxError),
}

impl Error {
    /// Create a new InvalidConfig error.
    pub fn invalid_config<P: Into<String>, R: Into<String>>(provider: P, reason: R) -> Self {
        Self::InvalidConfig {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnknownProvider error.
    pub fn unknown_provider<S: Into<String>>(name: S) -> Self {
        Self::UnknownProvider(name.into())
    }

    /// Create a new PresetMapNotFound error.
    pub fn preset_map_not_found<P: Into<String>, Q: Into<String>>(preset: P, provider: Q) -> Self {
        Self::PresetMapNotFound {
            preset: preset.into(),
            provider: provider.into(),
        }
    }

    /// Create a new MisconfiguredPreset error naming the native preset ID.
    pub fn misconfigured_preset<S: Into<String>>(preset_id: S) -> Self {
        Self::MisconfiguredPreset(preset_id.into())
    }

    /// Wrap a vendor error without altering its message.
    pub fn vendor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Vendor(Box::new(err))
    }

    /// Returns `true` for errors raised by the vendor rather than by the
    /// translation layer.
    pub fn is_vendor(&self) -> bool {
        matches!(self, Self::Vendor(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("ValidationException: pipeline is paused")]
    struct FakeVendorError;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_config("elastictranscoder", "missing pipeline_id");
        assert_eq!(
            err.to_string(),
            "invalid elastictranscoder config: missing pipeline_id"
        );

        let err = Error::unknown_provider("zencoder");
        assert_eq!(err.to_string(), "provider not found: zencoder");

        let err = Error::preset_map_not_found("hd", "mediaconvert");
        assert_eq!(
            err.to_string(),
            "preset map not found: preset \"hd\" has no mapping for provider \"mediaconvert\""
        );

        let err = Error::misconfigured_preset("1351620000001-000010");
        assert_eq!(err.to_string(), "misconfigured preset: 1351620000001-000010");
    }

    #[test]
    fn test_vendor_error_is_verbatim() {
        let err = Error::vendor(FakeVendorError);
        assert!(err.is_vendor());
        assert_eq!(err.to_string(), "ValidationException: pipeline is paused");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            Error::invalid_config("a", "b"),
            Error::InvalidConfig { .. }
        ));
        assert!(matches!(
            Error::unknown_provider("x"),
            Error::UnknownProvider(_)
        ));
        assert!(matches!(
            Error::preset_map_not_found("hd", "x"),
            Error::PresetMapNotFound { .. }
        ));
        assert!(!Error::misconfigured_preset("id").is_vendor());
    }
}
