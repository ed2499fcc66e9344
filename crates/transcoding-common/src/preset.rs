//! Canonical presets and preset maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical description of one encoding target.
///
/// Codec and container names are lowercase canonical tokens (`"h264"`,
/// `"aac"`, `"mp4"`, `"m3u8"`). Bitrates are in bits per second.
///
/// Numeric fields also accept their decimal string form (`"2500000"`).
/// Unparseable bitrates read as 0; unparseable dimensions and GOP sizes
/// read as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub container: String,
    /// Codec profile, e.g. `"Main"` or `"high"`.
    #[serde(default)]
    pub profile: String,
    /// Codec level, e.g. `"3.1"`.
    #[serde(default)]
    pub profile_level: String,
    #[serde(default)]
    pub rate_control: String,
    #[serde(default)]
    pub video: VideoPreset,
    #[serde(default)]
    pub audio: AudioPreset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPreset {
    #[serde(default)]
    pub codec: String,
    #[serde(default, deserialize_with = "lenient::bitrate")]
    pub bitrate: u64,
    /// `None` selects the vendor's automatic sizing.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub height: Option<u32>,
    /// Maximum distance between keyframes, in frames.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub gop_size: Option<u32>,
    /// `"fixed"` requests a fixed GOP; anything else leaves it to the vendor.
    #[serde(default)]
    pub gop_mode: String,
    #[serde(default)]
    pub interlace_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPreset {
    #[serde(default)]
    pub codec: String,
    #[serde(default, deserialize_with = "lenient::bitrate")]
    pub bitrate: u64,
}

/// Options applied to every output produced from a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// File extension for non-segmented outputs, with or without a leading dot.
    pub extension: String,
}

impl OutputOptions {
    pub fn new<S: Into<String>>(extension: S) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

/// Links a canonical preset name to each provider's native preset ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMap {
    pub name: String,
    /// Provider name to native preset ID.
    #[serde(default)]
    pub provider_mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub output: OutputOptions,
}

impl PresetMap {
    pub fn new<S: Into<String>>(name: S, output: OutputOptions) -> Self {
        Self {
            name: name.into(),
            provider_mapping: BTreeMap::new(),
            output,
        }
    }

    #[must_use]
    pub fn with_provider<P: Into<String>, I: Into<String>>(mut self, provider: P, preset_id: I) -> Self {
        self.provider_mapping.insert(provider.into(), preset_id.into());
        self
    }

    /// Native preset ID for `provider`. Empty IDs count as missing.
    pub fn preset_id(&self, provider: &str) -> Option<&str> {
        self.provider_mapping
            .get(provider)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Deserializers for numbers that may arrive as JSON numbers or strings.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    impl Numeric {
        fn value(self) -> Option<u64> {
            match self {
                Self::Unsigned(n) => Some(n),
                Self::Signed(n) => u64::try_from(n).ok(),
                Self::Float(f) if f.is_finite() && f >= 0.0 => Some(f as u64),
                Self::Float(_) => None,
                Self::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    pub fn bitrate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(Option::<Numeric>::deserialize(deserializer)?
            .and_then(Numeric::value)
            .unwrap_or(0))
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(Option::<Numeric>::deserialize(deserializer)?
            .and_then(Numeric::value)
            .and_then(|n| u32::try_from(n).ok()))
    }
}
