//! Transcoding-Common: the canonical vocabulary every provider adapter speaks.
//!
//! This crate provides the provider-agnostic data model:
//!
//! - **Jobs**: [`Job`], [`TranscodeProfile`] and the [`JobStatus`] returned by
//!   status queries, with the closed [`Status`] enum
//! - **Presets**: canonical [`Preset`] descriptions and the [`PresetMap`] that
//!   links a preset name to each provider's native preset identifier
//! - **Capabilities**: static per-provider [`Capabilities`] declarations
//! - **Error Handling**: the [`Error`] type shared by every adapter
//!
//! Nothing in here talks to a vendor. Every value is built, used and dropped
//! within a single request.
//!
//! # Examples
//!
//! ```
//! use transcoding_common::{Job, OutputOptions, PresetMap, Status, TranscodeProfile};
//!
//! let job = Job::new("abc");
//! let preset = PresetMap::new("hd", OutputOptions::new("mp4"))
//!     .with_provider("elastictranscoder", "1351620000001-000010");
//!
//! let profile = TranscodeProfile::new("s3://bucket/path/video.mp4", vec![preset]);
//! assert_eq!(profile.presets.len(), 1);
//! assert_eq!(job.id, "abc");
//! assert!(Status::Finished.is_terminal());
//! ```

pub mod capabilities;
pub mod error;
pub mod job;
pub mod preset;

pub use capabilities::Capabilities;
pub use error::{Error, Result};
pub use job::{Job, JobStatus, ProviderStatus, Status, StreamingParams, TranscodeProfile};
pub use preset::{AudioPreset, OutputOptions, Preset, PresetMap, VideoPreset};
