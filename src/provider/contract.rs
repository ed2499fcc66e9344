//! The operation set every transcoding adapter implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use transcoding_common::{Capabilities, Job, JobStatus, Preset, Result, TranscodeProfile};

use super::providers::{elastictranscoder, mediaconvert};

/// A vendor preset as the vendor stores it, tagged with the provider it
/// came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "preset", rename_all = "lowercase")]
pub enum NativePreset {
    ElasticTranscoder(elastictranscoder::api::Preset),
    MediaConvert(mediaconvert::api::Preset),
}

impl NativePreset {
    /// Name of the provider this preset belongs to.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::ElasticTranscoder(_) => elastictranscoder::NAME,
            Self::MediaConvert(_) => mediaconvert::NAME,
        }
    }

    /// The vendor's container token, if the preset declares one.
    pub fn container(&self) -> Option<&str> {
        match self {
            Self::ElasticTranscoder(p) => p.container.as_deref(),
            Self::MediaConvert(p) => p.container(),
        }
    }
}

/// Async trait that all transcoding providers must implement.
///
/// Each provider wraps one vendor service. Implementations hold only a
/// client handle and static configuration, so a single instance can serve
/// any number of concurrent calls. Calls are never retried and carry no
/// timeout of their own; callers bound them as they see fit.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registered name of this provider (e.g. `"elastictranscoder"`).
    fn name(&self) -> &'static str;

    /// Submit one transcoding request.
    ///
    /// Either every preset resolves and exactly one vendor job is created, or
    /// nothing is submitted.
    async fn transcode(&self, job: &Job, profile: &TranscodeProfile) -> Result<JobStatus>;

    /// Create a vendor preset from a canonical one, returning its native ID.
    async fn create_preset(&self, preset: &Preset) -> Result<String>;

    async fn get_preset(&self, preset_id: &str) -> Result<NativePreset>;

    async fn delete_preset(&self, preset_id: &str) -> Result<()>;

    /// Poll the current state of a vendor job.
    ///
    /// Failing to resolve the output destination does not fail the query;
    /// the error text is reported in `output_destination` instead.
    async fn job_status(&self, provider_job_id: &str) -> Result<JobStatus>;

    /// Check the backing service is reachable with the current configuration.
    async fn healthcheck(&self) -> Result<()>;

    fn capabilities(&self) -> Capabilities;
}
