//! AWS Elastic Transcoder provider.
//!
//! Implements [`Provider`] on top of an Elastic Transcoder pipeline. Every
//! job is submitted through the configured pipeline, whose input bucket
//! holds the sources and whose output bucket receives the outputs, so jobs
//! address media by object key only.
//!
//! Segmented (`ts`) presets are grouped under a single `HLSv3` master
//! playlist.

pub mod api;
pub mod preset;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use transcoding_common::{
    Capabilities, Error, Job, JobStatus, Preset, ProviderStatus, Result, Status, TranscodeProfile,
};

use self::api::{
    CreateJobOutput, CreateJobPlaylist, CreateJobRequest, ElasticTranscoderApi, JobInput,
    SdkElasticTranscoder,
};
use self::preset::SEGMENTED_CONTAINER;
use super::require_settings;
use crate::aws::{self, AwsError};
use crate::config::Config;
use crate::provider::contract::{NativePreset, Provider};
use crate::provider::output::{self, PlannedOutput};
use crate::provider::status::{self, StatusTable};

/// Name the provider is registered under.
pub const NAME: &str = "elastictranscoder";

const PLAYLIST_FORMAT: &str = "HLSv3";

const STATUS_TABLE: StatusTable = &[
    ("Submitted", Status::Queued),
    ("Progressing", Status::Started),
    ("Complete", Status::Finished),
    ("Canceled", Status::Canceled),
];

/// Elastic Transcoder adapter.
pub struct ElasticTranscoderProvider {
    api: Arc<dyn ElasticTranscoderApi>,
    pipeline_id: String,
}

impl ElasticTranscoderProvider {
    pub fn new<S: Into<String>>(api: Arc<dyn ElasticTranscoderApi>, pipeline_id: S) -> Self {
        Self {
            api,
            pipeline_id: pipeline_id.into(),
        }
    }

    /// Container token of a native preset.
    async fn container(&self, preset_id: &str) -> Result<String> {
        self.api
            .read_preset(preset_id)
            .await?
            .preset
            .and_then(|p| p.container)
            .ok_or_else(|| Error::misconfigured_preset(preset_id))
    }

    /// Shared destination directory of a job's outputs.
    async fn output_destination(&self, job: &api::Job) -> Result<String> {
        let pipeline_id = job.pipeline_id.as_deref().unwrap_or(&self.pipeline_id);
        let pipeline = self.api.read_pipeline(pipeline_id).await?.pipeline;
        let bucket = pipeline
            .output_bucket
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                Error::invalid_config(NAME, format!("pipeline {pipeline_id} has no output bucket"))
            })?;

        let Some(key) = job.outputs.iter().find_map(|o| o.key.as_deref()) else {
            return Ok(String::new());
        };
        let prefix = job.output_key_prefix.as_deref().unwrap_or_default();

        Ok(output::parent_destination(
            &format!("s3://{bucket}/{prefix}{key}"),
            2,
        ))
    }
}

#[async_trait]
impl Provider for ElasticTranscoderProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn transcode(&self, job: &Job, profile: &TranscodeProfile) -> Result<JobStatus> {
        let source = output::normalize_source(&profile.source_media);

        let preset_ids = profile
            .presets
            .iter()
            .map(|p| {
                p.preset_id(NAME)
                    .ok_or_else(|| Error::preset_map_not_found(&p.name, NAME))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut planned = Vec::with_capacity(preset_ids.len());
        for (preset, preset_id) in profile.presets.iter().zip(preset_ids) {
            let adaptive = self.container(preset_id).await? == SEGMENTED_CONTAINER;
            planned.push(PlannedOutput {
                preset_name: preset.name.clone(),
                preset_id: preset_id.to_string(),
                key: output::output_key(&job.id, &preset.output, source, &preset.name, adaptive),
                adaptive_streaming: adaptive,
            });
        }

        let segment_duration = profile.streaming_params.segment_duration.to_string();
        let request = CreateJobRequest {
            pipeline_id: self.pipeline_id.clone(),
            input: JobInput {
                key: source.to_string(),
            },
            outputs: planned
                .iter()
                .map(|o| CreateJobOutput {
                    key: o.key.clone(),
                    preset_id: o.preset_id.clone(),
                    segment_duration: o.adaptive_streaming.then(|| segment_duration.clone()),
                })
                .collect(),
            playlists: output::playlist(&job.id, source, &planned)
                .map(|p| CreateJobPlaylist {
                    name: p.name,
                    format: PLAYLIST_FORMAT.to_string(),
                    output_keys: p.output_keys,
                })
                .into_iter()
                .collect(),
        };

        let created = self.api.create_job(&request).await?.job;
        let provider_job_id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or(AwsError::missing(NAME, "Job.Id"))?;
        debug!(
            job_id = %job.id,
            provider_job_id = %provider_job_id,
            outputs = request.outputs.len(),
            playlists = request.playlists.len(),
            "Submitted Elastic Transcoder job"
        );

        Ok(JobStatus::queued(NAME, provider_job_id))
    }

    async fn create_preset(&self, preset: &Preset) -> Result<String> {
        let request = preset::create_preset_request(preset);
        let response = self.api.create_preset(&request).await?;
        if let Some(warning) = response.warning.as_deref().filter(|w| !w.is_empty()) {
            warn!(preset = %preset.name, warning, "Elastic Transcoder accepted preset with a warning");
        }
        response
            .preset
            .and_then(|p| p.id)
            .ok_or_else(|| Error::misconfigured_preset(&preset.name))
    }

    async fn get_preset(&self, preset_id: &str) -> Result<NativePreset> {
        self.api
            .read_preset(preset_id)
            .await?
            .preset
            .map(NativePreset::ElasticTranscoder)
            .ok_or_else(|| Error::misconfigured_preset(preset_id))
    }

    async fn delete_preset(&self, preset_id: &str) -> Result<()> {
        self.api.delete_preset(preset_id).await?;
        Ok(())
    }

    async fn job_status(&self, provider_job_id: &str) -> Result<JobStatus> {
        let job = self.api.read_job(provider_job_id).await?.job;
        let vendor_status = job.status.clone().unwrap_or_default();

        let mut provider_status = ProviderStatus::new();
        provider_status.push("status", vendor_status.as_str());
        for out in &job.outputs {
            let detail = out
                .status_detail
                .as_deref()
                .or(out.status.as_deref())
                .unwrap_or_default();
            provider_status.push(
                format!("output:{}", out.key.as_deref().unwrap_or_default()),
                detail,
            );
        }

        let output_destination = match self.output_destination(&job).await {
            Ok(destination) => destination,
            Err(err) => {
                warn!(provider_job_id, error = %err, "Could not resolve output destination");
                err.to_string()
            }
        };

        Ok(JobStatus {
            provider_name: NAME.to_string(),
            provider_job_id: job.id.unwrap_or_else(|| provider_job_id.to_string()),
            status: status::normalize(STATUS_TABLE, &vendor_status),
            provider_status,
            output_destination,
        })
    }

    async fn healthcheck(&self) -> Result<()> {
        self.api.read_pipeline(&self.pipeline_id).await?;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(&["h264"], &["mp4", "hls", "webm"], &["s3"])
    }
}

/// Build the adapter from `[elastictranscoder]` configuration.
pub fn factory(config: &Config) -> Result<Arc<dyn Provider>> {
    let cfg = &config.elastictranscoder;
    require_settings(
        NAME,
        &[
            ("access_key_id", cfg.access_key_id.as_str()),
            ("secret_access_key", cfg.secret_access_key.as_str()),
            ("pipeline_id", cfg.pipeline_id.as_str()),
        ],
    )?;

    let credentials = aws::credentials(
        &cfg.access_key_id,
        &cfg.secret_access_key,
        Some(cfg.session_token.as_str()),
    );
    let endpoint = cfg.endpoint.as_deref().filter(|e| !e.is_empty());
    let api = SdkElasticTranscoder::connect(cfg.region(), credentials, endpoint);

    Ok(Arc::new(ElasticTranscoderProvider::new(
        Arc::new(api),
        cfg.pipeline_id.clone(),
    )))
}
