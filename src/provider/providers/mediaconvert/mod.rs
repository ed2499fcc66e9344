//! AWS Elemental MediaConvert provider.
//!
//! Jobs run on a configured queue under an IAM role and write below a fixed
//! `s3://` destination. Adaptive renditions share one HLS output group; every
//! other output gets a file output group of its own.

pub mod api;
pub mod preset;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use transcoding_common::{
    Capabilities, Error, Job, JobStatus, Preset, ProviderStatus, Result, Status, TranscodeProfile,
};

use self::api::{
    AudioSelector, CreateJobRequest, FileGroupSettings, HlsGroupSettings, Input, JobSettings,
    MediaConvertApi, Output, OutputGroup, OutputGroupSettings, SdkMediaConvert,
};
use self::preset::SEGMENTED_CONTAINER;
use super::require_settings;
use crate::aws::{self, AwsError};
use crate::config::Config;
use crate::provider::contract::{NativePreset, Provider};
use crate::provider::output::{self, PlannedOutput};
use crate::provider::status::{self, StatusTable};

/// Name the provider is registered under.
pub const NAME: &str = "mediaconvert";

const S3_SCHEME: &str = "s3://";
const HLS_GROUP: &str = "HLS_GROUP_SETTINGS";
const FILE_GROUP: &str = "FILE_GROUP_SETTINGS";
const AUDIO_SELECTOR: &str = "Audio Selector 1";

const STATUS_TABLE: StatusTable = &[
    ("SUBMITTED", Status::Queued),
    ("PROGRESSING", Status::Started),
    ("COMPLETE", Status::Finished),
    ("CANCELED", Status::Canceled),
];

/// MediaConvert adapter.
pub struct MediaConvertProvider {
    api: Arc<dyn MediaConvertApi>,
    queue: String,
    role: String,
    /// `s3://bucket/prefix`, without a trailing slash.
    destination: String,
}

impl MediaConvertProvider {
    pub fn new<Q, R, D>(api: Arc<dyn MediaConvertApi>, queue: Q, role: R, destination: D) -> Self
    where
        Q: Into<String>,
        R: Into<String>,
        D: Into<String>,
    {
        let destination: String = destination.into();
        Self {
            api,
            queue: queue.into(),
            role: role.into(),
            destination: destination.trim_end_matches('/').to_string(),
        }
    }

    fn bucket(&self) -> &str {
        let path = self.destination.strip_prefix(S3_SCHEME).unwrap_or(&self.destination);
        path.split('/').next().unwrap_or_default()
    }

    /// Full URI of the source. Relative keys live in the destination bucket.
    fn source_uri(&self, source_media: &str) -> String {
        if source_media.starts_with(S3_SCHEME) {
            source_media.to_string()
        } else {
            format!(
                "{S3_SCHEME}{}/{}",
                self.bucket(),
                source_media.trim_start_matches('/')
            )
        }
    }

    fn location(&self, key: &str) -> String {
        format!("{}/{key}", self.destination)
    }

    async fn container(&self, preset_id: &str) -> Result<String> {
        self.api
            .get_preset(preset_id)
            .await?
            .preset
            .as_ref()
            .and_then(|p| p.container())
            .map(str::to_string)
            .ok_or_else(|| Error::misconfigured_preset(preset_id))
    }

    /// Output groups in order of first appearance, adaptive outputs sharing
    /// one HLS group.
    fn output_groups(
        &self,
        job_id: &str,
        source: &str,
        profile: &TranscodeProfile,
        planned: &[PlannedOutput],
    ) -> Vec<OutputGroup> {
        let mut groups = Vec::new();
        let mut hls_group = None;

        for (out, preset) in planned.iter().zip(&profile.presets) {
            if out.adaptive_streaming {
                let index = *hls_group.get_or_insert_with(|| {
                    groups.push(OutputGroup {
                        name: Some("HLS".to_string()),
                        output_group_settings: OutputGroupSettings {
                            group_type: HLS_GROUP.to_string(),
                            hls_group_settings: Some(HlsGroupSettings {
                                destination: self.location(&output::playlist_name(job_id, source)),
                                segment_length: i32::try_from(
                                    profile.streaming_params.segment_duration,
                                )
                                .unwrap_or(i32::MAX),
                                min_segment_length: 0,
                            }),
                            file_group_settings: None,
                        },
                        outputs: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[index].outputs.push(Output {
                    preset: Some(out.preset_id.clone()),
                    extension: None,
                    name_modifier: Some(format!("_{}", out.preset_name)),
                });
            } else {
                groups.push(OutputGroup {
                    name: Some(out.preset_name.clone()),
                    output_group_settings: OutputGroupSettings {
                        group_type: FILE_GROUP.to_string(),
                        hls_group_settings: None,
                        file_group_settings: Some(FileGroupSettings {
                            destination: self.location(output::strip_extension(&out.key)),
                        }),
                    },
                    outputs: vec![Output {
                        preset: Some(out.preset_id.clone()),
                        extension: Some(preset.output.extension.trim_start_matches('.').to_string()),
                        name_modifier: None,
                    }],
                });
            }
        }

        groups
    }
}

/// Directory holding the outputs of the first output group.
fn output_destination(job: &api::Job) -> Option<String> {
    let group = job.settings.output_groups.first()?;
    let destination = group.destination()?;
    let trailing = match group.output_group_settings.group_type.as_str() {
        HLS_GROUP => 1,
        _ => 2,
    };
    Some(output::parent_destination(destination, trailing))
}

#[async_trait]
impl Provider for MediaConvertProvider {
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

        let request = CreateJobRequest {
            role: self.role.clone(),
            queue: self.queue.clone(),
            user_metadata: BTreeMap::from([("job_id".to_string(), job.id.clone())]),
            settings: JobSettings {
                inputs: vec![Input {
                    file_input: self.source_uri(&profile.source_media),
                    audio_selectors: BTreeMap::from([(
                        AUDIO_SELECTOR.to_string(),
                        AudioSelector {
                            default_selection: Some("DEFAULT".to_string()),
                        },
                    )]),
                }],
                output_groups: self.output_groups(&job.id, source, profile, &planned),
            },
        };

        let created = self.api.create_job(&request).await?.job;
        let provider_job_id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or(AwsError::missing(NAME, "Job.Id"))?;
        debug!(
            job_id = %job.id,
            provider_job_id = %provider_job_id,
            output_groups = request.settings.output_groups.len(),
            "Submitted MediaConvert job"
        );

        Ok(JobStatus::queued(NAME, provider_job_id))
    }

    async fn create_preset(&self, preset: &Preset) -> Result<String> {
        let request = preset::create_preset_request(preset);
        self.api
            .create_preset(&request)
            .await?
            .preset
            .and_then(|p| p.name)
            .ok_or_else(|| Error::misconfigured_preset(&preset.name))
    }

    async fn get_preset(&self, preset_id: &str) -> Result<NativePreset> {
        self.api
            .get_preset(preset_id)
            .await?
            .preset
            .map(NativePreset::MediaConvert)
            .ok_or_else(|| Error::misconfigured_preset(preset_id))
    }

    async fn delete_preset(&self, preset_id: &str) -> Result<()> {
        self.api.delete_preset(preset_id).await?;
        Ok(())
    }

    async fn job_status(&self, provider_job_id: &str) -> Result<JobStatus> {
        let job = self.api.get_job(provider_job_id).await?.job;
        let vendor_status = job.status.clone().unwrap_or_default();

        let mut provider_status = ProviderStatus::new();
        provider_status.push("status", vendor_status.as_str());
        if let Some(code) = job.error_code {
            provider_status.push("errorCode", code.to_string());
        }
        if let Some(message) = job.error_message.as_deref() {
            provider_status.push("errorMessage", message);
        }
        if let Some(percent) = job.job_percent_complete {
            provider_status.push("jobPercentComplete", percent.to_string());
        }

        let output_destination = output_destination(&job).unwrap_or_else(|| {
            let text = format!("job {provider_job_id} has no output groups");
            warn!(provider_job_id, "Could not resolve output destination");
            text
        });

        Ok(JobStatus {
            provider_name: NAME.to_string(),
            provider_job_id: job.id.unwrap_or_else(|| provider_job_id.to_string()),
            status: status::normalize(STATUS_TABLE, &vendor_status),
            provider_status,
            output_destination,
        })
    }

    async fn healthcheck(&self) -> Result<()> {
        self.api.get_queue(&self.queue).await?;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(
            &["h264", "h265", "prores"],
            &["mp4", "hls", "webm", "mov"],
            &["s3"],
        )
    }
}

/// Build the adapter from `[mediaconvert]` configuration.
pub fn factory(config: &Config) -> Result<Arc<dyn Provider>> {
    let cfg = &config.mediaconvert;
    require_settings(
        NAME,
        &[
            ("access_key_id", cfg.access_key_id.as_str()),
            ("secret_access_key", cfg.secret_access_key.as_str()),
            ("endpoint", cfg.endpoint.as_str()),
            ("queue", cfg.queue.as_str()),
            ("role", cfg.role.as_str()),
            ("destination", cfg.destination.as_str()),
        ],
    )?;
    if !cfg.destination.starts_with(S3_SCHEME) {
        return Err(Error::invalid_config(
            NAME,
            format!("destination {:?} is not an s3:// location", cfg.destination),
        ));
    }

    if !(cfg.endpoint.starts_with("https://") || cfg.endpoint.starts_with("http://")) {
        return Err(Error::invalid_config(
            NAME,
            format!("endpoint {:?} is not an http(s) URL", cfg.endpoint),
        ));
    }

    let credentials = aws::credentials(
        &cfg.access_key_id,
        &cfg.secret_access_key,
        Some(cfg.session_token.as_str()),
    );
    let api = SdkMediaConvert::connect(cfg.region(), credentials, &cfg.endpoint);

    Ok(Arc::new(MediaConvertProvider::new(
        Arc::new(api),
        cfg.queue.clone(),
        cfg.role.clone(),
        cfg.destination.clone(),
    )))
}
