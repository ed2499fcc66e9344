//! Elastic Transcoder API surface used by the adapter.
//!
//! [`ElasticTranscoderApi`] is the seam between translation logic and the
//! network. The records below mirror the REST API (version `2012-09-25`)
//! and double as the native preset representation; [`SdkElasticTranscoder`]
//! implements the seam with `aws-sdk-elastictranscoder`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_elastictranscoder as sdk;
use aws_sdk_elastictranscoder::config::retry::RetryConfig;
use aws_sdk_elastictranscoder::config::{BehaviorVersion, Region};
use aws_sdk_elastictranscoder::types as wire;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use serde::{Deserialize, Serialize};

use crate::aws::AwsError;

/// Signing name of the service.
const SERVICE: &str = "elastictranscoder";

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Preset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// `System` or `Custom`.
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub preset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub codec_options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes_max_dist: Option<String>,
    #[serde(rename = "FixedGOP", default, skip_serializing_if = "Option::is_none")]
    pub fixed_gop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AudioParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_policy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePresetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub container: String,
    pub video: VideoParameters,
    pub audio: AudioParameters,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresetResponse {
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub warning: Option<String>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobInput {
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateJobOutput {
    pub key: String,
    pub preset_id: String,
    /// Seconds, as a decimal string. Only for segmented outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateJobPlaylist {
    pub name: String,
    pub format: String,
    pub output_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateJobRequest {
    pub pipeline_id: String,
    pub input: JobInput,
    pub outputs: Vec<CreateJobOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playlists: Vec<CreateJobPlaylist>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobOutput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Job {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pipeline_id: Option<String>,
    /// `Submitted`, `Progressing`, `Complete`, `Canceled` or `Error`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output_key_prefix: Option<String>,
    #[serde(default)]
    pub outputs: Vec<JobOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobResponse {
    pub job: Job,
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pipeline {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output_bucket: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineResponse {
    pub pipeline: Pipeline,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The Elastic Transcoder calls the adapter makes.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait ElasticTranscoderApi: Send + Sync {
    async fn read_preset(&self, id: &str) -> Result<PresetResponse, AwsError>;

    async fn create_preset(&self, request: &CreatePresetRequest) -> Result<PresetResponse, AwsError>;

    async fn delete_preset(&self, id: &str) -> Result<(), AwsError>;

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobResponse, AwsError>;

    async fn read_job(&self, id: &str) -> Result<JobResponse, AwsError>;

    async fn read_pipeline(&self, id: &str) -> Result<PipelineResponse, AwsError>;
}

/// [`ElasticTranscoderApi`] backed by the AWS SDK client.
pub struct SdkElasticTranscoder {
    client: sdk::Client,
}

impl SdkElasticTranscoder {
    pub fn new(client: sdk::Client) -> Self {
        Self { client }
    }

    /// Build a client for `region`. `endpoint` overrides the regional
    /// endpoint. The SDK never retries on the caller's behalf.
    pub fn connect(region: &str, credentials: Credentials, endpoint: Option<&str>) -> Self {
        let mut builder = sdk::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(sdk::Client::from_conf(builder.build()))
    }
}

fn sdk_error<E, R>(err: SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    AwsError::from_sdk(SERVICE, err)
}

#[async_trait]
impl ElasticTranscoderApi for SdkElasticTranscoder {
    async fn read_preset(&self, id: &str) -> Result<PresetResponse, AwsError> {
        let output = self
            .client
            .read_preset()
            .id(id)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(PresetResponse {
            preset: output.preset().map(Preset::from),
            warning: None,
        })
    }

    async fn create_preset(&self, request: &CreatePresetRequest) -> Result<PresetResponse, AwsError> {
        let output = self
            .client
            .create_preset()
            .name(&request.name)
            .set_description(request.description.clone())
            .container(&request.container)
            .video(wire::VideoParameters::from(&request.video))
            .audio(wire::AudioParameters::from(&request.audio))
            .thumbnails(wire::Thumbnails::from(&request.thumbnails))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(PresetResponse {
            preset: output.preset().map(Preset::from),
            warning: output.warning().map(str::to_string),
        })
    }

    async fn delete_preset(&self, id: &str) -> Result<(), AwsError> {
        self.client
            .delete_preset()
            .id(id)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobResponse, AwsError> {
        let outputs = request
            .outputs
            .iter()
            .map(|output| {
                wire::CreateJobOutput::builder()
                    .key(&output.key)
                    .preset_id(&output.preset_id)
                    .set_segment_duration(output.segment_duration.clone())
                    .build()
            })
            .collect();
        let playlists: Vec<_> = request
            .playlists
            .iter()
            .map(|playlist| {
                wire::CreateJobPlaylist::builder()
                    .name(&playlist.name)
                    .format(&playlist.format)
                    .set_output_keys(Some(playlist.output_keys.clone()))
                    .build()
            })
            .collect();

        let output = self
            .client
            .create_job()
            .pipeline_id(&request.pipeline_id)
            .input(wire::JobInput::builder().key(&request.input.key).build())
            .set_outputs(Some(outputs))
            .set_playlists((!playlists.is_empty()).then_some(playlists))
            .send()
            .await
            .map_err(sdk_error)?;
        let job = output.job().ok_or(AwsError::missing(SERVICE, "Job"))?;
        Ok(JobResponse { job: job.into() })
    }

    async fn read_job(&self, id: &str) -> Result<JobResponse, AwsError> {
        let output = self
            .client
            .read_job()
            .id(id)
            .send()
            .await
            .map_err(sdk_error)?;
        let job = output.job().ok_or(AwsError::missing(SERVICE, "Job"))?;
        Ok(JobResponse { job: job.into() })
    }

    async fn read_pipeline(&self, id: &str) -> Result<PipelineResponse, AwsError> {
        let output = self
            .client
            .read_pipeline()
            .id(id)
            .send()
            .await
            .map_err(sdk_error)?;
        let pipeline = output
            .pipeline()
            .ok_or(AwsError::missing(SERVICE, "Pipeline"))?;
        Ok(PipelineResponse {
            pipeline: Pipeline {
                id: owned(pipeline.id()),
                name: owned(pipeline.name()),
                status: owned(pipeline.status()),
                output_bucket: owned(pipeline.output_bucket()),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// SDK conversions
// ---------------------------------------------------------------------------

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

impl From<&wire::Preset> for Preset {
    fn from(preset: &wire::Preset) -> Self {
        Self {
            id: owned(preset.id()),
            arn: owned(preset.arn()),
            name: owned(preset.name()),
            description: owned(preset.description()),
            container: owned(preset.container()),
            preset_type: owned(preset.r#type()),
            video: preset.video().map(VideoParameters::from),
            audio: preset.audio().map(AudioParameters::from),
            thumbnails: preset.thumbnails().map(Thumbnails::from),
        }
    }
}

impl From<&wire::VideoParameters> for VideoParameters {
    fn from(video: &wire::VideoParameters) -> Self {
        Self {
            codec: owned(video.codec()),
            codec_options: video
                .codec_options()
                .map(|options| {
                    options
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            keyframes_max_dist: owned(video.keyframes_max_dist()),
            fixed_gop: owned(video.fixed_gop()),
            bit_rate: owned(video.bit_rate()),
            frame_rate: owned(video.frame_rate()),
            max_width: owned(video.max_width()),
            max_height: owned(video.max_height()),
            display_aspect_ratio: owned(video.display_aspect_ratio()),
            sizing_policy: owned(video.sizing_policy()),
            padding_policy: owned(video.padding_policy()),
        }
    }
}

impl From<&VideoParameters> for wire::VideoParameters {
    fn from(video: &VideoParameters) -> Self {
        let codec_options: Option<HashMap<String, String>> = (!video.codec_options.is_empty())
            .then(|| video.codec_options.clone().into_iter().collect());
        wire::VideoParameters::builder()
            .set_codec(video.codec.clone())
            .set_codec_options(codec_options)
            .set_keyframes_max_dist(video.keyframes_max_dist.clone())
            .set_fixed_gop(video.fixed_gop.clone())
            .set_bit_rate(video.bit_rate.clone())
            .set_frame_rate(video.frame_rate.clone())
            .set_max_width(video.max_width.clone())
            .set_max_height(video.max_height.clone())
            .set_display_aspect_ratio(video.display_aspect_ratio.clone())
            .set_sizing_policy(video.sizing_policy.clone())
            .set_padding_policy(video.padding_policy.clone())
            .build()
    }
}

impl From<&wire::AudioParameters> for AudioParameters {
    fn from(audio: &wire::AudioParameters) -> Self {
        Self {
            codec: owned(audio.codec()),
            sample_rate: owned(audio.sample_rate()),
            bit_rate: owned(audio.bit_rate()),
            channels: owned(audio.channels()),
        }
    }
}

impl From<&AudioParameters> for wire::AudioParameters {
    fn from(audio: &AudioParameters) -> Self {
        wire::AudioParameters::builder()
            .set_codec(audio.codec.clone())
            .set_sample_rate(audio.sample_rate.clone())
            .set_bit_rate(audio.bit_rate.clone())
            .set_channels(audio.channels.clone())
            .build()
    }
}

impl From<&wire::Thumbnails> for Thumbnails {
    fn from(thumbnails: &wire::Thumbnails) -> Self {
        Self {
            format: owned(thumbnails.format()),
            interval: owned(thumbnails.interval()),
            max_width: owned(thumbnails.max_width()),
            max_height: owned(thumbnails.max_height()),
            sizing_policy: owned(thumbnails.sizing_policy()),
            padding_policy: owned(thumbnails.padding_policy()),
        }
    }
}

impl From<&Thumbnails> for wire::Thumbnails {
    fn from(thumbnails: &Thumbnails) -> Self {
        wire::Thumbnails::builder()
            .set_format(thumbnails.format.clone())
            .set_interval(thumbnails.interval.clone())
            .set_max_width(thumbnails.max_width.clone())
            .set_max_height(thumbnails.max_height.clone())
            .set_sizing_policy(thumbnails.sizing_policy.clone())
            .set_padding_policy(thumbnails.padding_policy.clone())
            .build()
    }
}

impl From<&wire::Job> for Job {
    fn from(job: &wire::Job) -> Self {
        Self {
            id: owned(job.id()),
            pipeline_id: owned(job.pipeline_id()),
            status: owned(job.status()),
            output_key_prefix: owned(job.output_key_prefix()),
            outputs: job
                .outputs()
                .iter()
                .map(|output| JobOutput {
                    id: owned(output.id()),
                    key: owned(output.key()),
                    preset_id: owned(output.preset_id()),
                    status: owned(output.status()),
                    status_detail: owned(output.status_detail()),
                })
                .collect(),
        }
    }
}
