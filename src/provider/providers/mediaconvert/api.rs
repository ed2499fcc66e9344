//! MediaConvert API surface used by the adapter.
//!
//! Models follow the REST API (version `2017-08-29`) field names, camelCase
//! when serialized, and double as the native preset representation.
//! [`SdkMediaConvert`] implements [`MediaConvertApi`] with
//! `aws-sdk-mediaconvert`; enum-valued fields travel as their wire strings.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_mediaconvert as sdk;
use aws_sdk_mediaconvert::config::retry::RetryConfig;
use aws_sdk_mediaconvert::config::{BehaviorVersion, Region};
use aws_sdk_mediaconvert::types as wire;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use serde::{Deserialize, Serialize};

use crate::aws::AwsError;

/// Signing name of the service.
const SERVICE: &str = "mediaconvert";

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `SYSTEM` or `CUSTOM`.
    #[serde(default, rename = "type")]
    pub preset_type: Option<String>,
    #[serde(default)]
    pub settings: Option<PresetSettings>,
}

impl Preset {
    pub fn container(&self) -> Option<&str> {
        self.settings
            .as_ref()?
            .container_settings
            .as_ref()?
            .container
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_settings: Option<ContainerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_description: Option<VideoDescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_descriptions: Vec<AudioDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_settings: Option<VideoCodecSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCodecSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h264_settings: Option<EncoderSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h265_settings: Option<EncoderSettings>,
}

/// Settings block shared by the H.264 and H.265 encoders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderSettings {
    /// Bits per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_control_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gop_size_units: Option<String>,
    /// `DISABLED` keeps keyframes on the fixed GOP cadence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_change_detect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interlace_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_settings: Option<AudioCodecSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCodecSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aac_settings: Option<AacSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AacSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub settings: PresetSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetResponse {
    #[serde(default)]
    pub preset: Option<Preset>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub role: String,
    pub queue: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_metadata: BTreeMap<String, String>,
    pub settings: JobSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSettings {
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub output_groups: Vec<OutputGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub file_input: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub audio_selectors: BTreeMap<String, AudioSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_selection: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub output_group_settings: OutputGroupSettings,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

impl OutputGroup {
    /// Destination of whichever group type this is.
    pub fn destination(&self) -> Option<&str> {
        let settings = &self.output_group_settings;
        settings
            .hls_group_settings
            .as_ref()
            .map(|s| s.destination.as_str())
            .or_else(|| {
                settings
                    .file_group_settings
                    .as_ref()
                    .map(|s| s.destination.as_str())
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupSettings {
    /// `HLS_GROUP_SETTINGS` or `FILE_GROUP_SETTINGS`.
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls_group_settings: Option<HlsGroupSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_group_settings: Option<FileGroupSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HlsGroupSettings {
    pub destination: String,
    pub segment_length: i32,
    #[serde(default)]
    pub min_segment_length: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGroupSettings {
    pub destination: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_modifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    /// `SUBMITTED`, `PROGRESSING`, `COMPLETE`, `CANCELED` or `ERROR`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub job_percent_complete: Option<i32>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub settings: JobSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job: Job,
}

// ---------------------------------------------------------------------------
// Queues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    /// `ACTIVE` or `PAUSED`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub queue: Queue,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The MediaConvert calls the adapter makes.
#[async_trait]
pub trait MediaConvertApi: Send + Sync {
    async fn get_preset(&self, name: &str) -> Result<PresetResponse, AwsError>;

    async fn create_preset(&self, request: &CreatePresetRequest) -> Result<PresetResponse, AwsError>;

    async fn delete_preset(&self, name: &str) -> Result<(), AwsError>;

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobResponse, AwsError>;

    async fn get_job(&self, id: &str) -> Result<JobResponse, AwsError>;

    /// `queue` may be a queue name or a queue ARN.
    async fn get_queue(&self, queue: &str) -> Result<QueueResponse, AwsError>;
}

/// [`MediaConvertApi`] backed by the AWS SDK client.
pub struct SdkMediaConvert {
    client: sdk::Client,
}

impl SdkMediaConvert {
    pub fn new(client: sdk::Client) -> Self {
        Self { client }
    }

    /// Build a client bound to an account `endpoint`. The SDK never retries
    /// on the caller's behalf.
    pub fn connect(region: &str, credentials: Credentials, endpoint: &str) -> Self {
        let config = sdk::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .endpoint_url(endpoint)
            .build();
        Self::new(sdk::Client::from_conf(config))
    }
}

/// Queue name from a queue ARN (`arn:aws:mediaconvert:...:queues/Default`).
pub fn queue_name(queue: &str) -> &str {
    queue.rsplit('/').next().unwrap_or(queue)
}

fn sdk_error<E, R>(err: SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    AwsError::from_sdk(SERVICE, err)
}

#[async_trait]
impl MediaConvertApi for SdkMediaConvert {
    async fn get_preset(&self, name: &str) -> Result<PresetResponse, AwsError> {
        let output = self
            .client
            .get_preset()
            .name(name)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(PresetResponse {
            preset: output.preset().map(|p| Preset::from_sdk(name, p)),
        })
    }

    async fn create_preset(&self, request: &CreatePresetRequest) -> Result<PresetResponse, AwsError> {
        let output = self
            .client
            .create_preset()
            .name(&request.name)
            .set_description(request.description.clone())
            .settings(wire::PresetSettings::from(&request.settings))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(PresetResponse {
            preset: output.preset().map(|p| Preset::from_sdk(&request.name, p)),
        })
    }

    async fn delete_preset(&self, name: &str) -> Result<(), AwsError> {
        self.client
            .delete_preset()
            .name(name)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobResponse, AwsError> {
        let metadata: Option<HashMap<String, String>> = (!request.user_metadata.is_empty())
            .then(|| request.user_metadata.clone().into_iter().collect());
        let output = self
            .client
            .create_job()
            .role(&request.role)
            .queue(&request.queue)
            .set_user_metadata(metadata)
            .settings(wire::JobSettings::from(&request.settings))
            .send()
            .await
            .map_err(sdk_error)?;
        let job = output.job().ok_or(AwsError::missing(SERVICE, "Job"))?;
        Ok(JobResponse { job: job.into() })
    }

    async fn get_job(&self, id: &str) -> Result<JobResponse, AwsError> {
        let output = self
            .client
            .get_job()
            .id(id)
            .send()
            .await
            .map_err(sdk_error)?;
        let job = output.job().ok_or(AwsError::missing(SERVICE, "Job"))?;
        Ok(JobResponse { job: job.into() })
    }

    async fn get_queue(&self, queue: &str) -> Result<QueueResponse, AwsError> {
        let name = queue_name(queue);
        let output = self
            .client
            .get_queue()
            .name(name)
            .send()
            .await
            .map_err(sdk_error)?;
        let found = output.queue().ok_or(AwsError::missing(SERVICE, "Queue"))?;
        Ok(QueueResponse {
            queue: Queue {
                name: Some(name.to_string()),
                arn: owned(found.arn()),
                status: found.status().map(|s| s.as_str().to_string()),
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

/// SDK enum from its wire string. Unrecognized values are kept verbatim.
fn sdk_enum<T: for<'a> From<&'a str>>(value: &Option<String>) -> Option<T> {
    value.as_deref().map(T::from)
}

macro_rules! encoder_conversions {
    (
        $to:ident, $from:ident, $settings:ident,
        $rate:ident, $profile:ident, $level:ident, $units:ident, $scene:ident, $interlace:ident
    ) => {
        fn $to(settings: &EncoderSettings) -> wire::$settings {
            wire::$settings::builder()
                .set_bitrate(settings.bitrate)
                .set_rate_control_mode(sdk_enum::<wire::$rate>(&settings.rate_control_mode))
                .set_codec_profile(sdk_enum::<wire::$profile>(&settings.codec_profile))
                .set_codec_level(sdk_enum::<wire::$level>(&settings.codec_level))
                .set_gop_size(settings.gop_size)
                .set_gop_size_units(sdk_enum::<wire::$units>(&settings.gop_size_units))
                .set_scene_change_detect(sdk_enum::<wire::$scene>(&settings.scene_change_detect))
                .set_interlace_mode(sdk_enum::<wire::$interlace>(&settings.interlace_mode))
                .build()
        }

        fn $from(settings: &wire::$settings) -> EncoderSettings {
            EncoderSettings {
                bitrate: settings.bitrate(),
                rate_control_mode: settings.rate_control_mode().map(|v| v.as_str().to_string()),
                codec_profile: settings.codec_profile().map(|v| v.as_str().to_string()),
                codec_level: settings.codec_level().map(|v| v.as_str().to_string()),
                gop_size: settings.gop_size(),
                gop_size_units: settings.gop_size_units().map(|v| v.as_str().to_string()),
                scene_change_detect: settings.scene_change_detect().map(|v| v.as_str().to_string()),
                interlace_mode: settings.interlace_mode().map(|v| v.as_str().to_string()),
            }
        }
    };
}

encoder_conversions!(
    h264_to_sdk, h264_from_sdk, H264Settings,
    H264RateControlMode, H264CodecProfile, H264CodecLevel, H264GopSizeUnits,
    H264SceneChangeDetect, H264InterlaceMode
);
encoder_conversions!(
    h265_to_sdk, h265_from_sdk, H265Settings,
    H265RateControlMode, H265CodecProfile, H265CodecLevel, H265GopSizeUnits,
    H265SceneChangeDetect, H265InterlaceMode
);

impl Preset {
    /// Native preset from an SDK preset fetched or created under `name`.
    fn from_sdk(name: &str, preset: &wire::Preset) -> Self {
        Self {
            name: Some(name.to_string()),
            arn: owned(preset.arn()),
            description: owned(preset.description()),
            preset_type: preset.r#type().map(|t| t.as_str().to_string()),
            settings: preset.settings().map(PresetSettings::from),
        }
    }
}

impl From<&wire::PresetSettings> for PresetSettings {
    fn from(settings: &wire::PresetSettings) -> Self {
        Self {
            container_settings: settings.container_settings().map(|c| ContainerSettings {
                container: c.container().map(|v| v.as_str().to_string()),
            }),
            video_description: settings.video_description().map(|video| VideoDescription {
                width: video.width(),
                height: video.height(),
                codec_settings: video.codec_settings().map(|codec| VideoCodecSettings {
                    codec: codec.codec().map(|v| v.as_str().to_string()),
                    h264_settings: codec.h264_settings().map(h264_from_sdk),
                    h265_settings: codec.h265_settings().map(h265_from_sdk),
                }),
            }),
            audio_descriptions: settings
                .audio_descriptions()
                .iter()
                .map(|audio| AudioDescription {
                    codec_settings: audio.codec_settings().map(|codec| AudioCodecSettings {
                        codec: codec.codec().map(|v| v.as_str().to_string()),
                        aac_settings: codec.aac_settings().map(|aac| AacSettings {
                            bitrate: aac.bitrate(),
                            coding_mode: aac.coding_mode().map(|v| v.as_str().to_string()),
                            sample_rate: aac.sample_rate(),
                        }),
                    }),
                })
                .collect(),
        }
    }
}

impl From<&PresetSettings> for wire::PresetSettings {
    fn from(settings: &PresetSettings) -> Self {
        let container = settings.container_settings.as_ref().map(|c| {
            wire::ContainerSettings::builder()
                .set_container(sdk_enum::<wire::ContainerType>(&c.container))
                .build()
        });
        let video = settings.video_description.as_ref().map(|video| {
            let codec = video.codec_settings.as_ref().map(|codec| {
                wire::VideoCodecSettings::builder()
                    .set_codec(sdk_enum::<wire::VideoCodec>(&codec.codec))
                    .set_h264_settings(codec.h264_settings.as_ref().map(h264_to_sdk))
                    .set_h265_settings(codec.h265_settings.as_ref().map(h265_to_sdk))
                    .build()
            });
            wire::VideoDescription::builder()
                .set_width(video.width)
                .set_height(video.height)
                .set_codec_settings(codec)
                .build()
        });
        let audio: Vec<wire::AudioDescription> = settings
            .audio_descriptions
            .iter()
            .map(|audio| {
                let codec = audio.codec_settings.as_ref().map(|codec| {
                    let aac = codec.aac_settings.as_ref().map(|aac| {
                        wire::AacSettings::builder()
                            .set_bitrate(aac.bitrate)
                            .set_coding_mode(sdk_enum::<wire::AacCodingMode>(&aac.coding_mode))
                            .set_sample_rate(aac.sample_rate)
                            .build()
                    });
                    wire::AudioCodecSettings::builder()
                        .set_codec(sdk_enum::<wire::AudioCodec>(&codec.codec))
                        .set_aac_settings(aac)
                        .build()
                });
                wire::AudioDescription::builder()
                    .set_codec_settings(codec)
                    .build()
            })
            .collect();

        wire::PresetSettings::builder()
            .set_container_settings(container)
            .set_video_description(video)
            .set_audio_descriptions((!audio.is_empty()).then_some(audio))
            .build()
    }
}

impl From<&JobSettings> for wire::JobSettings {
    fn from(settings: &JobSettings) -> Self {
        let inputs = settings
            .inputs
            .iter()
            .map(|input| {
                let selectors: Option<HashMap<String, wire::AudioSelector>> =
                    (!input.audio_selectors.is_empty()).then(|| {
                        input
                            .audio_selectors
                            .iter()
                            .map(|(name, selector)| {
                                let selector = wire::AudioSelector::builder()
                                    .set_default_selection(sdk_enum::<wire::AudioDefaultSelection>(
                                        &selector.default_selection,
                                    ))
                                    .build();
                                (name.clone(), selector)
                            })
                            .collect()
                    });
                wire::Input::builder()
                    .file_input(&input.file_input)
                    .set_audio_selectors(selectors)
                    .build()
            })
            .collect();
        let groups = settings.output_groups.iter().map(output_group_to_sdk).collect();

        wire::JobSettings::builder()
            .set_inputs(Some(inputs))
            .set_output_groups(Some(groups))
            .build()
    }
}

fn output_group_to_sdk(group: &OutputGroup) -> wire::OutputGroup {
    let settings = &group.output_group_settings;
    let hls = settings.hls_group_settings.as_ref().map(|hls| {
        wire::HlsGroupSettings::builder()
            .destination(&hls.destination)
            .segment_length(hls.segment_length)
            .min_segment_length(hls.min_segment_length)
            .build()
    });
    let file = settings.file_group_settings.as_ref().map(|file| {
        wire::FileGroupSettings::builder()
            .destination(&file.destination)
            .build()
    });
    let outputs = group
        .outputs
        .iter()
        .map(|output| {
            wire::Output::builder()
                .set_preset(output.preset.clone())
                .set_extension(output.extension.clone())
                .set_name_modifier(output.name_modifier.clone())
                .build()
        })
        .collect();

    wire::OutputGroup::builder()
        .set_name(group.name.clone())
        .output_group_settings(
            wire::OutputGroupSettings::builder()
                .r#type(wire::OutputGroupType::from(settings.group_type.as_str()))
                .set_hls_group_settings(hls)
                .set_file_group_settings(file)
                .build(),
        )
        .set_outputs(Some(outputs))
        .build()
}

impl From<&wire::JobSettings> for JobSettings {
    fn from(settings: &wire::JobSettings) -> Self {
        Self {
            inputs: settings
                .inputs()
                .iter()
                .map(|input| Input {
                    file_input: input.file_input().unwrap_or_default().to_string(),
                    audio_selectors: BTreeMap::new(),
                })
                .collect(),
            output_groups: settings
                .output_groups()
                .iter()
                .map(|group| OutputGroup {
                    name: owned(group.name()),
                    output_group_settings: group
                        .output_group_settings()
                        .map(|s| OutputGroupSettings {
                            group_type: s.r#type().map(|t| t.as_str().to_string()).unwrap_or_default(),
                            hls_group_settings: s.hls_group_settings().map(|hls| HlsGroupSettings {
                                destination: hls.destination().unwrap_or_default().to_string(),
                                segment_length: hls.segment_length().unwrap_or_default(),
                                min_segment_length: hls.min_segment_length().unwrap_or_default(),
                            }),
                            file_group_settings: s.file_group_settings().map(|file| {
                                FileGroupSettings {
                                    destination: file.destination().unwrap_or_default().to_string(),
                                }
                            }),
                        })
                        .unwrap_or_default(),
                    outputs: group
                        .outputs()
                        .iter()
                        .map(|output| Output {
                            preset: owned(output.preset()),
                            extension: owned(output.extension()),
                            name_modifier: owned(output.name_modifier()),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<&wire::Job> for Job {
    fn from(job: &wire::Job) -> Self {
        Self {
            id: owned(job.id()),
            arn: owned(job.arn()),
            status: job.status().map(|s| s.as_str().to_string()),
            error_code: job.error_code(),
            error_message: owned(job.error_message()),
            job_percent_complete: job.job_percent_complete(),
            queue: owned(job.queue()),
            settings: job.settings().map(JobSettings::from).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn queue_name_from_arn() {
        assert_eq!(
            queue_name("arn:aws:mediaconvert:us-east-1:123456789012:queues/Default"),
            "Default"
        );
        assert_eq!(queue_name("Default"), "Default");
    }

    fn h264_preset_settings() -> PresetSettings {
        PresetSettings {
            container_settings: Some(ContainerSettings {
                container: Some("M3U8".to_string()),
            }),
            video_description: Some(VideoDescription {
                width: None,
                height: Some(720),
                codec_settings: Some(VideoCodecSettings {
                    codec: Some("H_264".to_string()),
                    h264_settings: Some(EncoderSettings {
                        bitrate: Some(2_500_000),
                        rate_control_mode: Some("CBR".to_string()),
                        codec_level: Some("AUTO".to_string()),
                        gop_size: Some(90.0),
                        ..Default::default()
                    }),
                    h265_settings: None,
                }),
            }),
            audio_descriptions: vec![AudioDescription {
                codec_settings: Some(AudioCodecSettings {
                    codec: Some("AAC".to_string()),
                    aac_settings: Some(AacSettings {
                        bitrate: Some(128_000),
                        coding_mode: Some("CODING_MODE_2_0".to_string()),
                        sample_rate: Some(48_000),
                    }),
                }),
            }],
        }
    }

    #[test]
    fn preset_settings_survive_sdk_conversion() {
        let settings = h264_preset_settings();
        let sdk_settings = wire::PresetSettings::from(&settings);

        let container = sdk_settings
            .container_settings()
            .and_then(|c| c.container())
            .map(|c| c.as_str());
        assert_eq!(container, Some("M3U8"));
        let h264 = sdk_settings
            .video_description()
            .and_then(|v| v.codec_settings())
            .and_then(|c| c.h264_settings())
            .unwrap();
        assert_eq!(h264.bitrate(), Some(2_500_000));
        assert_eq!(h264.codec_level().map(|l| l.as_str()), Some("AUTO"));

        assert_eq!(PresetSettings::from(&sdk_settings), settings);
    }

    #[test]
    fn unknown_enum_values_are_kept_verbatim() {
        let container: Option<wire::ContainerType> = sdk_enum(&Some("FUTURE_CONTAINER".to_string()));
        assert_eq!(container.map(|c| c.as_str().to_string()).as_deref(), Some("FUTURE_CONTAINER"));
        assert!(sdk_enum::<wire::ContainerType>(&None).is_none());
    }

    #[test]
    fn job_settings_convert_to_sdk() {
        let settings = JobSettings {
            inputs: vec![Input {
                file_input: "s3://in/video.mp4".to_string(),
                audio_selectors: BTreeMap::from([(
                    "Audio Selector 1".to_string(),
                    AudioSelector {
                        default_selection: Some("DEFAULT".to_string()),
                    },
                )]),
            }],
            output_groups: vec![OutputGroup {
                name: Some("HLS".to_string()),
                output_group_settings: OutputGroupSettings {
                    group_type: "HLS_GROUP_SETTINGS".to_string(),
                    hls_group_settings: Some(HlsGroupSettings {
                        destination: "s3://out/abc/video/master".to_string(),
                        segment_length: 3,
                        min_segment_length: 0,
                    }),
                    file_group_settings: None,
                },
                outputs: vec![Output {
                    preset: Some("hls_540p".to_string()),
                    name_modifier: Some("_hls_540p".to_string()),
                    extension: None,
                }],
            }],
        };

        let sdk_settings = wire::JobSettings::from(&settings);
        assert_eq!(sdk_settings.inputs()[0].file_input(), Some("s3://in/video.mp4"));
        let group = &sdk_settings.output_groups()[0];
        let group_settings = group.output_group_settings().unwrap();
        assert_eq!(
            group_settings.r#type().map(|t| t.as_str()),
            Some("HLS_GROUP_SETTINGS")
        );
        assert_eq!(
            group_settings.hls_group_settings().and_then(|h| h.segment_length()),
            Some(3)
        );
        assert_eq!(group.outputs()[0].name_modifier(), Some("_hls_540p"));

        let back = JobSettings::from(&sdk_settings);
        assert_eq!(back.output_groups, settings.output_groups);
        assert_eq!(back.inputs[0].file_input, "s3://in/video.mp4");
    }

    #[test]
    fn job_response_decodes_settings_and_errors() {
        let body = json!({
            "job": {
                "id": "1521000000000-abcdef",
                "status": "ERROR",
                "errorCode": 1010,
                "errorMessage": "Unable to open input file",
                "settings": {
                    "inputs": [{ "fileInput": "s3://in/video.mp4" }],
                    "outputGroups": [{
                        "outputGroupSettings": {
                            "type": "FILE_GROUP_SETTINGS",
                            "fileGroupSettings": { "destination": "s3://out/abc/hd/video" }
                        },
                        "outputs": [{ "preset": "hd", "extension": "mp4" }]
                    }]
                }
            }
        });

        let job = serde_json::from_value::<JobResponse>(body).unwrap().job;
        assert_eq!(job.status.as_deref(), Some("ERROR"));
        assert_eq!(job.error_code, Some(1010));
        assert_eq!(job.settings.inputs[0].file_input, "s3://in/video.mp4");
        assert_eq!(
            job.settings.output_groups[0].destination(),
            Some("s3://out/abc/hd/video")
        );
    }

    #[test]
    fn preset_container_is_optional() {
        let preset: Preset = serde_json::from_value(json!({
            "name": "hls",
            "settings": { "containerSettings": { "container": "M3U8" } }
        }))
        .unwrap();
        assert_eq!(preset.container(), Some("M3U8"));
        assert_eq!(Preset::default().container(), None);
    }

    #[test]
    fn hls_group_serializes_camel_case() {
        let group = OutputGroup {
            name: None,
            output_group_settings: OutputGroupSettings {
                group_type: "HLS_GROUP_SETTINGS".to_string(),
                hls_group_settings: Some(HlsGroupSettings {
                    destination: "s3://out/abc/video/master".to_string(),
                    segment_length: 3,
                    min_segment_length: 0,
                }),
                file_group_settings: None,
            },
            outputs: vec![],
        };
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "outputGroupSettings": {
                    "type": "HLS_GROUP_SETTINGS",
                    "hlsGroupSettings": {
                        "destination": "s3://out/abc/video/master",
                        "segmentLength": 3,
                        "minSegmentLength": 0
                    }
                },
                "outputs": []
            })
        );
    }
}
