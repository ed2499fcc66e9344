//! Canonical preset to Elastic Transcoder preset translation.

use std::collections::BTreeMap;

use transcoding_common::Preset;

use super::api::{AudioParameters, CreatePresetRequest, Thumbnails, VideoParameters};

/// Container token of segmented (HLS) presets.
pub const SEGMENTED_CONTAINER: &str = "ts";

const AUTO: &str = "auto";
const SIZING_POLICY: &str = "Fill";
const PADDING_POLICY: &str = "Pad";
const MAX_REFERENCE_FRAMES: &str = "2";

/// Build the CreatePreset request for `preset`.
pub fn create_preset_request(preset: &Preset) -> CreatePresetRequest {
    CreatePresetRequest {
        name: preset.name.clone(),
        description: Some(preset.description.clone()).filter(|d| !d.is_empty()),
        container: container(&preset.container).to_string(),
        video: video_parameters(preset),
        audio: audio_parameters(preset),
        thumbnails: thumbnails(),
    }
}

/// Bits per second to the kilobit strings Elastic Transcoder expects.
pub fn kbps(bits_per_second: u64) -> String {
    (bits_per_second / 1000).to_string()
}

fn container(canonical: &str) -> &str {
    match canonical {
        "m3u8" => SEGMENTED_CONTAINER,
        other => other,
    }
}

fn video_codec(canonical: &str) -> &str {
    match canonical {
        "h264" => "H.264",
        other => other,
    }
}

fn audio_codec(canonical: &str) -> &str {
    match canonical {
        "aac" => "AAC",
        other => other,
    }
}

fn dimension(value: Option<u32>) -> Option<String> {
    Some(value.map_or_else(|| AUTO.to_string(), |v| v.to_string()))
}

fn video_parameters(preset: &Preset) -> VideoParameters {
    let video = &preset.video;

    let mut codec_options = BTreeMap::new();
    if !preset.profile.is_empty() {
        codec_options.insert("Profile".to_string(), preset.profile.to_lowercase());
    }
    if !preset.profile_level.is_empty() {
        codec_options.insert("Level".to_string(), preset.profile_level.clone());
    }
    codec_options.insert(
        "MaxReferenceFrames".to_string(),
        MAX_REFERENCE_FRAMES.to_string(),
    );

    VideoParameters {
        codec: Some(video_codec(&video.codec).to_string()),
        codec_options,
        keyframes_max_dist: video.gop_size.map(|g| g.to_string()),
        fixed_gop: (video.gop_mode == "fixed").then(|| "true".to_string()),
        bit_rate: Some(kbps(video.bitrate)),
        frame_rate: Some(AUTO.to_string()),
        max_width: dimension(video.width),
        max_height: dimension(video.height),
        display_aspect_ratio: Some(AUTO.to_string()),
        sizing_policy: Some(SIZING_POLICY.to_string()),
        padding_policy: Some(PADDING_POLICY.to_string()),
    }
}

fn audio_parameters(preset: &Preset) -> AudioParameters {
    AudioParameters {
        codec: Some(audio_codec(&preset.audio.codec).to_string()),
        sample_rate: Some(AUTO.to_string()),
        bit_rate: Some(kbps(preset.audio.bitrate)),
        channels: Some(AUTO.to_string()),
    }
}

/// Thumbnail settings are fixed for every preset.
fn thumbnails() -> Thumbnails {
    Thumbnails {
        format: Some("png".to_string()),
        interval: Some("1".to_string()),
        max_width: Some(AUTO.to_string()),
        max_height: Some(AUTO.to_string()),
        sizing_policy: Some(SIZING_POLICY.to_string()),
        padding_policy: Some(PADDING_POLICY.to_string()),
    }
}
