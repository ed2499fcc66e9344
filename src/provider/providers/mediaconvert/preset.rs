//! Canonical preset to MediaConvert preset translation.
//!
//! MediaConvert takes bitrates in bits per second, so they pass through
//! unchanged. Unset values, and values beyond the API's 32-bit fields, are
//! left out for the service to choose.

use transcoding_common::Preset;

use super::api::{
    AacSettings, AudioCodecSettings, AudioDescription, ContainerSettings, CreatePresetRequest,
    EncoderSettings, PresetSettings, VideoCodecSettings, VideoDescription,
};

/// Container token of segmented (HLS) presets.
pub const SEGMENTED_CONTAINER: &str = "M3U8";

const H264: &str = "H_264";
const H265: &str = "H_265";
const AAC: &str = "AAC";
const AUTO_LEVEL: &str = "AUTO";
const AAC_CODING_MODE: &str = "CODING_MODE_2_0";
const AAC_SAMPLE_RATE: i32 = 48_000;

pub fn create_preset_request(preset: &Preset) -> CreatePresetRequest {
    CreatePresetRequest {
        name: preset.name.clone(),
        description: Some(preset.description.clone()).filter(|d| !d.is_empty()),
        settings: PresetSettings {
            container_settings: Some(ContainerSettings {
                container: Some(container(&preset.container)),
            }),
            video_description: Some(video_description(preset)),
            audio_descriptions: vec![audio_description(preset)],
        },
    }
}

fn container(canonical: &str) -> String {
    match canonical {
        "m3u8" => SEGMENTED_CONTAINER.to_string(),
        "mp4" | "webm" | "mov" => canonical.to_uppercase(),
        other => other.to_string(),
    }
}

fn video_codec(canonical: &str) -> &str {
    match canonical {
        "h264" => H264,
        "h265" | "hevc" => H265,
        other => other,
    }
}

fn bitrate(bits_per_second: u64) -> Option<i32> {
    i32::try_from(bits_per_second).ok().filter(|b| *b > 0)
}

fn dimension(pixels: Option<u32>) -> Option<i32> {
    pixels.and_then(|p| i32::try_from(p).ok())
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// `"4.1"` to `LEVEL_4_1`; unset levels let the encoder decide.
fn codec_level(level: &str) -> String {
    match non_empty(level) {
        Some(level) => format!("LEVEL_{}", level.replace('.', "_")),
        None => AUTO_LEVEL.to_string(),
    }
}

fn codec_profile(codec: &str, profile: &str) -> Option<String> {
    let profile = non_empty(profile)?.to_uppercase();
    Some(match codec {
        H265 => format!("{profile}_MAIN"),
        _ => profile,
    })
}

fn interlace_mode(mode: &str) -> Option<String> {
    let mode = match non_empty(mode)? {
        "progressive" => "PROGRESSIVE",
        "top" | "tff" => "TOP_FIELD",
        "bottom" | "bff" => "BOTTOM_FIELD",
        other => return Some(other.to_uppercase()),
    };
    Some(mode.to_string())
}

fn video_description(preset: &Preset) -> VideoDescription {
    let video = &preset.video;
    let codec = video_codec(&video.codec);

    let settings = EncoderSettings {
        bitrate: bitrate(video.bitrate),
        rate_control_mode: non_empty(&preset.rate_control).map(str::to_uppercase),
        codec_profile: codec_profile(codec, &preset.profile),
        codec_level: Some(codec_level(&preset.profile_level)),
        gop_size: video.gop_size.map(f64::from),
        gop_size_units: video.gop_size.map(|_| "FRAMES".to_string()),
        scene_change_detect: (video.gop_mode == "fixed").then(|| "DISABLED".to_string()),
        interlace_mode: interlace_mode(&video.interlace_mode),
    };

    let (h264_settings, h265_settings) = match codec {
        H264 => (Some(settings), None),
        H265 => (None, Some(settings)),
        _ => (None, None),
    };

    VideoDescription {
        width: dimension(video.width),
        height: dimension(video.height),
        codec_settings: Some(VideoCodecSettings {
            codec: Some(codec.to_string()),
            h264_settings,
            h265_settings,
        }),
    }
}

fn audio_description(preset: &Preset) -> AudioDescription {
    let audio = &preset.audio;
    let codec = match audio.codec.as_str() {
        "aac" => AAC,
        other => other,
    };

    let aac_settings = (codec == AAC).then(|| AacSettings {
        bitrate: bitrate(audio.bitrate),
        coding_mode: Some(AAC_CODING_MODE.to_string()),
        sample_rate: Some(AAC_SAMPLE_RATE),
    });

    AudioDescription {
        codec_settings: Some(AudioCodecSettings {
            codec: Some(codec.to_string()),
            aac_settings,
        }),
    }
}
