//! Jobs, transcoding requests and canonical job status.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::preset::PresetMap;

/// A transcoding job as seen by the caller.
///
/// The ID is assigned before transcoding begins and prefixes every output
/// artifact the job produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
}

impl Job {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into() }
    }

    /// Create a job with a random 32-character hexadecimal ID.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Parameters that only apply to adaptive-streaming outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingParams {
    /// Segment duration in seconds.
    #[serde(default = "default_segment_duration")]
    pub segment_duration: u32,
    /// Streaming protocol tag, informational (e.g. `"hls"`).
    #[serde(default)]
    pub protocol: String,
}

fn default_segment_duration() -> u32 {
    3
}

impl Default for StreamingParams {
    fn default() -> Self {
        Self {
            segment_duration: default_segment_duration(),
            protocol: String::new(),
        }
    }
}

/// The unit of work for a single `transcode` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeProfile {
    /// Location of the source media, either an object key or an
    /// `s3://bucket/key` URI.
    pub source_media: String,
    /// Presets to produce, in submission order.
    pub presets: Vec<PresetMap>,
    #[serde(default)]
    pub streaming_params: StreamingParams,
}

impl TranscodeProfile {
    pub fn new<S: Into<String>>(source_media: S, presets: Vec<PresetMap>) -> Self {
        Self {
            source_media: source_media.into(),
            presets,
            streaming_params: StreamingParams::default(),
        }
    }

    #[must_use]
    pub fn with_segment_duration(mut self, seconds: u32) -> Self {
        self.streaming_params.segment_duration = seconds;
        self
    }
}

/// Canonical job state. Closed: vendor states outside the recognised set
/// are reported as [`Status::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Queued,
    Started,
    Finished,
    Failed,
    Canceled,
}

impl Status {
    /// Returns `true` once the job can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Canceled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Started => write!(f, "started"),
            Self::Finished => write!(f, "finished"),
            Self::Failed => write!(f, "failed"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

/// Provider-specific diagnostics attached to a [`JobStatus`].
///
/// An ordered list of string pairs. Keys are vendor vocabulary and carry no
/// meaning for the canonical model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderStatus(Vec<(String, String)>);

impl ProviderStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.push((key.into(), value.into()));
    }

    /// First value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProviderStatus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Canonical, provider-stamped result of a submission or status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub provider_name: String,
    pub provider_job_id: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "ProviderStatus::is_empty")]
    pub provider_status: ProviderStatus,
    /// Where the job's outputs live. Holds diagnostic text instead when the
    /// destination could not be resolved.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output_destination: String,
}

impl JobStatus {
    /// Status returned right after a successful submission.
    pub fn queued<N: Into<String>, I: Into<String>>(provider_name: N, provider_job_id: I) -> Self {
        Self {
            provider_name: provider_name.into(),
            provider_job_id: provider_job_id.into(),
            status: Status::Queued,
            provider_status: ProviderStatus::new(),
            output_destination: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_hex() {
        let a = Job::generate();
        let b = Job::generate();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Canceled).unwrap(), "\"canceled\"");
        let status: Status = serde_json::from_str("\"started\"").unwrap();
        assert_eq!(status, Status::Started);
        assert_eq!(Status::Queued.to_string(), "queued");
    }

    #[test]
    fn terminal_states() {
        assert!(!Status::Queued.is_terminal());
        assert!(!Status::Started.is_terminal());
        assert!(Status::Finished.is_terminal());
        assert!(Status::Failed.is_terminal());
        assert!(Status::Canceled.is_terminal());
    }

    #[test]
    fn provider_status_keeps_insertion_order() {
        let mut bag = ProviderStatus::new();
        bag.push("status", "Progressing");
        bag.push("output:abc/hd/video.mp4", "");
        bag.push("output:abc/sd/video.mp4", "Job timed out");

        let keys: Vec<&str> = bag.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["status", "output:abc/hd/video.mp4", "output:abc/sd/video.mp4"]);
        assert_eq!(bag.get("status"), Some("Progressing"));
        assert_eq!(bag.get("missing"), None);

        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(json[0][0], "status");
        assert_eq!(json[2][1], "Job timed out");
    }

    #[test]
    fn profile_defaults_streaming_params() {
        let profile: TranscodeProfile = serde_json::from_str(
            r#"{"source_media": "video.mp4", "presets": []}"#,
        )
        .unwrap();
        assert_eq!(profile.streaming_params.segment_duration, 3);

        let profile = TranscodeProfile::new("video.mp4", Vec::new()).with_segment_duration(6);
        assert_eq!(profile.streaming_params.segment_duration, 6);
    }

    #[test]
    fn queued_status_omits_empty_fields() {
        let status = JobStatus::queued("elastictranscoder", "1234-abcd");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "queued");
        assert_eq!(json["provider_job_id"], "1234-abcd");
        assert!(json.get("provider_status").is_none());
        assert!(json.get("output_destination").is_none());
    }
}
