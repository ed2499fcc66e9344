use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_AWS_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub elastictranscoder: ElasticTranscoderConfig,

    #[serde(default)]
    pub mediaconvert: MediaConvertConfig,
}

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ElasticTranscoderConfig {
    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: String,

    /// AWS region (default: us-east-1)
    #[serde(default)]
    pub region: String,

    /// Pipeline every job is submitted through
    #[serde(default)]
    pub pipeline_id: String,

    /// Override for the regional API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ElasticTranscoderConfig {
    pub fn region(&self) -> &str {
        region_or_default(&self.region)
    }
}

impl fmt::Debug for ElasticTranscoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticTranscoderConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redacted(&self.secret_access_key))
            .field("session_token", &redacted(&self.session_token))
            .field("region", &self.region)
            .field("pipeline_id", &self.pipeline_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct MediaConvertConfig {
    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: String,

    /// AWS region (default: us-east-1)
    #[serde(default)]
    pub region: String,

    /// Account-specific API endpoint, e.g. `https://abcd1234.mediaconvert.us-east-1.amazonaws.com`
    #[serde(default)]
    pub endpoint: String,

    /// Queue ARN jobs are submitted to
    #[serde(default)]
    pub queue: String,

    /// IAM role ARN MediaConvert assumes to read sources and write outputs
    #[serde(default)]
    pub role: String,

    /// Output location prefix, e.g. `s3://bucket/outputs`
    #[serde(default)]
    pub destination: String,
}

impl MediaConvertConfig {
    pub fn region(&self) -> &str {
        region_or_default(&self.region)
    }
}

impl fmt::Debug for MediaConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConvertConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redacted(&self.secret_access_key))
            .field("session_token", &redacted(&self.session_token))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("queue", &self.queue)
            .field("role", &self.role)
            .field("destination", &self.destination)
            .finish()
    }
}

/// Placeholder shown instead of a secret; unset secrets stay visibly empty.
fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

fn region_or_default(region: &str) -> &str {
    if region.is_empty() {
        DEFAULT_AWS_REGION
    } else {
        region
    }
}
