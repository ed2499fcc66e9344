mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Load config from default locations or fall back to environment-only config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./transcoding-api.toml",
        "~/.config/transcoding-api/config.toml",
        "/etc/transcoding-api/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overlay credentials and provider settings from the environment.
///
/// `lookup` returns the value of a variable; empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("AWS_ACCESS_KEY_ID") {
        config.elastictranscoder.access_key_id = v.clone();
        config.mediaconvert.access_key_id = v;
    }
    if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
        config.elastictranscoder.secret_access_key = v.clone();
        config.mediaconvert.secret_access_key = v;
    }
    if let Some(v) = get("AWS_SESSION_TOKEN") {
        config.elastictranscoder.session_token = v.clone();
        config.mediaconvert.session_token = v;
    }
    if let Some(v) = get("AWS_REGION") {
        config.elastictranscoder.region = v.clone();
        config.mediaconvert.region = v;
    }

    if let Some(v) = get("ELASTICTRANSCODER_PIPELINE_ID") {
        config.elastictranscoder.pipeline_id = v;
    }
    if let Some(v) = get("ELASTICTRANSCODER_ENDPOINT") {
        config.elastictranscoder.endpoint = Some(v);
    }

    if let Some(v) = get("MEDIACONVERT_ENDPOINT") {
        config.mediaconvert.endpoint = v;
    }
    if let Some(v) = get("MEDIACONVERT_QUEUE_ARN") {
        config.mediaconvert.queue = v;
    }
    if let Some(v) = get("MEDIACONVERT_ROLE_ARN") {
        config.mediaconvert.role = v;
    }
    if let Some(v) = get("MEDIACONVERT_DESTINATION") {
        config.mediaconvert.destination = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parses_provider_tables() {
        let config: Config = toml::from_str(
            r#"
            [elastictranscoder]
            access_key_id = "AKID"
            secret_access_key = "secret"
            pipeline_id = "1111111111111-abcde1"

            [mediaconvert]
            endpoint = "https://abcd1234.mediaconvert.us-west-2.amazonaws.com"
            region = "us-west-2"
            "#,
        )
        .unwrap();

        assert_eq!(config.elastictranscoder.pipeline_id, "1111111111111-abcde1");
        assert_eq!(config.elastictranscoder.region(), DEFAULT_AWS_REGION);
        assert_eq!(config.elastictranscoder.endpoint, None);
        assert_eq!(config.mediaconvert.region(), "us-west-2");
        assert!(config.mediaconvert.queue.is_empty());
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.elastictranscoder.access_key_id.is_empty());
        assert!(config.mediaconvert.destination.is_empty());
    }

    #[test]
    fn env_overrides_shared_credentials() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("AWS_ACCESS_KEY_ID", "AKID"),
                ("AWS_SECRET_ACCESS_KEY", "secret"),
                ("AWS_REGION", "eu-west-1"),
                ("ELASTICTRANSCODER_PIPELINE_ID", "pipeline"),
                ("MEDIACONVERT_QUEUE_ARN", "arn:aws:mediaconvert:eu-west-1:1:queues/Default"),
            ]),
        );

        assert_eq!(config.elastictranscoder.access_key_id, "AKID");
        assert_eq!(config.mediaconvert.access_key_id, "AKID");
        assert_eq!(config.mediaconvert.secret_access_key, "secret");
        assert_eq!(config.elastictranscoder.region(), "eu-west-1");
        assert_eq!(config.elastictranscoder.pipeline_id, "pipeline");
        assert_eq!(
            config.mediaconvert.queue,
            "arn:aws:mediaconvert:eu-west-1:1:queues/Default"
        );
    }

    #[test]
    fn session_token_from_file_or_env() {
        let mut config: Config = toml::from_str(
            r#"
            [mediaconvert]
            session_token = "file-token"
            "#,
        )
        .unwrap();
        assert_eq!(config.mediaconvert.session_token, "file-token");
        assert!(config.elastictranscoder.session_token.is_empty());

        apply_env_overrides(&mut config, env(&[("AWS_SESSION_TOKEN", "env-token")]));
        assert_eq!(config.elastictranscoder.session_token, "env-token");
        assert_eq!(config.mediaconvert.session_token, "env-token");
    }

    #[test]
    fn empty_env_values_do_not_clobber_file_values() {
        let mut config = Config::default();
        config.elastictranscoder.pipeline_id = "from-file".to_string();
        apply_env_overrides(&mut config, env(&[("ELASTICTRANSCODER_PIPELINE_ID", "")]));
        assert_eq!(config.elastictranscoder.pipeline_id, "from-file");
    }
}
