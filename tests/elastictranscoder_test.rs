//! Elastic Transcoder adapter against a mock REST endpoint.
//!
//! Requests are built and signed by the AWS SDK; the mock stands in for the
//! regional endpoint through the `endpoint` override.

use std::sync::Arc;

use serde_json::{json, Value};
use transcoding_api::config::Config;
use transcoding_api::provider::{Provider, ProviderRegistry};
use transcoding_common::{Error, Job, OutputOptions, PresetMap, Status, TranscodeProfile};
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PIPELINE: &str = "1111111111111-abcde1";

fn config(endpoint: String) -> Config {
    let mut config = Config::default();
    let et = &mut config.elastictranscoder;
    et.access_key_id = "AKIDEXAMPLE".to_string();
    et.secret_access_key = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string();
    et.pipeline_id = PIPELINE.to_string();
    et.endpoint = Some(endpoint);
    config
}

fn build(config: &Config) -> Arc<dyn Provider> {
    ProviderRegistry::with_defaults()
        .build("elastictranscoder", config)
        .unwrap()
}

fn provider(server: &MockServer) -> Arc<dyn Provider> {
    build(&config(server.uri()))
}

async fn mount_preset(server: &MockServer, id: &str, container: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/2012-09-25/presets/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Preset": { "Id": id, "Name": id, "Container": container, "Type": "Custom" }
        })))
        .mount(server)
        .await;
}

fn preset_map(name: &str, id: &str, extension: &str) -> PresetMap {
    PresetMap::new(name, OutputOptions::new(extension)).with_provider("elastictranscoder", id)
}

#[tokio::test]
async fn transcode_submits_signed_job_with_playlist() {
    let server = MockServer::start().await;
    mount_preset(&server, "p-720", "ts").await;
    mount_preset(&server, "p-mp4", "mp4").await;

    Mock::given(method("POST"))
        .and(path("/2012-09-25/jobs"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_partial_json(json!({
            "PipelineId": PIPELINE,
            "Input": { "Key": "uploads/movie.mov" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "Job": { "Id": "1396802241671-jkmme8", "Status": "Submitted" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = TranscodeProfile::new(
        "s3://source-bucket/uploads/movie.mov",
        vec![
            preset_map("hls_720p", "p-720", "m3u8"),
            preset_map("mp4_1080p", "p-mp4", "mp4"),
        ],
    );
    let status = provider(&server)
        .transcode(&Job::new("job-42"), &profile)
        .await
        .unwrap();

    assert_eq!(status.provider_job_id, "1396802241671-jkmme8");
    assert_eq!(status.status, Status::Queued);

    let requests = server.received_requests().await.unwrap();
    let submitted = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: Value = submitted.body_json().unwrap();
    assert_eq!(
        body["Outputs"],
        json!([
            { "Key": "job-42/uploads/movie/hls_720p/video", "PresetId": "p-720", "SegmentDuration": "3" },
            { "Key": "job-42/uploads/mp4_1080p/movie.mp4", "PresetId": "p-mp4" }
        ])
    );
    assert_eq!(
        body["Playlists"],
        json!([{
            "Name": "job-42/uploads/movie/master",
            "Format": "HLSv3",
            "OutputKeys": ["job-42/uploads/movie/hls_720p/video"]
        }])
    );

    let auth = submitted.headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(auth.contains("/us-east-1/elastictranscoder/aws4_request"));
}

#[tokio::test]
async fn unmapped_preset_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2012-09-25/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let profile = TranscodeProfile::new(
        "movie.mov",
        vec![PresetMap::new("hd", OutputOptions::new("mp4")).with_provider("mediaconvert", "hd")],
    );
    let err = provider(&server)
        .transcode(&Job::new("job-42"), &profile)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PresetMapNotFound { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn vendor_error_text_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2012-09-25/presets/p-gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-amzn-ErrorType", "ResourceNotFoundException:http://internal.amazon.com/")
                .set_body_json(json!({ "message": "The specified preset was not found: presetId=p-gone" })),
        )
        .mount(&server)
        .await;

    let profile = TranscodeProfile::new("movie.mov", vec![preset_map("hd", "p-gone", "mp4")]);
    let err = provider(&server)
        .transcode(&Job::new("job-42"), &profile)
        .await
        .unwrap_err();

    assert!(err.is_vendor());
    assert_eq!(
        err.to_string(),
        "ResourceNotFoundException: The specified preset was not found: presetId=p-gone"
    );
}

async fn mount_progressing_job(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/2012-09-25/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Job": {
                "Id": "job-1",
                "PipelineId": PIPELINE,
                "Status": "Progressing",
                "Outputs": [
                    { "Key": "job-42/uploads/hd/movie.mp4", "Status": "Progressing" }
                ]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn progressing_job_is_started() {
    let server = MockServer::start().await;
    mount_progressing_job(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/2012-09-25/pipelines/{PIPELINE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Pipeline": { "Id": PIPELINE, "OutputBucket": "output-bucket", "Status": "Active" }
        })))
        .mount(&server)
        .await;

    let status = provider(&server).job_status("job-1").await.unwrap();
    assert_eq!(status.status, Status::Started);
    assert_eq!(status.provider_status.get("status"), Some("Progressing"));
    assert_eq!(status.output_destination, "s3://output-bucket/job-42/uploads");
}

#[tokio::test]
async fn pipeline_failure_is_reported_in_destination() {
    let server = MockServer::start().await;
    mount_progressing_job(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/2012-09-25/pipelines/{PIPELINE}")))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-amzn-ErrorType", "AccessDeniedException")
                .set_body_json(json!({ "message": "User is not authorized to perform ReadPipeline" })),
        )
        .mount(&server)
        .await;

    let status = provider(&server).job_status("job-1").await.unwrap();
    assert_eq!(status.status, Status::Started);
    assert_eq!(
        status.output_destination,
        "AccessDeniedException: User is not authorized to perform ReadPipeline"
    );
}

#[tokio::test]
async fn delete_and_healthcheck() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/2012-09-25/presets/p-old"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/2012-09-25/pipelines/{PIPELINE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Pipeline": { "Id": PIPELINE, "OutputBucket": "output-bucket" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server);
    provider.delete_preset("p-old").await.unwrap();
    provider.healthcheck().await.unwrap();
}

#[tokio::test]
async fn session_token_is_sent_with_signed_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/2012-09-25/pipelines/{PIPELINE}")))
        .and(header("x-amz-security-token", "FwoGZXIvYXdzEXAMPLE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Pipeline": { "Id": PIPELINE, "OutputBucket": "output-bucket" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config(server.uri());
    config.elastictranscoder.session_token = "FwoGZXIvYXdzEXAMPLE".to_string();
    build(&config).healthcheck().await.unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_is_a_vendor_error() {
    // Nothing listens on the discard port.
    let err = build(&config("http://127.0.0.1:9".to_string()))
        .healthcheck()
        .await
        .unwrap_err();

    assert!(err.is_vendor());
    assert!(
        err.to_string().starts_with("elastictranscoder request failed: "),
        "{err}"
    );
}
