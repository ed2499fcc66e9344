//! Output naming shared by every adapter.
//!
//! Output keys are a pure function of their inputs. Downstream systems
//! recompute them to find finished outputs, so the layout below must stay
//! stable.

use transcoding_common::OutputOptions;

const S3_SCHEME: &str = "s3://";

/// Last path segment of every adaptive-streaming output key. The vendor
/// writes segment files under this prefix.
pub const SEGMENT_PREFIX: &str = "video";

/// Object key of the source media.
///
/// `s3://bucket/path/video.mp4` becomes `path/video.mp4`: the bucket comes
/// from provider configuration, not from the job. Other sources are
/// returned unchanged.
pub fn normalize_source(source: &str) -> &str {
    match source.strip_prefix(S3_SCHEME) {
        Some(rest) => rest.split_once('/').map_or(rest, |(_, key)| key),
        None => source,
    }
}

/// Strip the extension from a file name. Dot-files keep their name.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// Key of one output.
///
/// - regular: `<job>/<source dirs>/<preset>/<basename>.<ext>`
/// - adaptive: `<job>/<source dirs>/<basename>/<preset>/video`
///
/// `source` is an object key as returned by [`normalize_source`].
pub fn output_key(
    job_id: &str,
    options: &OutputOptions,
    source: &str,
    preset_name: &str,
    adaptive_streaming: bool,
) -> String {
    let mut parts: Vec<&str> = std::iter::once(job_id).chain(source.split('/')).collect();
    let file_name = parts.pop().unwrap_or_default();
    let stem = strip_extension(file_name);

    if adaptive_streaming {
        parts.extend([stem, preset_name, SEGMENT_PREFIX]);
        parts.join("/")
    } else {
        let extension = options.extension.trim_start_matches('.');
        parts.push(preset_name);
        format!("{}/{stem}.{extension}", parts.join("/"))
    }
}

/// Name of the master playlist: `<job>/<source without extension>/master`.
///
/// Sits next to the adaptive outputs built by [`output_key`].
pub fn playlist_name(job_id: &str, source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file_name)) => format!("{job_id}/{dir}/{}/master", strip_extension(file_name)),
        None => format!("{job_id}/{}/master", strip_extension(source)),
    }
}

/// One output of a submission once its native preset has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub preset_name: String,
    pub preset_id: String,
    pub key: String,
    pub adaptive_streaming: bool,
}

/// The single master playlist of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    /// Keys of every adaptive output, in submission order.
    pub output_keys: Vec<String>,
}

/// Assemble the job's playlist, or `None` when no output is adaptive.
pub fn playlist(job_id: &str, source: &str, outputs: &[PlannedOutput]) -> Option<Playlist> {
    let output_keys: Vec<String> = outputs
        .iter()
        .filter(|o| o.adaptive_streaming)
        .map(|o| o.key.clone())
        .collect();

    if output_keys.is_empty() {
        return None;
    }

    Some(Playlist {
        name: playlist_name(job_id, source),
        output_keys,
    })
}

/// Drop `trailing` path segments from `location`.
pub fn parent_destination(location: &str, trailing: usize) -> String {
    let segments: Vec<&str> = location.split('/').collect();
    let keep = segments.len().saturating_sub(trailing);
    segments[..keep].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(key: &str, adaptive: bool) -> PlannedOutput {
        PlannedOutput {
            preset_name: "p".to_string(),
            preset_id: "id".to_string(),
            key: key.to_string(),
            adaptive_streaming: adaptive,
        }
    }

    #[test]
    fn normalizes_s3_sources() {
        assert_eq!(normalize_source("s3://bucket/path/video.mp4"), "path/video.mp4");
        assert_eq!(normalize_source("s3://bucket/video.mp4"), "video.mp4");
        assert_eq!(normalize_source("path/video.mp4"), "path/video.mp4");
        assert_eq!(normalize_source("http://host/video.mp4"), "http://host/video.mp4");
    }

    #[test]
    fn regular_output_key() {
        let key = output_key(
            "abc",
            &OutputOptions::new("mp4"),
            normalize_source("s3://bucket/path/video.mp4"),
            "hd",
            false,
        );
        assert_eq!(key, "abc/path/hd/video.mp4");
    }

    #[test]
    fn regular_output_key_accepts_dotted_extension() {
        let key = output_key("abc", &OutputOptions::new(".webm"), "video.mov", "720p", false);
        assert_eq!(key, "abc/720p/video.webm");
    }

    #[test]
    fn adaptive_output_key() {
        let key = output_key("abc", &OutputOptions::new("m3u8"), "video.mp4", "hls_1080p", true);
        assert_eq!(key, "abc/video/hls_1080p/video");

        let key = output_key("abc", &OutputOptions::default(), "path/to/video.mp4", "hls_360p", true);
        assert_eq!(key, "abc/path/to/video/hls_360p/video");
    }

    #[test]
    fn output_key_is_idempotent() {
        let opts = OutputOptions::new("mp4");
        for source in ["video.mp4", "a/b/c.mkv", "no_extension", "dir/movie.final.mov"] {
            for adaptive in [false, true] {
                let first = output_key("job1", &opts, source, "hd", adaptive);
                let second = output_key("job1", &opts, source, "hd", adaptive);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn extension_stripping() {
        assert_eq!(strip_extension("video.mp4"), "video");
        assert_eq!(strip_extension("movie.final.mov"), "movie.final");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("clip4.mp4"), "clip4");
    }

    #[test]
    fn playlist_names() {
        assert_eq!(playlist_name("abc", "video.mp4"), "abc/video/master");
        assert_eq!(playlist_name("abc", "path/video.mp4"), "abc/path/video/master");
    }

    #[test]
    fn no_playlist_without_adaptive_outputs() {
        let outputs = [planned("abc/hd/video.mp4", false), planned("abc/sd/video.mp4", false)];
        assert_eq!(playlist("abc", "video.mp4", &outputs), None);
        assert_eq!(playlist("abc", "video.mp4", &[]), None);
    }

    #[test]
    fn one_playlist_lists_adaptive_keys_in_order() {
        let outputs = [
            planned("abc/video/hls_720p/video", true),
            planned("abc/hd/video.mp4", false),
            planned("abc/video/hls_360p/video", true),
        ];

        let playlist = playlist("abc", "video.mp4", &outputs).unwrap();
        assert_eq!(playlist.name, "abc/video/master");
        assert_eq!(
            playlist.output_keys,
            ["abc/video/hls_720p/video", "abc/video/hls_360p/video"]
        );
    }

    #[test]
    fn parent_destination_drops_trailing_segments() {
        assert_eq!(
            parent_destination("s3://bucket/abc/path/hd/video.mp4", 2),
            "s3://bucket/abc/path"
        );
        assert_eq!(parent_destination("a/b", 5), "");
        assert_eq!(parent_destination("s3://bucket/abc", 0), "s3://bucket/abc");
    }
}
