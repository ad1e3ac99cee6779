mod common;

use common::*;
use vidprobe::config::KIB;
use vidprobe::metadata::{probe_remote_detailed, read_remote_metadata};
use vidprobe::{
    extract_metadata, extract_video_metadata, ContainerFormat, ProbeConfig, SeekableHttpStream,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Serves `bytes=a-b` ranges of a fixed body the way a static file server does.
struct RangeResponder(Vec<u8>);

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let range = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("bytes="))
            .and_then(|v| v.split_once('-'))
            .and_then(|(a, b)| Some((a.parse::<usize>().ok()?, b.parse::<usize>().ok()?)));

        match range {
            Some((start, _)) if start >= self.0.len() => ResponseTemplate::new(416),
            Some((start, end)) => {
                let end = end.min(self.0.len() - 1);
                ResponseTemplate::new(206).set_body_bytes(self.0[start..=end].to_vec())
            }
            None => ResponseTemplate::new(200).set_body_bytes(self.0.clone()),
        }
    }
}

async fn serve(file_name: &str, data: Vec<u8>) -> (MockServer, String) {
    let mock_server = MockServer::start().await;
    let route = format!("/{}", file_name);
    let len_header = data.len().to_string();

    Mock::given(method("HEAD"))
        .and(path(route.as_str()))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Content-Length", len_header.as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(RangeResponder(data))
        .mount(&mock_server)
        .await;

    let url = format!("{}{}", mock_server.uri(), route);
    (mock_server, url)
}

fn small_windows() -> ProbeConfig {
    ProbeConfig {
        head_window_bytes: 8 * KIB,
        tail_window_bytes: 8 * KIB,
        whole_file_limit_bytes: 0,
        avi_window_bytes: 8 * KIB,
    }
}

#[tokio::test]
async fn test_fast_start_skips_tail_request() {
    let (_server, url) = serve("fast.mp4", fast_start_mp4(60_000)).await;
    let mut stream = SeekableHttpStream::new(url).await.expect("stream");

    let metadata = extract_video_metadata(&mut stream, &small_windows())
        .await
        .expect("metadata");
    assert_eq!(metadata.duration_seconds, 5.0);
    assert_eq!((metadata.width, metadata.height), (1280, 720));

    // HEAD, the cached signature read, and the rest of the head window.
    assert_eq!(stream.http_request_count(), 3);
    assert_eq!(stream.http_request_bytes_read(), 8 * KIB);
}

#[tokio::test]
async fn test_moov_at_end_reads_tail() {
    let data = moov_at_end_mp4(60_000);
    let size = data.len() as u64;
    let (_server, url) = serve("tail.mp4", data).await;
    let mut stream = SeekableHttpStream::new(url).await.expect("stream");

    let metadata = extract_video_metadata(&mut stream, &small_windows())
        .await
        .expect("metadata");
    assert_eq!(metadata.duration_seconds, 10.0);
    assert_eq!(metadata.file_size_bytes, size);
    assert_eq!(stream.http_request_count(), 4);
    assert_eq!(stream.http_request_bytes_read(), 16 * KIB);
}

#[tokio::test]
async fn test_remote_avi() {
    let (_server, url) = serve("clip.avi", avi(40_000, 125, 352, 288)).await;

    let metadata = read_remote_metadata(url.clone(), &ProbeConfig::default())
        .await
        .expect("metadata");
    assert_eq!(metadata.format, ContainerFormat::Avi);
    assert_eq!(metadata.duration_seconds, 5.0);
    assert_eq!(metadata.frame_rate, Some(25.0));
    assert_eq!((metadata.width, metadata.height), (352, 288));

    let probed = probe_remote_detailed(url).await.expect("probe");
    assert!(probed.is_valid);
    assert_eq!(probed.format, Some(ContainerFormat::Avi));
}

#[tokio::test]
async fn test_extract_metadata_dispatches_on_url() {
    let (_server, url) = serve("video.mp4", fast_start_mp4(1000)).await;
    let metadata = extract_metadata(url).await.expect("metadata");
    assert_eq!((metadata.width, metadata.height), (1280, 720));
}

#[tokio::test]
async fn test_missing_remote_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/gone.mp4", mock_server.uri());
    let err = extract_metadata(url).await.unwrap_err();
    assert!(matches!(err, vidprobe::MediaProbeError::Stream(_)));
    assert!(!err.is_unavailable());
}
