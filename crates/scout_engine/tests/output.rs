use std::fs;
use std::time::{Duration, Instant};

use scout_core::{Candidate, ValidatedCandidate};
use scout_engine::{
    ensure_output_dir, AssetDownloader, AtomicFileWriter, DownloadError, FailureKind,
    ProbeSettings,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("assets").join("Cobra");
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(ensure_output_dir(&file_path).is_err());
    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("links.txt", b"data").is_err());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("links.txt", b"one").unwrap();
    let second = writer.write("links.txt", b"two").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"two");
}

fn working(url: String) -> ValidatedCandidate {
    ValidatedCandidate::working(Candidate::new(url, "SG", "Tab", false))
}

#[tokio::test]
async fn download_all_saves_assets_and_collects_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Local/SG/config/TW1_CobraTabSG_en.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("out"));
    let downloader = AssetDownloader::new(&ProbeSettings::default()).unwrap();
    let items = vec![
        working(format!("{}/Local/SG/config/TW1_CobraTabSG_en.jpg", server.uri())),
        working(format!("{}/gone.png", server.uri())),
    ];

    let report = downloader.download_all(&items, &writer).await;

    assert_eq!(report.saved.len(), 1);
    assert_eq!(
        report.saved[0],
        temp.path().join("out").join("TW1_CobraTabSG_en.jpg")
    );
    assert_eq!(fs::read(&report.saved[0]).unwrap(), b"jpeg-bytes");
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(
        report.failed[0].1,
        DownloadError::Request(FailureKind::HttpStatus(410))
    ));
}

#[tokio::test]
async fn stalled_download_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());
    let settings = ProbeSettings {
        probe_timeout: Duration::from_millis(100),
        ..ProbeSettings::default()
    };
    let downloader = AssetDownloader::new(&settings).unwrap();

    let started = Instant::now();
    let result = downloader
        .download(&format!("{}/slow.png", server.uri()), &writer)
        .await;

    assert!(started.elapsed() < Duration::from_millis(1000));
    assert!(matches!(result, Err(DownloadError::Request(FailureKind::Timeout))));
    assert!(!temp.path().join("slow.png").exists());
}
