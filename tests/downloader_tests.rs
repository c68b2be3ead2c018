//! Tests for the downloader module functionality.
//!
//! Batches run against a local stub server and write into a temporary
//! directory, so every scenario checks both the report and the files on disk.

use lanefetch::downloader::DownloaderBuilder;
use lanefetch::{Error, Status};

use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_downloader_defaults() {
    let downloader = DownloaderBuilder::new().build();

    assert_eq!(downloader.attempts(), 1);
    assert_eq!(downloader.threads(), 1);
    assert_eq!(downloader.polling(), Duration::from_millis(100));
    assert_eq!(downloader.timeout(), Some(Duration::from_secs(60)));
    assert_eq!(downloader.transport_retries(), 0);
    assert!(downloader.directory().is_none());
    assert!(downloader.paths().is_none());
    assert!(downloader.headers().is_none());
}

#[test]
fn test_downloader_getters() {
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .paths(["a.bin", "b.bin"])
        .attempts(4)
        .threads(3)
        .polling(Duration::from_millis(25))
        .no_timeout()
        .transport_retries(2)
        .build();

    assert_eq!(downloader.directory(), Some(&temp_dir.path().to_path_buf()));
    assert_eq!(
        downloader.paths(),
        Some(&[PathBuf::from("a.bin"), PathBuf::from("b.bin")][..])
    );
    assert_eq!(downloader.attempts(), 4);
    assert_eq!(downloader.threads(), 3);
    assert_eq!(downloader.polling(), Duration::from_millis(25));
    assert_eq!(downloader.timeout(), None);
    assert_eq!(downloader.transport_retries(), 2);
}

#[tokio::test]
async fn test_retry_then_success_across_lanes() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_file(&server, "x.bin", 1).await;
    serve_status_first(&server, "y.bin", 500, 1).await;
    serve_file(&server, "y.bin", 1).await;

    let x = stub_url(&server, "x.bin");
    let y = stub_url(&server, "y.bin");
    let report = create_test_downloader_builder(dir.path())
        .attempts(2)
        .threads(2)
        .build()
        .download(&[&x, &y])
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.downloaded.len(), 2);
    assert_eq!(report.path(&x), Some(dir.path().join("x.bin").as_path()));
    assert_eq!(report.path(&y), Some(dir.path().join("y.bin").as_path()));
    assert_test_body(&dir.path().join("x.bin"));
    assert_test_body(&dir.path().join("y.bin"));
}

#[tokio::test]
async fn test_exhausted_url_is_reported_failed() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_file(&server, "x.bin", 1).await;
    serve_status(&server, "y.bin", 500, 2).await;

    let x = stub_url(&server, "x.bin");
    let y = stub_url(&server, "y.bin");
    let report = create_test_downloader_builder(dir.path())
        .attempts(2)
        .threads(2)
        .build()
        .download(&[&x, &y])
        .await
        .unwrap();

    assert_eq!(report.downloaded.len(), 1);
    assert_eq!(report.path(&x), Some(dir.path().join("x.bin").as_path()));
    assert_eq!(report.failed, vec![y]);
    assert_no_file(&dir.path().join("y.bin"));
}

#[tokio::test]
async fn test_single_attempt_failures_keep_input_order() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    let names = ["c.bin", "a.bin", "d.bin", "b.bin"];
    for name in names {
        serve_status(&server, name, 404, 1).await;
    }

    let urls: Vec<String> = names.iter().map(|n| stub_url(&server, n)).collect();
    let report = create_test_downloader_builder(dir.path())
        .threads(3)
        .build()
        .download(&urls)
        .await
        .unwrap();

    assert!(report.downloaded.is_empty());
    assert_eq!(report.failed, urls);
}

#[tokio::test]
async fn test_late_success_is_only_downloaded() {
    init_logs();
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_status_first(&server, "late.bin", 503, 2).await;
    serve_file(&server, "late.bin", 1).await;

    let url = stub_url(&server, "late.bin");
    let (log, callback) = summary_log();
    let report = create_test_downloader_builder(dir.path())
        .attempts(3)
        .on_attempt(callback)
        .build()
        .download(&[&url])
        .await
        .unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.path(&url), Some(dir.path().join("late.bin").as_path()));

    let statuses = statuses_for(&log, &url);
    assert_eq!(statuses.len(), 3);
    assert!(matches!(&statuses[0], Status::Retrying(msg) if msg.contains("503")));
    assert!(matches!(&statuses[1], Status::Retrying(_)));
    assert_eq!(statuses[2], Status::Success);

    let attempts: Vec<u32> = log.lock().unwrap().iter().map(|s| s.attempt()).collect();
    assert_eq!(attempts, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_final_failure_is_reported_to_callback() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_status(&server, "gone.bin", 410, 2).await;

    let url = stub_url(&server, "gone.bin");
    let (log, callback) = summary_log();
    let report = create_test_downloader_builder(dir.path())
        .attempts(2)
        .on_attempt(callback)
        .build()
        .download(&[&url])
        .await
        .unwrap();

    assert_eq!(report.failed, vec![url.clone()]);
    let statuses = statuses_for(&log, &url);
    assert_eq!(statuses.len(), 2);
    assert!(matches!(&statuses[0], Status::Retrying(_)));
    assert!(matches!(&statuses[1], Status::Fail(msg) if msg.contains("410")));
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .all(|s| s.statuscode().map(|c| c.as_u16()) == Some(410)));
}

#[tokio::test]
async fn test_explicit_paths_take_precedence() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    let other = create_temp_dir();
    serve_file(&server, "x.bin", 1).await;

    let url = stub_url(&server, "x.bin");
    let target = dir.path().join("nested").join("renamed.dat");
    let report = create_test_downloader_builder(other.path())
        .paths([target.clone()])
        .build()
        .download(&[&url])
        .await
        .unwrap();

    assert_eq!(report.path(&url), Some(target.as_path()));
    assert_test_body(&target);
    assert_no_file(&other.path().join("x.bin"));
}

#[tokio::test]
async fn test_path_count_mismatch_sends_nothing() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_file(&server, "x.bin", 0).await;

    let urls: Vec<String> = ["x.bin", "x.bin", "x.bin"]
        .iter()
        .map(|n| stub_url(&server, n))
        .collect();
    let err = DownloaderBuilder::hidden()
        .paths([dir.path().join("1"), dir.path().join("2")])
        .build()
        .download(&urls)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::PathCountMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert_eq!(err.to_string(), "Length of 'paths' should be 3, got 2");
    assert!(err.is_usage());
}

#[tokio::test]
async fn test_missing_destination_is_rejected() {
    let err = DownloaderBuilder::hidden()
        .build()
        .download(&["http://127.0.0.1:9/x.bin"])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingDestination));
}

#[tokio::test]
async fn test_invalid_url_is_rejected_up_front() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_file(&server, "x.bin", 0).await;

    let err = create_test_downloader_builder(dir.path())
        .build()
        .download(&[stub_url(&server, "x.bin"), "not a url".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_zero_attempts_or_threads_are_rejected() {
    let dir = create_temp_dir();
    let urls = ["http://127.0.0.1:9/x.bin"];

    let err = create_test_downloader_builder(dir.path())
        .attempts(0)
        .build()
        .download(&urls)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = create_test_downloader_builder(dir.path())
        .threads(0)
        .build()
        .download(&urls)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn test_empty_batch_returns_empty_report() {
    let dir = create_temp_dir();
    let urls: [&str; 0] = [];
    let report = create_test_downloader_builder(dir.path())
        .build()
        .download(&urls)
        .await
        .unwrap();
    assert!(report.downloaded.is_empty());
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn test_socket_timeout_fails_the_attempt() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    Mock::given(method("GET"))
        .and(path("/slow.bin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(TEST_BODY)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let url = stub_url(&server, "slow.bin");
    let (log, callback) = summary_log();
    let report = create_test_downloader_builder(dir.path())
        .timeout(Duration::from_millis(100))
        .on_attempt(callback)
        .build()
        .download(&[&url])
        .await
        .unwrap();

    assert_eq!(report.failed, vec![url.clone()]);
    let statuses = statuses_for(&log, &url);
    assert!(matches!(&statuses[..], [Status::Fail(msg)] if msg.contains("timeout")));
    assert_no_file(&dir.path().join("slow.bin"));
}

#[tokio::test]
async fn test_transport_retries_stay_inside_one_attempt() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_status_first(&server, "flaky.bin", 503, 1).await;
    serve_file(&server, "flaky.bin", 1).await;

    let url = stub_url(&server, "flaky.bin");
    let (log, callback) = summary_log();
    let report = create_test_downloader_builder(dir.path())
        .transport_retries(1)
        .on_attempt(callback)
        .build()
        .download(&[&url])
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(statuses_for(&log, &url), vec![Status::Success]);
    assert_eq!(log.lock().unwrap()[0].size(), TEST_BODY.len() as u64);
}

#[tokio::test]
async fn test_many_files_over_few_lanes() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    let urls: Vec<String> = (0..12)
        .map(|i| {
            let name = format!("file-{}.bin", i);
            stub_url(&server, &name)
        })
        .collect();
    for i in 0..12 {
        serve_file(&server, &format!("file-{}.bin", i), 1).await;
    }

    let report = create_test_downloader_builder(dir.path())
        .threads(3)
        .build()
        .download(&urls)
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.downloaded.len(), 12);
    for i in 0..12 {
        assert_test_body(&dir.path().join(format!("file-{}.bin", i)));
    }
}

#[tokio::test]
async fn test_panicking_callback_does_not_stall_the_batch() {
    let server = MockServer::start().await;
    let dir = create_temp_dir();
    serve_file(&server, "ok.bin", 1).await;
    serve_status_first(&server, "flaky.bin", 500, 1).await;
    serve_file(&server, "flaky.bin", 1).await;
    serve_status(&server, "gone.bin", 404, 2).await;

    let ok = stub_url(&server, "ok.bin");
    let flaky = stub_url(&server, "flaky.bin");
    let gone = stub_url(&server, "gone.bin");
    let downloader = create_test_downloader_builder(dir.path())
        .attempts(2)
        .threads(2)
        .on_attempt(|summary| panic!("callback failed on {:?}", summary.status()))
        .build();

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        downloader.download(&[&ok, &flaky, &gone]),
    )
    .await
    .expect("batch never settled")
    .unwrap();

    assert_eq!(report.path(&ok), Some(dir.path().join("ok.bin").as_path()));
    assert_eq!(report.path(&flaky), Some(dir.path().join("flaky.bin").as_path()));
    assert_eq!(report.failed, vec![gone]);
    assert_test_body(&dir.path().join("flaky.bin"));
}
