#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use lanefetch::{DownloaderBuilder, Pool, Status, Summary};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const TEST_BODY: &[u8] = b"lanefetch test payload";
pub const TEST_POLLING: Duration = Duration::from_millis(10);

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Prints library logs when `RUST_LOG` is set
pub fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds the URL of a file served by the stub server
pub fn stub_url(server: &MockServer, name: &str) -> String {
    format!("{}/{}", server.uri(), name)
}

// === Stub Server Helpers ===

/// Serves `TEST_BODY` for `/name`, expecting exactly `hits` requests
pub async fn serve_file(server: &MockServer, name: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(TEST_BODY))
        .expect(hits)
        .mount(server)
        .await;
}

/// Answers `/name` with `status`, expecting exactly `hits` requests
pub async fn serve_status(server: &MockServer, name: &str, status: u16, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", name)))
        .respond_with(ResponseTemplate::new(status))
        .expect(hits)
        .mount(server)
        .await;
}

/// Answers the first `times` requests for `/name` with `status`, ahead of any other mock
pub async fn serve_status_first(server: &MockServer, name: &str, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", name)))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(times)
        .with_priority(1)
        .expect(times)
        .mount(server)
        .await;
}

// === Downloader Builder Helpers ===

/// Creates a quiet downloader builder writing into `dir`
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .polling(TEST_POLLING)
        .timeout(Duration::from_secs(5))
}

/// Collects every attempt summary a downloader reports
pub fn summary_log() -> (Arc<Mutex<Vec<Summary>>>, impl Fn(&Summary) + Send + Sync + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    (log, move |summary: &Summary| sink.lock().unwrap().push(summary.clone()))
}

/// Statuses of the logged summaries for one URL, in order
pub fn statuses_for(log: &Mutex<Vec<Summary>>, url: &str) -> Vec<Status> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|s| s.download().source == url)
        .map(|s| s.status().clone())
        .collect()
}

// === Pool Helpers ===

/// Waits until no task is queued or running in the pool
pub async fn wait_until_idle(pool: &Pool) {
    for _ in 0..1000 {
        if pool.is_idle() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("pool never went idle: {:?}", pool);
}

// === Assertion Helpers ===

/// Asserts that a file holds the test payload
pub fn assert_test_body(path: &Path) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("cannot read {:?}: {}", path, e));
    assert_eq!(content, TEST_BODY, "unexpected content in {:?}", path);
}

/// Asserts that nothing is left at `path`
pub fn assert_no_file(path: &Path) {
    assert!(!path.exists(), "File should not exist at path: {:?}", path);
}
