//! End-to-end fallback behavior: candidate building plus the engine.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use quire_core::model::{FileType, ResourceKind};
use quire_fetch::{
    Delivery, DownloadTarget, FetchOptions, FetchedResponse, Fetcher, HttpClient, Launcher,
    candidates,
};

#[derive(Debug)]
struct MockError(String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

/// Maps URLs to canned responses and records every request.
struct RoutedClient {
    routes: HashMap<String, (u16, Vec<u8>)>,
    calls: Mutex<Vec<String>>,
}

impl RoutedClient {
    fn new(routes: impl IntoIterator<Item = (String, (u16, Vec<u8>))>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl HttpClient for RoutedClient {
    type Error = MockError;

    async fn get(
        &self,
        url: &str,
        _headers: &[(String, String)],
    ) -> Result<FetchedResponse<Self::Error>, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            None => Err(MockError(format!("no route for {url}"))),
            Some((status, body)) => {
                let chunks: Vec<Result<Bytes, MockError>> = if body.is_empty() {
                    Vec::new()
                } else {
                    vec![Ok(Bytes::from(body.clone()))]
                };
                Ok(FetchedResponse {
                    status: *status,
                    content_length: Some(body.len() as u64),
                    body: Box::pin(futures_util::stream::iter(chunks)),
                })
            }
        }
    }
}

#[derive(Default)]
struct RecordingLauncher {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingLauncher {
    fn log(&self) -> Arc<Mutex<Vec<String>>> {
        self.opened.clone()
    }
}

impl Launcher for RecordingLauncher {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

const BASE: &str = "http://localhost:5000";

#[tokio::test]
async fn legacy_endpoint_rescues_a_failing_primary() {
    let target = DownloadTarget::new("42", FileType::Pdf, "On Sorting");
    let sources = candidates(BASE, ResourceKind::Journals, &target, None);

    let client = RoutedClient::new([
        (
            format!("{BASE}/api/journals/42/download/pdf"),
            (500u16, Vec::new()),
        ),
        (
            format!("{BASE}/api/journals/42/direct-download/pdf"),
            (200u16, vec![9u8; 12_345]),
        ),
    ]);
    let launcher = RecordingLauncher::default();
    let fetcher = Fetcher::new(client, launcher);
    let dir = tempfile::tempdir().unwrap();

    let report = fetcher
        .download(&sources, dir.path(), &target, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(report.attempts, 2);
    match report.delivery {
        Delivery::Saved { path, bytes } => {
            assert_eq!(bytes, 12_345);
            assert_eq!(path.file_name().unwrap(), "On Sorting.pdf");
        }
        other => panic!("expected a saved file, got {other:?}"),
    }
}

#[tokio::test]
async fn mirror_is_the_last_resort_and_opens_in_browser() {
    let target = DownloadTarget::new("42", FileType::Docx, "On Sorting");
    let sources = candidates(
        BASE,
        ResourceKind::Submissions,
        &target,
        Some("https://cdn.example.org/42.docx"),
    );
    assert_eq!(sources.len(), 4);

    // every API-origin route is down
    let client = RoutedClient::new([]);
    let launcher = RecordingLauncher::default();
    let opened = launcher.log();
    let fetcher = Fetcher::new(client, launcher);
    let dir = tempfile::tempdir().unwrap();

    let report = fetcher
        .download(&sources, dir.path(), &target, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(report.attempts, 4);
    assert_eq!(
        report.delivery,
        Delivery::Opened {
            url: "https://cdn.example.org/42.docx".into()
        }
    );
    assert_eq!(
        opened.lock().unwrap().as_slice(),
        ["https://cdn.example.org/42.docx"]
    );
}

#[tokio::test]
async fn exhausted_candidates_report_every_attempt() {
    let target = DownloadTarget::new("42", FileType::Pdf, "On Sorting");
    let sources = candidates(BASE, ResourceKind::Journals, &target, None);

    let client = RoutedClient::new([]);
    let fetcher = Fetcher::new(client, RecordingLauncher::default());
    let dir = tempfile::tempdir().unwrap();

    let err = fetcher
        .download(&sources, dir.path(), &target, &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(
        err.to_string().starts_with("all 3 download attempts failed"),
        "unexpected error: {err}"
    );
}
