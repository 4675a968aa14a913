//! Wiring between the fetch engine's events and the terminal UI.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use quire_api::ApiClient;
use quire_core::model::ResourceKind;
use quire_core::ui::notify;
use quire_core::ui::tracker::{ProgressTracker, ProgressTrackerBuilder};
use quire_fetch::{
    Delivery, DownloadEvent, DownloadTarget, FetchOptions, Fetcher, ReqwestClient, SystemLauncher,
    candidates,
};

/// Resolve candidates for `target` and run the fetch engine, reporting
/// progress as status lines and a byte bar.
pub(crate) async fn fetch_to(
    client: &ApiClient,
    kind: ResourceKind,
    target: &DownloadTarget,
    mirror: Option<&str>,
    out_dir: &Path,
) -> Result<()> {
    let sources = candidates(&client.config().base_url, kind, target, mirror);

    let mut options = FetchOptions::default()
        .timeout(client.config().download_timeout)
        .on_event(reporter());
    if let Some(token) = client.session().token {
        options = options.bearer(&token);
    }

    // Downloads get their own connection pool: the API client's pool carries
    // the short JSON timeout.
    let fetcher = Fetcher::new(ReqwestClient::new()?, SystemLauncher);
    fetcher.download(&sources, out_dir, target, &options).await?;
    Ok(())
}

struct BarState {
    tracker: Option<ProgressTracker>,
    last_bytes: u64,
}

fn reporter() -> Arc<dyn Fn(&DownloadEvent) + Send + Sync> {
    let shared = Mutex::new(BarState {
        tracker: None,
        last_bytes: 0,
    });

    Arc::new(move |event| {
        let mut guard = shared.lock().expect("reporter state");
        let state = &mut *guard;
        match event {
            DownloadEvent::Started {
                file_name,
                candidates,
            } => {
                notify::info(format!("downloading {file_name} ({candidates} sources)"));
            }
            DownloadEvent::TryingSource { url, kind } => {
                tracing::debug!(%url, ?kind, "trying download source");
            }
            DownloadEvent::Received { bytes, total } => {
                let tracker = state.tracker.get_or_insert_with(|| {
                    let mut builder = ProgressTrackerBuilder::default().with_prefix("saving");
                    if let Some(total) = total {
                        builder = builder.with_len(*total);
                    }
                    builder.build()
                });
                tracker.step(bytes - state.last_bytes);
                state.last_bytes = *bytes;
            }
            DownloadEvent::SourceFailed { message, .. } => {
                if let Some(tracker) = state.tracker.take() {
                    tracker.abandon();
                }
                state.last_bytes = 0;
                notify::warn(format!("source failed ({message}), trying the next one"));
            }
            DownloadEvent::Delivered(delivery) => {
                if let Some(tracker) = state.tracker.take() {
                    tracker.finish();
                }
                match delivery {
                    Delivery::Saved { path, bytes } => {
                        notify::success(format!("saved {} ({bytes} bytes)", path.display()));
                    }
                    Delivery::Opened { url } => {
                        notify::success(format!("opened the mirror in your browser: {url}"));
                    }
                }
            }
            DownloadEvent::Failed { attempts, message } => {
                if let Some(tracker) = state.tracker.take() {
                    tracker.abandon();
                }
                notify::error(format!("all {attempts} download attempts failed: {message}"));
            }
        }
    })
}
