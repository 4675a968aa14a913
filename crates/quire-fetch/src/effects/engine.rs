use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::data::events::{Delivery, DownloadEvent};
use crate::data::options::FetchOptions;
use crate::data::sources::{DownloadSource, DownloadTarget, SourceKind};
use crate::effects::http::{BoxStream, HttpClient};
use crate::effects::launcher::Launcher;
use crate::error::FetchError;

/// Result of a successful download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub delivery: Delivery,
    /// Number of candidates attempted, the successful one included.
    pub attempts: usize,
}

/// Tries download candidates strictly in order until one delivers.
///
/// Each invocation is independent; the fetcher holds no per-download state
/// and is safe to reuse across actions.
pub struct Fetcher<C, L> {
    client: C,
    launcher: L,
}

impl<C: HttpClient, L: Launcher> Fetcher<C, L> {
    pub fn new(client: C, launcher: L) -> Self {
        Self { client, launcher }
    }

    /// Attempt `sources` in order and deliver the first success.
    ///
    /// Candidates fail on non-200 status, network errors, timeouts and empty
    /// bodies; the loop advances immediately, without backoff, since each
    /// candidate is a structurally different endpoint rather than a retry of
    /// the same one. When every candidate fails the aggregated error carries
    /// the attempt count and the last failure.
    pub async fn download(
        &self,
        sources: &[DownloadSource],
        dest_dir: &Path,
        target: &DownloadTarget,
        options: &FetchOptions,
    ) -> Result<FetchReport, FetchError> {
        if sources.is_empty() {
            return Err(FetchError::NoCandidates);
        }

        let file_name = target.file_name();
        options.emit(&DownloadEvent::Started {
            file_name: file_name.clone(),
            candidates: sources.len(),
        });

        let dest = dest_dir.join(&file_name);
        let mut attempts = 0;
        let mut last = None;

        for source in sources {
            attempts += 1;
            options.emit(&DownloadEvent::TryingSource {
                url: source.url.clone(),
                kind: source.kind,
            });

            match self.try_source(source, &dest, options).await {
                Ok(delivery) => {
                    options.emit(&DownloadEvent::Delivered(delivery.clone()));
                    return Ok(FetchReport { delivery, attempts });
                }
                Err(err) => {
                    tracing::debug!(url = %source.url, error = %err, "download candidate failed");
                    options.emit(&DownloadEvent::SourceFailed {
                        url: source.url.clone(),
                        message: err.to_string(),
                    });
                    last = Some(err);
                }
            }
        }

        let last = Box::new(last.unwrap_or(FetchError::NoCandidates));
        options.emit(&DownloadEvent::Failed {
            attempts,
            message: last.to_string(),
        });
        Err(FetchError::AllCandidatesFailed { attempts, last })
    }

    async fn try_source(
        &self,
        source: &DownloadSource,
        dest: &Path,
        options: &FetchOptions,
    ) -> Result<Delivery, FetchError> {
        if source.kind == SourceKind::Mirror {
            // Delivered by the browser; bytes never pass through this client.
            self.launcher.open(&source.url).map_err(FetchError::Launch)?;
            return Ok(Delivery::Opened {
                url: source.url.clone(),
            });
        }

        match tokio::time::timeout(options.timeout, self.save_to(source, dest, options)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(options.timeout)),
        }
    }

    async fn save_to(
        &self,
        source: &DownloadSource,
        dest: &Path,
        options: &FetchOptions,
    ) -> Result<Delivery, FetchError> {
        let response = self
            .client
            .get(&source.url, &options.headers)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if response.status != 200 {
            return Err(FetchError::Status(response.status));
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let staging = staging_path(dest);
        match write_stream(&staging, response.body, response.content_length, options).await {
            Ok(bytes) => {
                tokio::fs::rename(&staging, dest).await?;
                Ok(Delivery::Saved {
                    path: dest.to_path_buf(),
                    bytes,
                })
            }
            Err(err) => {
                let _ = tokio::fs::remove_file(&staging).await;
                Err(err)
            }
        }
    }
}

fn staging_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());
    dest.with_file_name(format!("{name}.part"))
}

async fn write_stream<E: std::error::Error>(
    staging: &Path,
    mut body: BoxStream<'static, Result<Bytes, E>>,
    total: Option<u64>,
    options: &FetchOptions,
) -> Result<u64, FetchError> {
    let mut file = tokio::fs::File::create(staging).await?;
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| FetchError::Network(e.to_string()))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        options.emit(&DownloadEvent::Received {
            bytes: written,
            total,
        });
    }
    file.flush().await?;

    // 200 with no bytes is a failure, not a success
    if written == 0 {
        return Err(FetchError::EmptyBody);
    }
    Ok(written)
}
