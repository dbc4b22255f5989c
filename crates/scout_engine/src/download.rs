use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use scout_core::ValidatedCandidate;
use scout_logging::{scout_info, scout_warn};
use thiserror::Error;

use crate::probe::map_reqwest_error;
use crate::{
    asset_filename, AtomicFileWriter, EngineError, FailureKind, PersistError, ProbeSettings,
};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(FailureKind),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<(String, DownloadError)>,
}

/// Saves working assets to disk, one at a time.
pub struct AssetDownloader {
    client: reqwest::Client,
    max_bytes: u64,
    /// Deadline for one asset, request through last body byte.
    timeout: Duration,
}

impl AssetDownloader {
    pub fn new(settings: &ProbeSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: settings.build_client()?,
            max_bytes: settings.max_bytes,
            timeout: settings.probe_timeout,
        })
    }

    pub async fn download(
        &self,
        url: &str,
        writer: &AtomicFileWriter,
    ) -> Result<PathBuf, DownloadError> {
        let body = match tokio::time::timeout(self.timeout, self.fetch(url)).await {
            Ok(result) => result.map_err(DownloadError::Request)?,
            Err(_) => return Err(DownloadError::Request(FailureKind::Timeout)),
        };
        Ok(writer.write(&asset_filename(url), &body)?)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FailureKind> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FailureKind::HttpStatus(status.as_u16()));
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(FailureKind::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: None,
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    /// Downloads every item; failures are collected instead of aborting the batch.
    pub async fn download_all(
        &self,
        items: &[ValidatedCandidate],
        writer: &AtomicFileWriter,
    ) -> DownloadReport {
        let mut report = DownloadReport::default();
        for item in items {
            match self.download(item.url(), writer).await {
                Ok(path) => report.saved.push(path),
                Err(err) => {
                    scout_warn!("download of {} failed: {}", item.url(), err);
                    report.failed.push((item.url().to_string(), err));
                }
            }
        }
        scout_info!(
            "saved {} of {} assets to {}",
            report.saved.len(),
            items.len(),
            writer.dir().display()
        );
        report
    }
}
