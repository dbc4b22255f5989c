use std::io::Cursor;
use std::time::Duration;

use futures_util::StreamExt;
use image::ImageReader;

use crate::{EngineError, FailureKind, ProbeOutcome};

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Upper bound for one whole probe, connect through decode.
    pub probe_timeout: Duration,
    pub connect_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(8),
            connect_timeout: Duration::from_secs(5),
            redirect_limit: 5,
            max_bytes: 20 * 1024 * 1024,
            user_agent: concat!("asset-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProbeSettings {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, EngineError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.redirect_limit))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Attempts to load `url` as an image. Never fails; every problem is an outcome.
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, EngineError> {
        let client = settings.build_client()?;
        Ok(Self { client, settings })
    }

    async fn load(&self, url: &str) -> Result<(), FailureKind> {
        let parsed = reqwest::Url::parse(url).map_err(|_| FailureKind::InvalidUrl)?;
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureKind::HttpStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            body.extend_from_slice(&chunk);
        }

        decode_header(&body)
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        // Dropping `load` on expiry aborts the request, so a late response can never settle twice.
        match tokio::time::timeout(self.settings.probe_timeout, self.load(url)).await {
            Ok(Ok(())) => ProbeOutcome::Loaded,
            Ok(Err(FailureKind::Timeout)) | Err(_) => ProbeOutcome::TimedOut,
            Ok(Err(kind)) => ProbeOutcome::Failed(kind),
        }
    }
}

/// Reads only the image header: enough to know the browser would render it.
fn decode_header(body: &[u8]) -> Result<(), FailureKind> {
    let reader = ImageReader::new(Cursor::new(body))
        .with_guessed_format()
        .map_err(|_| FailureKind::NotAnImage)?;
    let (width, height) = reader.into_dimensions().map_err(|_| FailureKind::NotAnImage)?;
    if width == 0 || height == 0 {
        return Err(FailureKind::NotAnImage);
    }
    Ok(())
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    if err.is_redirect() {
        return FailureKind::RedirectLimitExceeded;
    }
    FailureKind::Network
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_header_rejects_html() {
        assert_eq!(
            decode_header(b"<html><body>404</body></html>"),
            Err(FailureKind::NotAnImage)
        );
        assert_eq!(decode_header(b""), Err(FailureKind::NotAnImage));
    }

    #[test]
    fn decode_header_accepts_png() {
        let mut png = Vec::new();
        image::RgbaImage::new(2, 3)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(decode_header(&png), Ok(()));
    }
}
