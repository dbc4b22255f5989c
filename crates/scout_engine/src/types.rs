use std::fmt;

use scout_core::{RunId, ScanOutcome};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    pub run_id: RunId,
    pub processed: usize,
    pub total: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Emitted once per settled batch.
    Progress(RunProgress),
    RunFinished { run_id: RunId, outcome: ScanOutcome },
}

/// Result of one load attempt. Only `Loaded` counts as working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Loaded,
    Failed(FailureKind),
    TimedOut,
}

impl ProbeOutcome {
    pub fn is_working(&self) -> bool {
        matches!(self, ProbeOutcome::Loaded)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Loaded => write!(f, "loaded"),
            ProbeOutcome::Failed(kind) => write!(f, "failed: {kind}"),
            ProbeOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    NotAnImage,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::NotAnImage => write!(f, "body is not a decodable image"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
