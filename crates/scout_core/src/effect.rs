use crate::{Candidate, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe `candidates` as run `run_id`. Any earlier run has already been cancelled.
    StartScan {
        run_id: RunId,
        candidates: Vec<Candidate>,
    },
    CancelScan { run_id: RunId },
}
