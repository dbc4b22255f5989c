use crate::{CategoryCode, RunId, ScanOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the asset name input.
    NameChanged(String),
    /// User picked a category; starts a scan when the name is valid.
    CategorySelected(CategoryCode),
    /// User asked to stop the running scan.
    CancelClicked,
    /// User cleared the session.
    ResetClicked,
    /// User narrowed the result list to one region (`None` shows all).
    RegionFilterSelected(Option<String>),
    /// Engine progress for a run, after each batch.
    ScanProgress { run_id: RunId, percent: u8 },
    /// Engine completion for a run.
    ScanFinished { run_id: RunId, outcome: ScanOutcome },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
