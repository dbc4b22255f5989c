use crate::{prepare_name, AppState, Effect, Msg, ScanOutcome, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::NameChanged(text) => {
            state.set_name_input(text);
            Vec::new()
        }
        Msg::CategorySelected(category) => {
            let name = match prepare_name(state.name_input()) {
                Ok(name) => name,
                Err(err) => {
                    let effects = state
                        .fail_input(category, err.to_string())
                        .map(|run_id| vec![Effect::CancelScan { run_id }])
                        .unwrap_or_default();
                    return (state, effects);
                }
            };

            // The previous run must be told to stop before its results are dropped.
            let mut effects = Vec::with_capacity(2);
            if let Some(run_id) = state.active_run() {
                effects.push(Effect::CancelScan { run_id });
            }
            let (run_id, candidates) = state.begin_scan(&name, category);
            effects.push(Effect::StartScan { run_id, candidates });
            effects
        }
        Msg::CancelClicked => match state.active_run() {
            // Stay in Scanning until the engine confirms with a Cancelled outcome.
            Some(run_id) if state.session() == SessionState::Scanning => {
                vec![Effect::CancelScan { run_id }]
            }
            _ => Vec::new(),
        },
        Msg::ResetClicked => {
            let effects = state
                .active_run()
                .map(|run_id| vec![Effect::CancelScan { run_id }])
                .unwrap_or_default();
            state.reset();
            effects
        }
        Msg::RegionFilterSelected(region) => {
            state.set_region_filter(region);
            Vec::new()
        }
        Msg::ScanProgress { run_id, percent } => {
            if state.is_active(run_id) {
                state.apply_progress(percent);
            }
            Vec::new()
        }
        Msg::ScanFinished { run_id, outcome } => {
            if state.is_active(run_id) {
                match outcome {
                    ScanOutcome::Completed(results) => state.complete_scan(results),
                    ScanOutcome::Cancelled => state.cancel_scan(),
                }
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
