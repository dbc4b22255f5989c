use std::sync::Once;

use pretty_assertions::assert_eq;
use scout_core::{
    generate, update, AppState, Candidate, CategoryCode, Effect, Msg, RunId, ScanOutcome,
    SessionState, ValidatedCandidate,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn start_scan(state: AppState, name: &str, category: CategoryCode) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::NameChanged(name.to_string()));
    update(state, Msg::CategorySelected(category))
}

fn working(url: &str, region: &str, category: &str, priority: bool) -> ValidatedCandidate {
    ValidatedCandidate::working(Candidate::new(url, region, category, priority))
}

#[test]
fn category_selection_starts_a_scan_with_generated_candidates() {
    init_logging();
    let (mut state, effects) = start_scan(AppState::new(), " Vacation Ring ", CategoryCode::Other);

    assert_eq!(
        effects,
        vec![Effect::StartScan {
            run_id: 1,
            candidates: generate("VacationRing", CategoryCode::Other),
        }]
    );
    let view = state.view();
    assert_eq!(view.session, SessionState::Scanning);
    assert_eq!(view.candidate_count, 9);
    assert_eq!(view.progress, 0);
    assert_eq!(view.status_text, "Scanning... 0%");
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn blank_name_is_rejected_without_effects() {
    init_logging();
    let (state, effects) = start_scan(AppState::new(), "   ", CategoryCode::TokenWheel);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.session, SessionState::Error);
    assert_eq!(view.status_text, "enter an asset name to search");
    assert_eq!(view.candidate_count, 0);
    assert_eq!(state.active_run(), None);
}

#[test]
fn blank_name_during_a_scan_abandons_the_run() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, _) = update(state, Msg::NameChanged("   ".into()));
    let (state, effects) = update(state, Msg::CategorySelected(CategoryCode::FadedWheel));

    assert_eq!(effects, vec![Effect::CancelScan { run_id: 1 }]);
    assert_eq!(state.active_run(), None);
    assert_eq!(state.session(), SessionState::Error);

    let late = ScanOutcome::Completed(vec![working("https://a/1.png", "SG", "Tab", false)]);
    let (state, _) = update(
        state,
        Msg::ScanFinished {
            run_id: 1,
            outcome: late,
        },
    );
    let view = state.view();
    assert_eq!(view.session, SessionState::Error);
    assert_eq!(view.status_text, "enter an asset name to search");
    assert!(view.results.is_empty());
}

#[test]
fn new_selection_cancels_the_run_in_flight_first() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, effects) = update(state, Msg::CategorySelected(CategoryCode::FadedWheel));

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::CancelScan { run_id: 1 });
    match &effects[1] {
        Effect::StartScan { run_id, candidates } => {
            assert_eq!(*run_id, 2);
            assert_eq!(candidates.len(), 82);
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert_eq!(state.active_run(), Some(2));
}

fn progress(state: AppState, run_id: RunId, percent: u8) -> (AppState, Vec<Effect>) {
    update(state, Msg::ScanProgress { run_id, percent })
}

#[test]
fn progress_is_monotonic_and_ignores_stale_runs() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, _) = progress(state, 1, 40);
    let (state, _) = progress(state, 1, 30);
    assert_eq!(state.view().progress, 40);

    let (state, _) = update(state, Msg::CategorySelected(CategoryCode::StepUp));
    let (state, _) = progress(state, 1, 90);
    assert_eq!(state.view().progress, 0);

    let stale = ScanOutcome::Completed(vec![working("https://a/1.png", "SG", "Tab", false)]);
    let (state, _) = update(
        state,
        Msg::ScanFinished {
            run_id: 1,
            outcome: stale,
        },
    );
    assert_eq!(state.view().session, SessionState::Scanning);
    assert!(state.results().is_empty());
}

#[test]
fn completion_stores_results_and_reaches_full_progress() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let results = vec![
        working("https://a/store.png", "Store", "Banner", true),
        working("https://a/sg.png", "SG", "Tab", false),
    ];
    let (state, effects) = update(
        state,
        Msg::ScanFinished {
            run_id: 1,
            outcome: ScanOutcome::Completed(results.clone()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.results(), results.as_slice());
    let view = state.view();
    assert_eq!(view.session, SessionState::Complete);
    assert_eq!(view.progress, 100);
    assert_eq!(view.working_count, 2);
    assert_eq!(view.status_text, "Found 2 working links");
    assert_eq!(state.active_run(), None);
}

#[test]
fn cancel_waits_for_engine_confirmation() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, effects) = update(state, Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::CancelScan { run_id: 1 }]);
    assert_eq!(state.view().session, SessionState::Scanning);

    let (state, _) = update(
        state,
        Msg::ScanFinished {
            run_id: 1,
            outcome: ScanOutcome::Cancelled,
        },
    );
    let view = state.view();
    assert_eq!(view.session, SessionState::Ready);
    assert_eq!(view.status_text, "Scan cancelled");
    assert_eq!(view.working_count, 0);
}

#[test]
fn cancel_is_ignored_when_nothing_runs() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CancelClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Ready);
}

#[test]
fn reset_cancels_and_keeps_run_ids_unique() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::CancelScan { run_id: 1 }]);

    let view = state.view();
    assert_eq!(view.session, SessionState::Ready);
    assert_eq!(view.name_input, "");
    assert_eq!(view.category, None);

    let (_state, effects) = start_scan(state, "Cobra", CategoryCode::Other);
    assert!(matches!(effects.as_slice(), [Effect::StartScan { run_id: 2, .. }]));
}

#[test]
fn region_filter_narrows_visible_rows() {
    init_logging();
    let (state, _) = start_scan(AppState::new(), "Cobra", CategoryCode::TokenWheel);
    let (state, _) = update(
        state,
        Msg::ScanFinished {
            run_id: 1,
            outcome: ScanOutcome::Completed(vec![
                working("https://a/store.png", "Store", "Banner", true),
                working("https://a/sg-tab.jpg", "SG", "Tab", false),
                working("https://a/eu-tab.jpg", "EU", "Tab", false),
                working("https://a/sg-bg.png", "SG", "BG", false),
            ]),
        },
    );
    let (state, _) = update(state, Msg::RegionFilterSelected(Some("SG".to_string())));

    let view = state.view();
    assert_eq!(view.regions, vec!["Store", "SG", "EU"]);
    assert_eq!(view.working_count, 4);
    let urls: Vec<_> = view.results.iter().map(|row| row.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a/sg-tab.jpg", "https://a/sg-bg.png"]);
    assert_eq!(view.results[0].index, 2);
    assert_eq!(view.copy_text(Some("tab")), "https://a/sg-tab.jpg");

    let (state, _) = update(state, Msg::RegionFilterSelected(None));
    assert_eq!(state.view().results.len(), 4);
}

#[test]
fn noop_and_tick_leave_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(next, Msg::Tick);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
