use crate::{generate, AppViewModel, Candidate, CategoryCode, RunId, ValidatedCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Ready,
    Scanning,
    Error,
    Complete,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Ready => "Ready",
            SessionState::Scanning => "Scanning...",
            SessionState::Error => "Error",
            SessionState::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    name_input: String,
    category: Option<CategoryCode>,
    session: SessionState,
    status_message: Option<String>,
    candidate_count: usize,
    results: Vec<ValidatedCandidate>,
    region_filter: Option<String>,
    progress: u8,
    active_run: Option<RunId>,
    last_run_id: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active_run
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn results(&self) -> &[ValidatedCandidate] {
        &self.results
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub(crate) fn category(&self) -> Option<CategoryCode> {
        self.category
    }

    pub(crate) fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub(crate) fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    pub(crate) fn region_filter(&self) -> Option<&str> {
        self.region_filter.as_deref()
    }

    pub(crate) fn progress(&self) -> u8 {
        self.progress
    }

    pub(crate) fn dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_name_input(&mut self, text: String) {
        if self.name_input != text {
            self.name_input = text;
            self.mark_dirty();
        }
    }

    /// Rejects the input and abandons any run in flight, returning its id.
    pub(crate) fn fail_input(
        &mut self,
        category: CategoryCode,
        message: String,
    ) -> Option<RunId> {
        let abandoned = self.active_run.take();
        if abandoned.is_some() {
            self.results.clear();
            self.candidate_count = 0;
            self.progress = 0;
        }
        self.category = Some(category);
        self.session = SessionState::Error;
        self.status_message = Some(message);
        self.mark_dirty();
        abandoned
    }

    /// Moves to `Scanning` for a fresh run and returns its id and candidates.
    ///
    /// Results from any previous run are discarded here; the caller is
    /// responsible for cancelling the previous run first.
    pub(crate) fn begin_scan(
        &mut self,
        name: &str,
        category: CategoryCode,
    ) -> (RunId, Vec<Candidate>) {
        let candidates = generate(name, category);
        self.last_run_id += 1;
        let run_id = self.last_run_id;

        self.category = Some(category);
        self.session = SessionState::Scanning;
        self.status_message = None;
        self.candidate_count = candidates.len();
        self.results.clear();
        self.region_filter = None;
        self.progress = 0;
        self.active_run = Some(run_id);
        self.mark_dirty();
        (run_id, candidates)
    }

    pub(crate) fn is_active(&self, run_id: RunId) -> bool {
        self.active_run == Some(run_id)
    }

    pub(crate) fn apply_progress(&mut self, percent: u8) {
        let percent = percent.min(100);
        if percent > self.progress {
            self.progress = percent;
            self.mark_dirty();
        }
    }

    pub(crate) fn complete_scan(&mut self, results: Vec<ValidatedCandidate>) {
        self.active_run = None;
        self.session = SessionState::Complete;
        self.progress = 100;
        self.status_message = Some(format!("Found {} working links", results.len()));
        self.results = results;
        self.mark_dirty();
    }

    pub(crate) fn cancel_scan(&mut self) {
        self.active_run = None;
        self.session = SessionState::Ready;
        self.results.clear();
        self.status_message = Some("Scan cancelled".to_string());
        self.mark_dirty();
    }

    pub(crate) fn set_region_filter(&mut self, region: Option<String>) {
        if self.region_filter != region {
            self.region_filter = region;
            self.mark_dirty();
        }
    }

    /// Back to a blank `Ready` session. Run ids keep counting so late
    /// messages from an abandoned run stay recognizable as stale.
    pub(crate) fn reset(&mut self) {
        let last_run_id = self.last_run_id;
        *self = Self {
            last_run_id,
            ..Self::default()
        };
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
