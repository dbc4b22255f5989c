/// Identifies one validation run. Allocated by [`crate::AppState`], monotonically increasing.
pub type RunId = u64;

/// One prospective URL to probe, tagged with its grouping labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub url: String,
    /// Locale tag (`SG`, `IND`, ...) or a pseudo-region such as `Store` or `Splash`.
    pub region: String,
    /// Sub-asset label (`Tab`, `Title`, `BG`, ...).
    pub category: String,
    /// Store and splash assets sort ahead of regional results.
    pub priority: bool,
}

impl Candidate {
    pub fn new(
        url: impl Into<String>,
        region: impl Into<String>,
        category: impl Into<String>,
        priority: bool,
    ) -> Self {
        Self {
            url: url.into(),
            region: region.into(),
            category: category.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    pub candidate: Candidate,
    pub is_working: bool,
}

impl ValidatedCandidate {
    pub fn working(candidate: Candidate) -> Self {
        Self {
            candidate,
            is_working: true,
        }
    }

    pub fn url(&self) -> &str {
        &self.candidate.url
    }

    pub fn region(&self) -> &str {
        &self.candidate.region
    }

    pub fn category(&self) -> &str {
        &self.candidate.category
    }

    pub fn is_priority(&self) -> bool {
        self.candidate.priority
    }
}

/// Terminal result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Working candidates only, priority tier first.
    Completed(Vec<ValidatedCandidate>),
    Cancelled,
}

impl ScanOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanOutcome::Cancelled)
    }
}
