use crate::{AppState, CategoryCode, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    /// Status message when one is set, otherwise the session label.
    pub status_text: String,
    pub name_input: String,
    pub category: Option<CategoryCode>,
    pub progress: u8,
    pub candidate_count: usize,
    /// Working links across all regions.
    pub working_count: usize,
    /// Regions present in the results, in result order.
    pub regions: Vec<String>,
    pub region_filter: Option<String>,
    /// Results after the region filter, priority tier first.
    pub results: Vec<ResultRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    /// 1-based position in the unfiltered result list.
    pub index: usize,
    pub url: String,
    pub region: String,
    pub category: String,
    pub priority: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let mut regions: Vec<String> = Vec::new();
        for item in state.results() {
            if !regions.iter().any(|r| r == item.region()) {
                regions.push(item.region().to_string());
            }
        }

        let filter = state.region_filter();
        let results = state
            .results()
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.map_or(true, |region| item.region() == region))
            .map(|(i, item)| ResultRowView {
                index: i + 1,
                url: item.url().to_string(),
                region: item.region().to_string(),
                category: item.category().to_string(),
                priority: item.is_priority(),
            })
            .collect();

        let session = state.session();
        let status_text = match (session, state.status_message()) {
            (SessionState::Scanning, _) => format!("{} {}%", session.label(), state.progress()),
            (_, Some(message)) => message.to_string(),
            (_, None) => session.label().to_string(),
        };

        Self {
            session,
            status_text,
            name_input: state.name_input().to_string(),
            category: state.category(),
            progress: state.progress(),
            candidate_count: state.candidate_count(),
            working_count: state.results().len(),
            regions,
            region_filter: filter.map(ToOwned::to_owned),
            results,
            dirty: state.dirty(),
        }
    }

    /// Newline-joined links of the visible rows, optionally only one category label.
    pub fn copy_text(&self, category: Option<&str>) -> String {
        self.results
            .iter()
            .filter(|row| category.map_or(true, |c| row.category.eq_ignore_ascii_case(c)))
            .map(|row| row.url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Visible rows grouped by region, in first-appearance order.
    pub fn grouped(&self) -> Vec<(&str, Vec<&ResultRowView>)> {
        let mut groups: Vec<(&str, Vec<&ResultRowView>)> = Vec::new();
        for row in &self.results {
            match groups.iter_mut().find(|(region, _)| *region == row.region) {
                Some((_, rows)) => rows.push(row),
                None => groups.push((row.region.as_str(), vec![row])),
            }
        }
        groups
    }
}
