use scout_core::{AppViewModel, Candidate, SessionState, CATEGORIES};

const BAR_WIDTH: usize = 30;

pub fn status_line(view: &AppViewModel) -> String {
    let category = view
        .category
        .map(|code| code.to_string())
        .unwrap_or_else(|| "-".to_string());
    match view.session {
        SessionState::Scanning => format!(
            "{} {} [{}] {}% of {} candidates",
            view.name_input.trim(),
            category,
            progress_bar(view.progress),
            view.progress,
            view.candidate_count
        ),
        SessionState::Complete => format!(
            "Status: {} | {} {} | {} of {} candidates working",
            view.status_text,
            view.name_input.trim(),
            category,
            view.working_count,
            view.candidate_count
        ),
        SessionState::Ready | SessionState::Error => format!("Status: {}", view.status_text),
    }
}

pub fn progress_bar(percent: u8) -> String {
    let filled = BAR_WIDTH * usize::from(percent.min(100)) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Visible results grouped by region, priority groups first.
pub fn render_results(view: &AppViewModel) -> Vec<String> {
    if view.results.is_empty() {
        return vec![match &view.region_filter {
            Some(region) => format!("No working links in region {region}."),
            None => "No working links.".to_string(),
        }];
    }

    let mut lines = Vec::with_capacity(view.results.len() + view.regions.len() * 2);
    lines.push(format!(
        "Working links ({}){}",
        view.results.len(),
        view.region_filter
            .as_deref()
            .map(|region| format!(" in {region}"))
            .unwrap_or_default()
    ));
    for (region, rows) in view.grouped() {
        lines.push(String::new());
        lines.push(format!("== {region} ({})", rows.len()));
        for row in rows {
            lines.push(format!("  #{:<3} {:<8} {}", row.index, row.category, row.url));
        }
    }
    if view.region_filter.is_none() && view.regions.len() > 1 {
        lines.push(String::new());
        lines.push(format!("Regions: {}", view.regions.join(", ")));
    }
    lines
}

pub fn render_candidates(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| {
            let marker = if c.priority { "*" } else { " " };
            format!("{marker} {:<9} {:<8} {}", c.region, c.category, c.url)
        })
        .collect()
}

pub fn render_categories() -> Vec<String> {
    CATEGORIES
        .iter()
        .map(|spec| format!("{:<3} {}", spec.code.to_string(), spec.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scout_core::{update, AppState, CategoryCode, Msg, ScanOutcome, ValidatedCandidate};

    fn completed_view(results: Vec<ValidatedCandidate>) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::NameChanged("Cobra".into()));
        let (state, _) = update(state, Msg::CategorySelected(CategoryCode::TokenWheel));
        let (state, _) = update(
            state,
            Msg::ScanFinished {
                run_id: 1,
                outcome: ScanOutcome::Completed(results),
            },
        );
        state.view()
    }

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(progress_bar(0), ".".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(100), "#".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(50).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn results_are_grouped_by_region() {
        let view = completed_view(vec![
            ValidatedCandidate::working(Candidate::new("https://c/s.png", "Store", "Banner", true)),
            ValidatedCandidate::working(Candidate::new("https://c/t.jpg", "SG", "Tab", false)),
        ]);
        let lines = render_results(&view);
        assert_eq!(lines[0], "Working links (2)");
        assert_eq!(lines[2], "== Store (1)");
        assert!(lines[3].ends_with("https://c/s.png"));
        assert_eq!(lines[5], "== SG (1)");
        assert_eq!(lines.last().unwrap(), "Regions: Store, SG");
        assert!(status_line(&view).contains("2 of 106 candidates working"));
    }

    #[test]
    fn empty_results_say_so() {
        let view = completed_view(Vec::new());
        assert_eq!(render_results(&view), vec!["No working links.".to_string()]);
    }

    #[test]
    fn categories_list_every_code() {
        let lines = render_categories();
        assert_eq!(lines.len(), CATEGORIES.len());
        assert!(lines[0].starts_with("TW "));
        assert!(lines.iter().any(|line| line.contains("Other Royale")));
    }
}
