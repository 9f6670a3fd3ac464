//! User list projection
//!
//! Filter by name, sort by one column, slice out one page. `project` is the
//! pure function; `ListViewEngine` keeps a snapshot and a `ViewState` and
//! re-runs the projection whenever either changes.

use admin_core::{PageSize, SortDirection, SortKey, UserRecord, ViewState};
use serde::Serialize;
use tracing::debug;

/// One projected page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<'a> {
    /// Rows on this page, in display order
    pub rows: Vec<&'a UserRecord>,

    /// Effective 1-based page after clamping
    pub page: usize,

    /// `ceil(total_matches / page_size)`, zero when nothing matches
    pub total_pages: usize,

    /// Records that passed the search filter
    pub total_matches: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// Indices into the source slice plus the paging numbers
struct Projection {
    rows: Vec<usize>,
    page: usize,
    total_pages: usize,
    total_matches: usize,
}

fn project_indices(records: &[UserRecord], state: &ViewState) -> Projection {
    let mut matches: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| state.matches(record))
        .map(|(index, _)| index)
        .collect();

    // sort_by is stable: ties keep snapshot order
    matches.sort_by(|&a, &b| state.compare(&records[a], &records[b]));

    let page_size = state.page_size.get();
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);
    let page = state.clamped_page(total_pages);

    let rows = matches
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Projection {
        rows,
        page,
        total_pages,
        total_matches,
    }
}

/// Project `records` through `state`
///
/// The requested page is clamped into `[1, max(1, total_pages)]`; an empty
/// result is page 1 of 0 with no rows.
pub fn project<'a>(records: &'a [UserRecord], state: &ViewState) -> PageView<'a> {
    let projection = project_indices(records, state);
    PageView {
        rows: projection.rows.iter().map(|&i| &records[i]).collect(),
        page: projection.page,
        total_pages: projection.total_pages,
        total_matches: projection.total_matches,
    }
}

/// Stateful list view over the latest snapshot
///
/// Every setter recomputes the page and writes the clamped page index back
/// into the view state, so `state().page` is always in range.
#[derive(Debug, Clone, Default)]
pub struct ListViewEngine {
    records: Vec<UserRecord>,
    state: ViewState,
    rows: Vec<usize>,
    total_pages: usize,
    total_matches: usize,
}

impl ListViewEngine {
    /// Create an engine with no data
    pub fn new(state: ViewState) -> Self {
        let mut engine = Self {
            state,
            ..Self::default()
        };
        engine.recompute();
        engine
    }

    /// Create an engine over a snapshot
    pub fn with_snapshot(records: Vec<UserRecord>, state: ViewState) -> Self {
        let mut engine = Self {
            records,
            state,
            ..Self::default()
        };
        engine.recompute();
        engine
    }

    /// Swap in a freshly fetched snapshot
    pub fn replace_snapshot(&mut self, records: Vec<UserRecord>) {
        self.records = records;
        self.recompute();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search = search.into();
        self.recompute();
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.state.sort_key = key;
        self.state.direction = direction;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.state.page_size = page_size;
        self.recompute();
    }

    /// Jump to a page; out-of-range requests land on the nearest valid page
    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = page;
        self.recompute();
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.go_to_page(self.state.page + 1);
        }
    }

    /// Go back one page; no-op on the first page
    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.go_to_page(self.state.page - 1);
        }
    }

    pub fn has_next(&self) -> bool {
        self.state.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.state.page > 1
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Rows on the current page
    pub fn rows(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        self.rows.iter().map(|&i| &self.records[i])
    }

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Borrowing view of the current page
    pub fn view(&self) -> PageView<'_> {
        PageView {
            rows: self.rows().collect(),
            page: self.state.page,
            total_pages: self.total_pages,
            total_matches: self.total_matches,
        }
    }

    fn recompute(&mut self) {
        let projection = project_indices(&self.records, &self.state);

        if projection.page != self.state.page {
            debug!(
                requested = self.state.page,
                clamped = projection.page,
                total_pages = projection.total_pages,
                "Clamped page index"
            );
        }

        self.state.page = projection.page;
        self.rows = projection.rows;
        self.total_pages = projection.total_pages;
        self.total_matches = projection.total_matches;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(names: &[&str]) -> Vec<UserRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                UserRecord::new(
                    i.to_string(),
                    *name,
                    format!("{}@example.com", name.to_lowercase()),
                    "viewer",
                )
            })
            .collect()
    }

    fn names<'a>(rows: impl IntoIterator<Item = &'a UserRecord>) -> Vec<&'a str> {
        rows.into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn filters_case_insensitively_and_keeps_order() {
        let records = users(&["Alice", "Bob", "Alison"]);
        let view = project(&records, &ViewState::default().with_search("ali"));

        assert_eq!(names(view.rows), vec!["Alice", "Alison"]);
        assert_eq!(view.total_matches, 2);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn sorts_descending() {
        let records = users(&["Bob", "Alice", "Carol"]);
        let state = ViewState::default().with_sort(SortKey::Name, SortDirection::Descending);

        assert_eq!(names(project(&records, &state).rows), vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn ties_keep_snapshot_order_in_both_directions() {
        let mut records = users(&["Dan", "Eve", "Fay"]);
        for record in &mut records {
            record.role = "admin".to_string();
        }

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let state = ViewState::default().with_sort(SortKey::Role, direction);
            assert_eq!(names(project(&records, &state).rows), vec!["Dan", "Eve", "Fay"]);
        }
    }

    #[test]
    fn twelve_records_make_three_pages_of_five() {
        let records = users(&[
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l",
        ]);

        let last = project(&records, &ViewState::default().with_page(3));
        assert_eq!(last.total_pages, 3);
        assert_eq!(names(last.rows), vec!["k", "l"]);

        let clamped = project(&records, &ViewState::default().with_page(4));
        assert_eq!(clamped.page, 3);
        assert!(clamped.is_last_page());
    }

    #[test]
    fn empty_result_is_page_one_of_zero() {
        let records = users(&["Alice"]);
        let view = project(&records, &ViewState::default().with_search("zzz").with_page(3));

        assert!(view.is_empty());
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);

        let nothing = project(&[], &ViewState::default());
        assert_eq!(nothing.page, 1);
        assert_eq!(nothing.total_pages, 0);
    }

    #[test]
    fn engine_clamps_when_search_narrows() {
        let records = users(&[
            "Al1", "Al2", "Al3", "Al4", "Al5", "Al6", "Bo1", "Bo2", "Bo3", "Bo4", "Bo5",
        ]);
        let mut engine = ListViewEngine::with_snapshot(records, ViewState::default());
        engine.go_to_page(3);
        assert_eq!(engine.page(), 3);

        engine.set_search("al");
        assert_eq!(engine.total_pages(), 2);
        assert_eq!(engine.page(), 2);
        assert_eq!(engine.state().page, 2);
    }

    #[test]
    fn engine_clamps_when_page_size_grows() {
        let records = users(&[
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l",
        ]);
        let mut engine = ListViewEngine::with_snapshot(records, ViewState::default());
        engine.go_to_page(3);

        engine.set_page_size(PageSize::Ten);
        assert_eq!(engine.total_pages(), 2);
        assert_eq!(engine.page(), 2);
        assert_eq!(names(engine.rows()), vec!["k", "l"]);
    }

    #[test]
    fn next_and_previous_stop_at_bounds() {
        let records = users(&["a", "b", "c", "d", "e", "f"]);
        let mut engine = ListViewEngine::with_snapshot(records, ViewState::default());

        engine.previous_page();
        assert_eq!(engine.page(), 1);

        engine.next_page();
        assert_eq!(engine.page(), 2);
        assert!(!engine.has_next());

        engine.next_page();
        assert_eq!(engine.page(), 2);
        assert_eq!(names(engine.rows()), vec!["f"]);
    }

    #[test]
    fn replacing_snapshot_recomputes() {
        let mut engine = ListViewEngine::new(ViewState::default());
        assert_eq!(engine.total_pages(), 0);
        assert_eq!(engine.rows().count(), 0);

        engine.replace_snapshot(users(&["Zed", "Amy"]));
        assert_eq!(names(engine.rows()), vec!["Amy", "Zed"]);
        assert_eq!(engine.view().total_matches, 2);
    }
}
