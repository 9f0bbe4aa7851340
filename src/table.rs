//! # Module: Table View Adapter
//!
//! ## Responsibility
//! Projects a store snapshot through a text filter and a pagination window
//! into the rows currently visible, plus the total filtered count for the
//! paginator.
//!
//! ## Guarantees
//! - Filtering is a case-insensitive substring match on name, email or role
//! - An empty or whitespace-only filter matches every row
//! - Every change recomputes from the full snapshot (no incremental diffing)
//! - The page index is always clamped to an existing page
//!
//! ## NOT Responsible For
//! - Drawing the table (that belongs to `tui::widgets::table`)
//! - Owning user data (that belongs to `store`)

use std::sync::Arc;

use tracing::debug;

use crate::model::User;
use crate::store::Snapshot;

/// One page of filtered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    /// Visible rows, in snapshot order.
    pub rows: Vec<User>,
    /// Number of rows matching the filter across all pages.
    pub filtered_len: usize,
    /// Page index after clamping.
    pub page_index: usize,
    /// Page size used for the window.
    pub page_size: usize,
}

impl TablePage {
    /// Total number of pages; an empty result still has one (empty) page.
    pub fn page_count(&self) -> usize {
        page_count(self.filtered_len, self.page_size)
    }
}

/// Normalises raw filter input: trimmed and lower-cased.
pub fn normalize_filter(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn page_count(filtered_len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    filtered_len.div_ceil(page_size).max(1)
}

/// Filters `users` by `filter` and returns the `page_index` window.
///
/// # Arguments
/// * `users` - Full snapshot.
/// * `filter` - Raw filter text; normalised internally.
/// * `page_size` - Rows per page. Zero is treated as one.
/// * `page_index` - Requested page; clamped to the last page.
pub fn project(users: &[User], filter: &str, page_size: usize, page_index: usize) -> TablePage {
    let needle = normalize_filter(filter);
    let page_size = page_size.max(1);

    let filtered: Vec<&User> = users.iter().filter(|u| u.matches(&needle)).collect();
    let filtered_len = filtered.len();
    let page_index = page_index.min(page_count(filtered_len, page_size) - 1);

    let rows = filtered
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .cloned()
        .collect();

    TablePage {
        rows,
        filtered_len,
        page_index,
        page_size,
    }
}

/// Stateful table adapter: remembers the snapshot, filter, paging and the
/// selected row, and recomputes the visible page whenever any of them change.
#[derive(Debug, Clone)]
pub struct TableView {
    snapshot: Snapshot,
    filter: String,
    page_size: usize,
    page_size_options: Vec<usize>,
    page: TablePage,
    selected: usize,
}

impl TableView {
    /// Creates an empty table view.
    ///
    /// # Arguments
    /// * `page_size` - Initial rows per page.
    /// * `page_size_options` - Sizes offered by the paginator, ascending.
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Self {
        let page_size = page_size.max(1);
        let mut options = page_size_options;
        options.retain(|&s| s > 0);
        if !options.contains(&page_size) {
            options.push(page_size);
        }
        options.sort_unstable();
        options.dedup();

        Self {
            snapshot: Arc::from(Vec::new()),
            filter: String::new(),
            page_size,
            page_size_options: options,
            page: TablePage {
                rows: Vec::new(),
                filtered_len: 0,
                page_index: 0,
                page_size,
            },
            selected: 0,
        }
    }

    /// Replaces the snapshot and recomputes.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.recompute(self.page.page_index);
    }

    /// Sets the raw filter text and recomputes, keeping the current page if
    /// it still exists.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.recompute(self.page.page_index);
    }

    /// Raw filter text as typed.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Appends one character to the filter.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.recompute(self.page.page_index);
    }

    /// Removes the last filter character, if any.
    pub fn pop_filter_char(&mut self) {
        if self.filter.pop().is_some() {
            self.recompute(self.page.page_index);
        }
    }

    /// Changes the page size, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = self.page.page_index * self.page_size;
        self.page_size = page_size;
        self.recompute(first_row / page_size);
    }

    /// Switches to the next larger page size option, if any.
    pub fn grow_page_size(&mut self) {
        if let Some(&next) = self.page_size_options.iter().find(|&&s| s > self.page_size) {
            self.set_page_size(next);
        }
    }

    /// Switches to the next smaller page size option, if any.
    pub fn shrink_page_size(&mut self) {
        if let Some(&prev) = self
            .page_size_options
            .iter()
            .rev()
            .find(|&&s| s < self.page_size)
        {
            self.set_page_size(prev);
        }
    }

    /// Current rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page sizes offered by the paginator.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Moves to `index`, clamped to the last page.
    pub fn set_page(&mut self, index: usize) {
        self.recompute(index);
    }

    /// Advances one page if not on the last.
    pub fn next_page(&mut self) {
        self.recompute(self.page.page_index + 1);
    }

    /// Goes back one page if not on the first.
    pub fn prev_page(&mut self) {
        self.recompute(self.page.page_index.saturating_sub(1));
    }

    /// Jumps to the first page.
    pub fn first_page(&mut self) {
        self.recompute(0);
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        self.recompute(usize::MAX);
    }

    /// Current page index (0-based).
    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    /// Number of pages for the current filter.
    pub fn page_count(&self) -> usize {
        self.page.page_count()
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[User] {
        &self.page.rows
    }

    /// Number of rows matching the filter across all pages.
    pub fn filtered_len(&self) -> usize {
        self.page.filtered_len
    }

    /// The current projected page.
    pub fn page(&self) -> &TablePage {
        &self.page
    }

    /// Paginator label, e.g. `"6 – 10 of 12"` or `"0 of 0"`.
    pub fn range_label(&self) -> String {
        let total = self.page.filtered_len;
        if total == 0 {
            return "0 of 0".to_string();
        }
        let start = self.page.page_index * self.page.page_size + 1;
        let end = (start + self.page.rows.len()).saturating_sub(1);
        format!("{start} \u{2013} {end} of {total}")
    }

    /// Index of the selected row within the visible page.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected user, if the page has any rows.
    pub fn selected(&self) -> Option<&User> {
        self.page.rows.get(self.selected)
    }

    /// Moves the row cursor up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the row cursor down, stopping at the last visible row.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.page.rows.len() {
            self.selected += 1;
        }
    }

    fn recompute(&mut self, page_index: usize) {
        self.page = project(&self.snapshot, &self.filter, self.page_size, page_index);
        self.selected = self.selected.min(self.page.rows.len().saturating_sub(1));
        debug!(
            filter = %self.filter,
            filtered = self.page.filtered_len,
            page = self.page.page_index,
            "table projected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, UserFields, UserId};

    fn users(n: u64) -> Vec<User> {
        (1..=n)
            .map(|i| {
                let role = Role::ALL[(i as usize) % 3];
                User::from_fields(
                    UserId(i),
                    UserFields::new(format!("User {i}"), format!("user{i}@example.com"), role),
                )
            })
            .collect()
    }

    fn ann_and_bo() -> Vec<User> {
        vec![
            User::from_fields(UserId(1), UserFields::new("Ann", "a@x.com", Role::Admin)),
            User::from_fields(UserId(2), UserFields::new("Bo", "b@x.com", Role::Editor)),
        ]
    }

    #[test]
    fn test_project_empty_filter_windows_full_set() {
        let all = users(12);
        let page = project(&all, "", 5, 1);
        assert_eq!(page.filtered_len, 12);
        assert_eq!(page.rows, all[5..10].to_vec());
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn test_project_filter_edit_matches_only_editor_role() {
        let page = project(&ann_and_bo(), "edit", 10, 0);
        assert_eq!(page.filtered_len, 1);
        assert_eq!(page.rows[0].name, "Bo");
    }

    #[test]
    fn test_project_filter_is_case_insensitive_and_trimmed() {
        let page = project(&ann_and_bo(), "  ANN ", 10, 0);
        assert_eq!(page.filtered_len, 1);
        assert_eq!(page.rows[0].id, UserId(1));
    }

    #[test]
    fn test_project_filter_matches_email() {
        let page = project(&ann_and_bo(), "b@x", 10, 0);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].name, "Bo");
    }

    #[test]
    fn test_project_every_row_contains_filter() {
        let all = users(40);
        for filter in ["1", "user2", "VIEW", "example", "zzz"] {
            let needle = filter.to_lowercase();
            for index in 0..5 {
                let page = project(&all, filter, 7, index);
                for row in &page.rows {
                    assert!(
                        row.name.to_lowercase().contains(&needle)
                            || row.email.to_lowercase().contains(&needle)
                            || row.role.label().to_lowercase().contains(&needle),
                        "row {:?} does not match {filter}",
                        row.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_project_clamps_page_index() {
        let page = project(&users(7), "", 5, 9);
        assert_eq!(page.page_index, 1);
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn test_project_no_matches_yields_single_empty_page() {
        let page = project(&users(3), "nobody", 5, 2);
        assert_eq!(page.filtered_len, 0);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.page_count(), 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_project_zero_page_size_treated_as_one() {
        let page = project(&users(3), "", 0, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn test_view_filter_shrink_clamps_page() {
        let mut view = TableView::new(5, vec![5, 10]);
        view.set_snapshot(users(12).into());
        view.last_page();
        assert_eq!(view.page_index(), 2);

        view.set_filter("user1");
        // user1, user10, user11, user12 → one page
        assert_eq!(view.filtered_len(), 4);
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn test_view_paging_moves_within_bounds() {
        let mut view = TableView::new(5, vec![5]);
        view.set_snapshot(users(11).into());
        view.prev_page();
        assert_eq!(view.page_index(), 0);
        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.page_index(), 2);
        assert_eq!(view.visible_rows().len(), 1);
        view.first_page();
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn test_view_page_size_change_keeps_first_row_visible() {
        let mut view = TableView::new(5, vec![5, 10, 25]);
        view.set_snapshot(users(30).into());
        view.set_page(3); // rows 16..20
        view.grow_page_size();
        assert_eq!(view.page_size(), 10);
        assert_eq!(view.page_index(), 1); // rows 11..20 contains row 16
        view.shrink_page_size();
        assert_eq!(view.page_size(), 5);
        assert_eq!(view.page_index(), 2);
    }

    #[test]
    fn test_view_new_adds_initial_size_to_options() {
        let view = TableView::new(7, vec![10, 5, 0, 10]);
        assert_eq!(view.page_size_options(), &[5, 7, 10]);
    }

    #[test]
    fn test_view_range_label() {
        let mut view = TableView::new(5, vec![5]);
        assert_eq!(view.range_label(), "0 of 0");
        view.set_snapshot(users(12).into());
        view.next_page();
        assert_eq!(view.range_label(), "6 \u{2013} 10 of 12");
        view.last_page();
        assert_eq!(view.range_label(), "11 \u{2013} 12 of 12");
    }

    #[test]
    fn test_view_filter_typing_recomputes_each_keystroke() {
        let mut view = TableView::new(10, vec![10]);
        view.set_snapshot(ann_and_bo().into());
        view.push_filter_char('e');
        assert_eq!(view.filtered_len(), 1); // "Editor"
        view.push_filter_char('d');
        assert_eq!(view.filtered_len(), 1);
        view.pop_filter_char();
        view.pop_filter_char();
        assert_eq!(view.filtered_len(), 2);
        view.pop_filter_char();
        assert_eq!(view.filter(), "");
    }

    #[test]
    fn test_view_selection_stays_on_visible_rows() {
        let mut view = TableView::new(5, vec![5]);
        view.set_snapshot(users(7).into());
        for _ in 0..10 {
            view.select_next();
        }
        assert_eq!(view.selected_index(), 4);
        view.next_page();
        assert_eq!(view.selected_index(), 1);
        assert_eq!(view.selected().map(|u| u.id), Some(UserId(7)));
        view.select_prev();
        view.select_prev();
        assert_eq!(view.selected_index(), 0);
    }

    #[test]
    fn test_view_selection_on_empty_page_is_none() {
        let view = TableView::new(5, vec![5]);
        assert!(view.selected().is_none());
    }
}
