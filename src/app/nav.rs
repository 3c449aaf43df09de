//! Navigation state and logic for fidx.
//!
//! Holds the full listing of the current directory, the live filter and the cursor.
//! The displayed collection is always the subsequence of entries whose name contains
//! the filter text (case-insensitive), in listing order.

use crate::core::Entry;

use std::path::{Path, PathBuf};

/// Represents the navigation state of the browsing step.
///
/// The cursor indexes the displayed collection. It is reset to 0 whenever that
/// collection is recomputed and never wraps around.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<Entry>,
    shown: Vec<usize>,
    filter: String,
    selected: usize,
}

impl NavState {
    pub fn new(path: PathBuf, entries: Vec<Entry>) -> Self {
        let mut nav = NavState {
            current_dir: path,
            ..NavState::default()
        };
        nav.entries = entries;
        nav.recompute();
        nav
    }

    // Getters / accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    #[inline]
    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Entries currently on screen, in display order.
    pub fn shown_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.shown.iter().filter_map(|&i| self.entries.get(i))
    }

    /// The entry under the cursor, None when nothing is displayed.
    pub fn highlighted(&self) -> Option<&Entry> {
        self.shown
            .get(self.selected)
            .and_then(|&i| self.entries.get(i))
    }

    /// First displayed entry, used for filter auto-completion.
    pub fn first_match(&self) -> Option<&Entry> {
        self.shown_entries().next()
    }

    /// Replaces the listing after a directory change. Clears the filter.
    pub fn set_listing(&mut self, path: PathBuf, entries: Vec<Entry>) {
        self.current_dir = path;
        self.entries = entries;
        self.filter.clear();
        self.recompute();
    }

    pub fn apply_filter(&mut self, filter: &str) {
        if self.filter == filter {
            return;
        }
        self.filter = filter.to_string();
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        let needle = self.filter.to_lowercase();
        self.shown = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| needle.is_empty() || e.lowercase_name().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    // Cursor movement. Each returns true if the cursor moved.

    pub fn move_up(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 >= self.shown.len() {
            return false;
        }
        self.selected += 1;
        true
    }

    pub fn go_top(&mut self) -> bool {
        let moved = self.selected != 0;
        self.selected = 0;
        moved
    }

    pub fn go_bottom(&mut self) -> bool {
        let last = self.shown.len().saturating_sub(1);
        let moved = self.selected != last;
        self.selected = last;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entry(name: &str) -> Entry {
        Entry::new(
            name,
            PathBuf::from("/tmp").join(name),
            true,
            SystemTime::UNIX_EPOCH,
        )
    }

    fn shown_names(nav: &NavState) -> Vec<&str> {
        nav.shown_entries().map(|e| e.name()).collect()
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut nav = NavState::new(
            PathBuf::from("/tmp"),
            vec![entry("Invoices"), entry("report.pdf"), entry("Reports")],
        );
        nav.move_down();
        nav.apply_filter("rep");
        assert_eq!(shown_names(&nav), vec!["report.pdf", "Reports"]);
        assert_eq!(nav.selected_idx(), 0);
        assert_eq!(nav.first_match().map(Entry::name), Some("report.pdf"));
    }

    #[test]
    fn clearing_filter_restores_listing() {
        let names = ["..", "beta", "Alpha", "gamma"];
        let mut nav = NavState::new(PathBuf::from("/tmp/x"), names.iter().map(|n| entry(n)).collect());
        let before = shown_names(&nav).into_iter().map(String::from).collect::<Vec<_>>();

        nav.apply_filter("a");
        nav.apply_filter("zz");
        assert_eq!(nav.shown_len(), 0);
        assert!(nav.highlighted().is_none());

        nav.clear_filter();
        assert_eq!(shown_names(&nav), before);
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn cursor_is_clamped_without_wraparound() {
        let mut nav = NavState::new(PathBuf::from("/tmp"), vec![entry("a"), entry("b")]);
        assert!(!nav.move_up());
        assert!(nav.move_down());
        assert!(!nav.move_down());
        assert_eq!(nav.highlighted().map(Entry::name), Some("b"));
        assert!(nav.go_top());
        assert!(nav.go_bottom());
        assert!(!nav.go_bottom());
    }

    #[test]
    fn empty_listing_has_no_highlight() {
        let mut nav = NavState::new(PathBuf::from("/"), Vec::new());
        assert!(!nav.move_down());
        assert!(!nav.go_bottom());
        assert_eq!(nav.selected_idx(), 0);
        assert!(nav.highlighted().is_none());
        assert!(nav.first_match().is_none());
    }

    #[test]
    fn new_listing_resets_filter_and_cursor() {
        let mut nav = NavState::new(PathBuf::from("/a"), vec![entry("x"), entry("y")]);
        nav.apply_filter("y");
        nav.set_listing(PathBuf::from("/b"), vec![entry("m"), entry("n")]);
        assert_eq!(nav.filter(), "");
        assert_eq!(nav.current_dir(), Path::new("/b"));
        assert_eq!(shown_names(&nav), vec!["m", "n"]);
    }
}
