//! Directory listing logic for fidx.
//!
//! Provides the [Entry] struct which is used by the list engine and the renderer,
//! and the [list_dir] function which builds the ordered listing of one directory.
//!
//! A listing never fails: unreadable or missing directories produce an empty listing
//! (plus the ".." parent entry when the path has a parent). In directory-only mode,
//! directories that hold no regular file anywhere below them are pruned. That check is
//! bounded by depth and by the number of inspected nodes and never follows symlinks.

use serde::Deserialize;

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Display name of the synthetic parent entry.
pub const PARENT_NAME: &str = "..";

/// A single row of a directory listing.
///
/// The parent entry is synthetic: its name is [PARENT_NAME], its path is the parent
/// directory and its modification time is the epoch so that it always sorts first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    modified: SystemTime,
}

impl Entry {
    pub fn new(name: impl Into<String>, path: PathBuf, is_dir: bool, modified: SystemTime) -> Self {
        Entry {
            name: name.into(),
            path,
            is_dir,
            modified,
        }
    }

    /// Builds the ".." entry pointing at `parent`.
    pub fn parent(parent: PathBuf) -> Self {
        Entry::new(PARENT_NAME, parent, true, SystemTime::UNIX_EPOCH)
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    pub(crate) fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Ordering policy for the children of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently modified first.
    #[default]
    Modified,
    /// Directories before files, each group by name.
    DirsFirst,
}

/// Options that shape one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub directories_only: bool,
    pub sort: SortOrder,
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            directories_only: true,
            sort: SortOrder::Modified,
            max_depth: 8,
            max_nodes: 4096,
        }
    }
}

/// Lists the immediate children of `path`.
///
/// The parent entry comes first when `path` has a parent that differs from itself.
/// Hidden names (leading '.') and blank names are skipped.
///
/// With `directories_only` the whole listing shares one `max_nodes` read budget. Once it
/// runs out the remaining directories are kept without being scanned.
pub fn list_dir(path: &Path, opts: &ListOptions) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut budget = opts.max_nodes;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && parent != path
    {
        entries.push(Entry::parent(parent.to_path_buf()));
    }

    let read = match fs::read_dir(path) {
        Ok(read) => read,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "listing failed, showing empty directory");
            return entries;
        }
    };

    let mut children = Vec::new();
    for dent in read.flatten() {
        let name = dent.file_name().to_string_lossy().into_owned();
        if is_hidden_or_blank(&name) {
            continue;
        }
        let Ok(file_type) = dent.file_type() else {
            continue;
        };
        let is_dir = file_type.is_dir();
        let child = dent.path();

        if opts.directories_only {
            if !is_dir || !holds_file(&child, opts.max_depth, &mut budget) {
                continue;
            }
        } else if !is_dir && !file_type.is_file() {
            continue;
        }

        let modified = dent
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        children.push(Entry::new(name, child, is_dir, modified));
    }

    sort_entries(&mut children, opts.sort);
    entries.extend(children);
    entries
}

#[inline]
fn is_hidden_or_blank(name: &str) -> bool {
    name.starts_with('.') || name.trim().is_empty()
}

fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    match order {
        SortOrder::Modified => entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| compare_names(a, b))
        }),
        SortOrder::DirsFirst => {
            entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| compare_names(a, b)))
        }
    }
}

fn compare_names(a: &Entry, b: &Entry) -> Ordering {
    a.lowercase_name()
        .cmp(&b.lowercase_name())
        .then_with(|| a.name.cmp(&b.name))
}

enum Scan {
    Found,
    Empty,
    Exhausted,
}

/// Returns true if `dir` holds a regular file at most `max_depth` levels below it.
///
/// Symlinks are never followed and never count as files. Running out of either
/// bound answers true, an unreadable directory answers false.
pub fn has_regular_file(dir: &Path, max_depth: usize, max_nodes: usize) -> bool {
    let mut budget = max_nodes;
    holds_file(dir, max_depth, &mut budget)
}

fn holds_file(dir: &Path, max_depth: usize, budget: &mut usize) -> bool {
    match scan_for_file(dir, max_depth, budget) {
        Scan::Found | Scan::Exhausted => true,
        Scan::Empty => false,
    }
}

fn scan_for_file(dir: &Path, depth_left: usize, budget: &mut usize) -> Scan {
    let Ok(read) = fs::read_dir(dir) else {
        return Scan::Empty;
    };

    let mut subdirs = Vec::new();
    for dent in read.flatten() {
        if *budget == 0 {
            return Scan::Exhausted;
        }
        *budget -= 1;

        let Ok(file_type) = dent.file_type() else {
            continue;
        };
        if file_type.is_file() {
            return Scan::Found;
        }
        if file_type.is_dir() {
            subdirs.push(dent.path());
        }
    }

    if subdirs.is_empty() {
        return Scan::Empty;
    }
    if depth_left == 0 {
        return Scan::Exhausted;
    }

    for sub in subdirs {
        match scan_for_file(&sub, depth_left - 1, budget) {
            Scan::Empty => continue,
            other => return other,
        }
    }
    Scan::Empty
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn prunes_directories_without_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("a"))?;
        fs::create_dir_all(docs.join("b"))?;
        File::create(docs.join("a").join("report.pdf"))?;

        let entries = list_dir(&docs, &ListOptions::default());
        assert_eq!(names(&entries), vec!["..", "a"]);
        assert_eq!(entries[0].path(), dir.path());
        Ok(())
    }

    #[test]
    fn parent_entry_count_matches_children() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["one", "two", "three"] {
            let sub = dir.path().join(name);
            fs::create_dir(&sub)?;
            File::create(sub.join("f.txt"))?;
        }
        let entries = list_dir(dir.path(), &ListOptions::default());
        assert_eq!(entries.len(), 4);
        assert_eq!(entries.iter().filter(|e| e.is_parent()).count(), 1);
        assert!(entries[0].is_parent());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn root_has_no_parent_entry() {
        let entries = list_dir(Path::new("/"), &ListOptions::default());
        assert!(entries.iter().all(|e| !e.is_parent()));
    }

    #[test]
    fn missing_directory_yields_only_parent() {
        let entries = list_dir(
            Path::new("/definitely/not/here/fidx"),
            &ListOptions::default(),
        );
        assert_eq!(names(&entries), vec![".."]);
    }

    #[test]
    fn hidden_entries_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join(".git"))?;
        File::create(dir.path().join(".git").join("HEAD"))?;
        File::create(dir.path().join(".env"))?;
        File::create(dir.path().join("visible.txt"))?;

        let opts = ListOptions {
            directories_only: false,
            ..ListOptions::default()
        };
        let entries = list_dir(dir.path(), &opts);
        assert_eq!(names(&entries), vec!["..", "visible.txt"]);
        Ok(())
    }

    #[test]
    fn modified_order_is_most_recent_first() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = SystemTime::now() - Duration::from_secs(3600);
        for (i, name) in ["old.txt", "mid.txt", "new.txt"].iter().enumerate() {
            let file = File::create(dir.path().join(name))?;
            file.set_modified(base + Duration::from_secs(60 * i as u64))?;
        }
        let opts = ListOptions {
            directories_only: false,
            ..ListOptions::default()
        };
        let entries = list_dir(dir.path(), &opts);
        assert_eq!(names(&entries), vec!["..", "new.txt", "mid.txt", "old.txt"]);
        Ok(())
    }

    #[test]
    fn dirs_first_groups_and_sorts_by_name() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("b.txt"))?;
        File::create(dir.path().join("A.txt"))?;
        for name in ["zeta", "Alpha"] {
            fs::create_dir(dir.path().join(name))?;
            File::create(dir.path().join(name).join("x"))?;
        }
        let opts = ListOptions {
            directories_only: false,
            sort: SortOrder::DirsFirst,
            ..ListOptions::default()
        };
        let entries = list_dir(dir.path(), &opts);
        assert_eq!(names(&entries), vec!["..", "Alpha", "zeta", "A.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn deep_file_beyond_depth_keeps_directory_visible() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let deep = dir.path().join("a").join("b").join("c").join("d");
        fs::create_dir_all(&deep)?;
        File::create(deep.join("leaf.txt"))?;

        assert!(has_regular_file(&dir.path().join("a"), 8, 4096));
        // Bound reached before the file is seen: still counted as non-empty.
        assert!(has_regular_file(&dir.path().join("a"), 1, 4096));
        Ok(())
    }

    #[test]
    fn node_budget_exhaustion_counts_as_non_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..10 {
            fs::create_dir(dir.path().join(format!("empty{i}")))?;
        }
        assert!(!has_regular_file(dir.path(), 8, 4096));
        assert!(has_regular_file(dir.path(), 8, 3));
        Ok(())
    }

    #[test]
    fn node_budget_is_shared_by_the_whole_listing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("a").join("x"))?;
        fs::create_dir_all(dir.path().join("b").join("y"))?;

        let opts = ListOptions::default();
        assert_eq!(names(&list_dir(dir.path(), &opts)), vec![".."]);

        // One read in total: the first child spends it and is pruned, the second is
        // kept unscanned.
        let tight = ListOptions {
            max_nodes: 1,
            ..opts
        };
        let entries = list_dir(dir.path(), &tight);
        assert_eq!(entries.iter().filter(|e| !e.is_parent()).count(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let target = dir.path().join("real");
        fs::create_dir(&target)?;
        File::create(target.join("data.csv"))?;

        let linked = dir.path().join("linked");
        fs::create_dir(&linked)?;
        std::os::unix::fs::symlink(target.join("data.csv"), linked.join("file-link"))?;
        std::os::unix::fs::symlink(&linked, linked.join("loop"))?;

        assert!(!has_regular_file(&linked, 8, 4096));
        let entries = list_dir(dir.path(), &ListOptions::default());
        assert_eq!(names(&entries), vec!["..", "real"]);
        Ok(())
    }
}
