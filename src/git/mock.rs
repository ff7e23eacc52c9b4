use crate::domain::{DiffSummary, FileChange, Tag};
use crate::error::{Result, TdverError};
use crate::git::Repository;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations.
///
/// Holds a synthetic tag history and a canned diff, and records every
/// mutation the workflow performs so tests can assert on them.
pub struct MockRepository {
    workdir: PathBuf,
    tags: RefCell<Vec<String>>,
    describe: Option<String>,
    dirty: bool,
    diffs: HashMap<String, DiffSummary>,
    commits: RefCell<Vec<String>>,
    branches: RefCell<Vec<String>>,
    next_commit: Cell<u32>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            tags: RefCell::new(Vec::new()),
            describe: None,
            dirty: false,
            diffs: HashMap::new(),
            commits: RefCell::new(Vec::new()),
            branches: RefCell::new(Vec::new()),
            next_commit: Cell::new(0),
        }
    }

    /// Add a tag by name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.get_mut().push(name.into());
    }

    /// Set what `describe` reports for HEAD
    pub fn set_describe(&mut self, describe: impl Into<String>) {
        self.describe = Some(describe.into());
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Set the diff returned from `from` to HEAD
    pub fn set_diff(&mut self, from: impl Into<String>, files: Vec<FileChange>) {
        let summary = DiffSummary {
            files_changed: files.len(),
            files,
        };
        self.diffs.insert(from.into(), summary);
    }

    /// Messages of commits created so far
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// Tags in creation order, including the initial ones
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    pub fn branches(&self) -> Vec<String> {
        self.branches.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn describe(&self) -> Result<String> {
        self.describe
            .clone()
            .ok_or_else(|| TdverError::Git(git2::Error::from_str("No tags can describe HEAD")))
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn diff(&self, from: &str, _to: &str) -> Result<DiffSummary> {
        Ok(self.diffs.get(from).cloned().unwrap_or_default())
    }

    fn commit_paths(&self, _paths: &[&str], message: &str) -> Result<String> {
        let id = self.next_commit.get() + 1;
        self.next_commit.set(id);
        self.commits.borrow_mut().push(message.to_string());
        Ok(format!("{:040x}", id))
    }

    fn create_tag(&self, tag: &Tag) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains(&tag.name) {
            return Err(TdverError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                tag.name
            ))));
        }
        tags.push(tag.name.clone());
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.branches.borrow_mut().push(name.to_string());
        Ok(())
    }
}
