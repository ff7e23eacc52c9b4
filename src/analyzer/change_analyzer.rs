use crate::domain::{determine_required_part, stats_for_prefix, ChangeStats, Part};
use crate::error::Result;
use crate::git::Repository;
use tracing::debug;

/// Snapshot of how the repository differs from its last release tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingState {
    /// Line changes under the test prefix
    pub test_changes: ChangeStats,
    /// Line changes under the bug-test prefix
    pub bug_changes: ChangeStats,
    /// Files changed between the tag and HEAD
    pub commits_since_tag: usize,
    /// Uncommitted modifications in the working tree
    pub is_dirty: bool,
}

impl WorkingState {
    /// The part this state requires to increment, if any
    pub fn required_part(&self) -> Option<Part> {
        determine_required_part(
            self.test_changes,
            self.bug_changes,
            self.commits_since_tag,
            self.is_dirty,
        )
    }
}

/// Classifies the changes between a release tag and HEAD
pub struct ChangeAnalyzer {
    tests: String,
    bug_tests: String,
}

impl ChangeAnalyzer {
    /// Create a new analyzer for the given test and bug-test prefixes
    pub fn new(tests: impl Into<String>, bug_tests: impl Into<String>) -> Self {
        ChangeAnalyzer {
            tests: tests.into(),
            bug_tests: bug_tests.into(),
        }
    }

    /// Compute the working state of `repo` relative to `last_tag`
    pub fn analyze<R: Repository>(&self, repo: &R, last_tag: &str) -> Result<WorkingState> {
        let diff = repo.diff(last_tag, "HEAD")?;
        let state = WorkingState {
            test_changes: stats_for_prefix(&diff.files, &self.tests),
            bug_changes: stats_for_prefix(&diff.files, &self.bug_tests),
            commits_since_tag: diff.files_changed,
            is_dirty: repo.is_dirty()?,
        };

        debug!(
            last_tag,
            test_insertions = state.test_changes.insertions,
            test_deletions = state.test_changes.deletions,
            bug_insertions = state.bug_changes.insertions,
            files_changed = state.commits_since_tag,
            dirty = state.is_dirty,
            "classified changes since last release"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileChange;
    use crate::git::MockRepository;

    fn repo_with(files: Vec<FileChange>) -> MockRepository {
        let mut repo = MockRepository::new(".");
        repo.add_tag("1.0.0");
        repo.set_diff("1.0.0", files);
        repo
    }

    #[test]
    fn test_analyze_splits_prefixes() {
        let repo = repo_with(vec![
            FileChange::new(Some("tests/a.rs"), Some("tests/a.rs"), 3, 0),
            FileChange::new(None, Some("bugs/b.rs"), 5, 0),
            FileChange::new(Some("src/lib.rs"), Some("src/lib.rs"), 9, 9),
        ]);
        let analyzer = ChangeAnalyzer::new("tests/", "bugs/");

        let state = analyzer.analyze(&repo, "1.0.0").unwrap();
        assert_eq!(state.test_changes, ChangeStats::new(3, 0));
        assert_eq!(state.bug_changes, ChangeStats::new(5, 0));
        assert_eq!(state.commits_since_tag, 3);
        assert!(!state.is_dirty);
        assert_eq!(state.required_part(), Some(Part::B));
    }

    #[test]
    fn test_analyze_custom_prefixes() {
        let repo = repo_with(vec![FileChange::new(
            Some("spec/a.rs"),
            Some("spec/a.rs"),
            0,
            1,
        )]);
        let analyzer = ChangeAnalyzer::new("spec/", "regressions/");

        let state = analyzer.analyze(&repo, "1.0.0").unwrap();
        assert_eq!(state.required_part(), Some(Part::A));
    }

    #[test]
    fn test_analyze_untouched() {
        let repo = repo_with(Vec::new());
        let analyzer = ChangeAnalyzer::new("tests/", "bugs/");

        let state = analyzer.analyze(&repo, "1.0.0").unwrap();
        assert_eq!(state, WorkingState::default());
        assert_eq!(state.required_part(), None);
    }

    #[test]
    fn test_analyze_dirty_only() {
        let mut repo = repo_with(Vec::new());
        repo.set_dirty(true);
        let analyzer = ChangeAnalyzer::new("tests/", "bugs/");

        let state = analyzer.analyze(&repo, "1.0.0").unwrap();
        assert_eq!(state.required_part(), Some(Part::D));
    }
}
