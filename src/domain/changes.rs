/// One file's entry in a diff between two repository references.
///
/// A rename produces a single record carrying both paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub insertions: usize,
    pub deletions: usize,
}

impl FileChange {
    pub fn new(
        old_path: Option<&str>,
        new_path: Option<&str>,
        insertions: usize,
        deletions: usize,
    ) -> Self {
        FileChange {
            old_path: old_path.map(String::from),
            new_path: new_path.map(String::from),
            insertions,
            deletions,
        }
    }

    /// True if either side of the change lives under `prefix`
    pub fn touches(&self, prefix: &str) -> bool {
        let under = |path: &Option<String>| path.as_deref().is_some_and(|p| p.starts_with(prefix));
        under(&self.old_path) || under(&self.new_path)
    }
}

/// Per-file records plus the aggregate "files changed" count of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files: Vec<FileChange>,
    pub files_changed: usize,
}

/// Inserted and deleted line counts under one path prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    pub insertions: usize,
    pub deletions: usize,
}

impl ChangeStats {
    pub fn new(insertions: usize, deletions: usize) -> Self {
        ChangeStats {
            insertions,
            deletions,
        }
    }
}

/// Sum the line statistics of every record touching `prefix`.
///
/// Each record is counted at most once, so a rename whose old and new paths
/// both fall under the prefix contributes its lines a single time.
pub fn stats_for_prefix(files: &[FileChange], prefix: &str) -> ChangeStats {
    files
        .iter()
        .filter(|change| change.touches(prefix))
        .fold(ChangeStats::default(), |acc, change| ChangeStats {
            insertions: acc.insertions + change.insertions,
            deletions: acc.deletions + change.deletions,
        })
}
