use crate::domain::{DiffSummary, FileChange, Tag};
use crate::error::{Result, TdverError};
use git2::{
    Commit, Delta, DescribeFormatOptions, DescribeOptions, DiffFindOptions, ErrorCode, Patch,
    Repository as Git2Repo, Signature, StatusOptions,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Only tags starting with a digit are candidates for describe.
const VERSION_TAG_GLOB: &str = "[0-9]*";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Identity from git config, or a fixed tdver identity when none is set
    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig),
            Err(_) => Ok(Signature::now("tdver", "tdver@localhost")?),
        }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn require_head_commit(&self) -> Result<Commit<'_>> {
        self.head_commit()?
            .ok_or_else(|| TdverError::Git(git2::Error::from_str("HEAD has no commit yet")))
    }
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.and_then(Path::to_str).map(String::from)
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| TdverError::config("Repository has no working tree"))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn describe(&self) -> Result<String> {
        let mut opts = DescribeOptions::new();
        opts.describe_tags().pattern(VERSION_TAG_GLOB);

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(7);

        let described = self.repo.describe(&opts)?.format(Some(&format))?;
        debug!(%described, "described HEAD");
        Ok(described)
    }

    fn is_dirty(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn diff(&self, from: &str, to: &str) -> Result<DiffSummary> {
        let old_tree = self.repo.revparse_single(from)?.peel_to_tree()?;
        let new_tree = self.repo.revparse_single(to)?.peel_to_tree()?;

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

        // Pair deletes with adds so a moved file is one record
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let files_changed = diff.stats()?.files_changed();

        let mut files = Vec::new();
        for idx in 0..diff.deltas().len() {
            let Some(patch) = Patch::from_diff(&diff, idx)? else {
                continue;
            };
            let (_, insertions, deletions) = patch.line_stats()?;

            let delta = patch.delta();
            let old_path = match delta.status() {
                Delta::Added | Delta::Untracked => None,
                _ => path_string(delta.old_file().path()),
            };
            let new_path = match delta.status() {
                Delta::Deleted => None,
                _ => path_string(delta.new_file().path()),
            };

            files.push(FileChange {
                old_path,
                new_path,
                insertions,
                deletions,
            });
        }

        Ok(DiffSummary {
            files,
            files_changed,
        })
    }

    fn commit_paths(&self, paths: &[&str], message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let sig = self.signature()?;
        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        Ok(oid.to_string())
    }

    fn create_tag(&self, tag: &Tag) -> Result<()> {
        let head = self.require_head_commit()?;
        let sig = self.signature()?;

        self.repo
            .tag(&tag.name, head.as_object(), &sig, &tag.message, false)?;

        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head = self.require_head_commit()?;
        self.repo.branch(name, &head, false)?;

        Ok(())
    }
}
