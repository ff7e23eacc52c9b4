//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! operations tdver consumes, so the release workflow can run against a real
//! repository or a synthetic in-memory one.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use tdver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> tdver::Result<()> {
//! let tags = repo.list_tags()?;
//! let diff = repo.diff("1.0.0", "HEAD")?;
//! println!("{} tags, {} files changed", tags.len(), diff.files_changed);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{DiffSummary, Tag};
use crate::error::Result;
use std::path::PathBuf;

/// The version-control capabilities the release workflow depends on.
///
/// Mutating operations take `&self`; a tdver invocation owns the repository
/// for its whole lifetime and performs them as a linear, non-retried
/// sequence.
pub trait Repository {
    /// Root of the working tree, where `tdver.json` lives
    fn workdir(&self) -> Result<PathBuf>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Describe HEAD relative to the nearest version-shaped tag.
    ///
    /// Returns the bare tag name when HEAD is tagged, otherwise the tag name
    /// followed by the describe suffix (`1.2.0-3-gabc1234`).
    fn describe(&self) -> Result<String>;

    /// Whether the working tree has uncommitted modifications
    fn is_dirty(&self) -> Result<bool>;

    /// Per-file changes between two references, with rename detection
    ///
    /// # Arguments
    /// * `from` - Older reference, usually the last release tag
    /// * `to` - Newer reference, usually `HEAD`
    fn diff(&self, from: &str, to: &str) -> Result<DiffSummary>;

    /// Stage `paths` (relative to the working tree) and commit them on HEAD.
    ///
    /// The new commit's parent is the current HEAD commit, or none for an
    /// unborn branch. Returns the new commit id.
    fn commit_paths(&self, paths: &[&str], message: &str) -> Result<String>;

    /// Create an annotated tag pointing at the HEAD commit
    fn create_tag(&self, tag: &Tag) -> Result<()>;

    /// Create a local branch at the HEAD commit
    fn create_branch(&self, name: &str) -> Result<()>;
}
