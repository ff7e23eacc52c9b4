#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway git repository with an identity configured
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }
        TestRepo { dir, repo }
    }

    /// Repository with a single README commit
    pub fn with_initial_commit() -> Self {
        let test_repo = Self::new();
        test_repo.write("README.md", "Initial content\n");
        test_repo.commit_all("Initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).expect("Could not write file");
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).expect("Could not read file")
    }

    /// Stage every change (including removals) and commit on HEAD
    pub fn commit_all(&self, message: &str) {
        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Could not add files");
        index
            .update_all(["*"].iter(), None)
            .expect("Could not update index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let sig = Signature::now("Test User", "test@example.com").unwrap();

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit");
    }

    /// Move a tracked file and commit the move
    pub fn rename(&self, from: &str, to: &str) {
        let target = self.dir.path().join(to);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::rename(self.dir.path().join(from), target).unwrap();
        self.commit_all(&format!("move {} to {}", from, to));
    }

    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .repo
            .tag_names(None)
            .unwrap()
            .iter()
            .flatten()
            .map(String::from)
            .collect();
        tags.sort();
        tags
    }

    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .unwrap()
            .peel_to_commit()
            .unwrap()
            .message()
            .unwrap_or_default()
            .to_string()
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.repo
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }
}
