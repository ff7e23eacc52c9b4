//! Release lifecycle orchestration
//!
//! This module contains the four tdver operations (start, check, release,
//! support). It composes the versioning rules in [crate::domain] with a
//! [Repository], kept free of clap so the workflow can be driven
//! programmatically and tested against [crate::git::MockRepository].

use tracing::{debug, info};

use crate::analyzer::{ChangeAnalyzer, WorkingState};
use crate::ci;
use crate::config::{Config, Settings};
use crate::domain::{blocking_release, described_tag, Part, Tag, Version, VersionHistory};
use crate::error::{Result, TdverError};
use crate::git::Repository;

const NO_RELEASE: &str = "A release doesn't seem to be possible.";
const NO_SUPPORT: &str = "This version can't be maintained; either it is the edge version or the minor and patch positions may not increment.";

/// A lifecycle operation requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Initialise tdver in a repository, optionally at a given version
    Start { at: Option<String> },
    Check,
    Release,
    Support,
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// `start` committed the scaffolding and tagged the initial version
    Initialized { version: Version },

    /// `check` found nothing that requires an increment
    Valid { version: Version },

    /// `release` committed and tagged a new version
    Released {
        previous: Version,
        new: Version,
        part: Part,
    },

    /// `support` created a maintenance branch
    BranchCreated { branch: String },
}

/// Run one operation against `repo`.
///
/// `start` is only valid before a config document exists; every other
/// operation requires one.
pub fn run_workflow<R: Repository>(
    repo: &R,
    settings: Settings,
    action: Action,
) -> Result<WorkflowResult> {
    let config_path = repo.workdir()?.join(&settings.config_file);
    let config = Config::load(&config_path)?;

    match action {
        Action::Start { at } => match config {
            None => start(repo, &settings, at.as_deref()),
            Some(_) => Err(TdverError::config(format!(
                "{} already exists; this repository is already using TDVer",
                settings.config_file
            ))),
        },
        Action::Check => Workflow::open(repo, settings, config)?.check(),
        Action::Release => Workflow::open(repo, settings, config)?.release(),
        Action::Support => Workflow::open(repo, settings, config)?.support(),
    }
}

/// Initialise a repository at version 0.0.0.
///
/// Writes the config document, scaffolds the CI manifest, commits both and
/// tags the initial version. Steps are not rolled back if a later one fails.
pub fn start<R: Repository>(
    repo: &R,
    settings: &Settings,
    at: Option<&str>,
) -> Result<WorkflowResult> {
    if let Some(requested) = at {
        return Err(TdverError::unsupported(format!(
            "starting at version {} is not supported yet; new repositories start at 0.0.0",
            requested
        )));
    }

    let workdir = repo.workdir()?;
    let version = Version::default();

    let config = Config {
        version: version.to_string(),
        tests: settings.tests.clone(),
        bug_tests: settings.bug_tests.clone(),
        ..Config::default()
    };
    config.save(&workdir.join(&settings.config_file))?;
    ci::ensure_validation_step(&workdir.join(&settings.ci_manifest), &settings.validate_command)?;

    let commit = repo.commit_paths(
        &[settings.ci_manifest.as_str(), settings.config_file.as_str()],
        &format!("tdver: init at {}", version),
    )?;
    debug!(%commit, "committed tdver scaffolding");

    repo.create_tag(&Tag::release(&version))?;
    info!(%version, "initialized tdver repository");

    Ok(WorkflowResult::Initialized { version })
}

/// A loaded tdver repository: its history, current version and the changes
/// made since that version was tagged.
pub struct Workflow<'r, R: Repository> {
    repo: &'r R,
    settings: Settings,
    config: Config,
    history: VersionHistory,
    current: Version,
    state: WorkingState,
}

impl<'r, R: Repository> Workflow<'r, R> {
    /// Load the workflow of a repository that already uses tdver.
    ///
    /// Fails when `config` is absent; test prefixes come from the config.
    fn open(repo: &'r R, settings: Settings, config: Option<Config>) -> Result<Self> {
        let config = config.ok_or_else(|| {
            TdverError::config(format!(
                "{} not found; run `tdver start` first",
                settings.config_file
            ))
        })?;
        let settings = settings.with_prefixes_from(&config);
        Self::load(repo, settings, config)
    }

    /// Read history, current version and working state from `repo`.
    ///
    /// Fails if HEAD cannot be described by a version tag.
    pub fn load(repo: &'r R, settings: Settings, config: Config) -> Result<Self> {
        let tags = repo.list_tags()?;
        let history = VersionHistory::from_tags(&tags);

        let described = repo.describe()?;
        let current: Version = described.parse()?;

        // Diff against the tag as written: `1.0.0-0` does not resolve as `1.0.0`
        let last_tag = described_tag(&described, &tags).ok_or_else(|| {
            TdverError::version(format!("no tag matches the description '{}'", described))
        })?;

        let analyzer = ChangeAnalyzer::new(settings.tests.as_str(), settings.bug_tests.as_str());
        let state = analyzer.analyze(repo, last_tag)?;

        debug!(%current, releases = history.len(), "loaded tdver repository");
        Ok(Workflow {
            repo,
            settings,
            config,
            history,
            current,
            state,
        })
    }

    pub fn current(&self) -> Version {
        self.current
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub fn state(&self) -> &WorkingState {
        &self.state
    }

    /// The required part and the version it leads to, if an increment is
    /// required and history permits it.
    fn required_increment(&self) -> Result<Option<(Part, Version)>> {
        let Some(part) = self.state.required_part() else {
            return Ok(None);
        };

        let required = self.current.increment(part)?;
        let blocked_by = blocking_release(part, &self.current, &self.history);
        debug!(part = %part, %required, ?blocked_by, "required increment");

        match blocked_by {
            Some(existing) => Err(TdverError::PolicyViolation {
                part,
                current: self.current,
                required,
                existing,
            }),
            None => Ok(Some((part, required))),
        }
    }

    /// Validate that the current version satisfies the rules.
    ///
    /// Succeeds with the current version when no increment is required.
    pub fn check(&self) -> Result<WorkflowResult> {
        match self.required_increment()? {
            None => Ok(WorkflowResult::Valid {
                version: self.current,
            }),
            Some((part, required)) => Err(TdverError::IncrementRequired {
                part,
                current: self.current,
                required,
            }),
        }
    }

    /// Increment, commit and tag a new release.
    pub fn release(&mut self) -> Result<WorkflowResult> {
        let Some((part, new)) = self.required_increment()? else {
            return Err(TdverError::no_release(NO_RELEASE));
        };
        let previous = self.current;

        let workdir = self.repo.workdir()?;
        self.config.version = new.to_string();
        self.config.save(&workdir.join(&self.settings.config_file))?;

        let mut paths = vec![self.settings.config_file.as_str()];
        if workdir.join(&self.settings.ci_manifest).exists() {
            paths.push(self.settings.ci_manifest.as_str());
        }
        let commit = self
            .repo
            .commit_paths(&paths, &format!("tdver: {} -> {}", previous, new))?;
        debug!(%commit, "committed release");

        self.repo.create_tag(&Tag::release(&new))?;
        info!(%previous, %new, part = %part, "released");

        self.history.record(new);
        self.current = new;

        Ok(WorkflowResult::Released {
            previous,
            new,
            part,
        })
    }

    /// Create a maintenance branch for the current version.
    pub fn support(&self) -> Result<WorkflowResult> {
        let tip = self
            .history
            .support_tip(&self.current)
            .ok_or_else(|| TdverError::no_support(NO_SUPPORT))?;

        let branch = tip.branch_name();
        self.repo.create_branch(&branch)?;
        info!(%branch, "created maintenance branch");

        Ok(WorkflowResult::BranchCreated { branch })
    }
}
