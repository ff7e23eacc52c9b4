//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod changes;
pub mod history;
pub mod policy;
pub mod tag;
pub mod version;

pub use branch::SupportTip;
pub use changes::{stats_for_prefix, ChangeStats, DiffSummary, FileChange};
pub use history::VersionHistory;
pub use policy::{blocking_release, determine_required_part, incrementable};
pub use tag::{described_tag, Tag};
pub use version::{Part, Version};
