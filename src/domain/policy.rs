//! Increment rules: which part a changeset requires, and whether released
//! history allows that part to move.

use crate::domain::{ChangeStats, Part, Version, VersionHistory};

/// Decide which version part a changeset requires, if any.
///
/// The first matching rule wins:
/// - A: a test was altered or removed
/// - B: a test was added
/// - C: a regression test was added under the bug-test prefix
/// - D: anything else changed since the last tag, committed or not
pub fn determine_required_part(
    test_changes: ChangeStats,
    bug_changes: ChangeStats,
    commits_since_tag: usize,
    is_dirty: bool,
) -> Option<Part> {
    if test_changes.deletions > 0 {
        Some(Part::A)
    } else if test_changes.insertions > 0 {
        Some(Part::B)
    } else if bug_changes.insertions > 0 {
        Some(Part::C)
    } else if commits_since_tag > 0 || is_dirty {
        Some(Part::D)
    } else {
        None
    }
}

/// The released version that blocks incrementing `part` of `current`.
///
/// The edge version may always move. Behind the edge, a D bump is judged as
/// a C bump, and the move is blocked when the resulting version has already
/// been released. A part that cannot increment at all collides with nothing.
pub fn blocking_release(part: Part, current: &Version, history: &VersionHistory) -> Option<Version> {
    if history.is_edge(current) {
        return None;
    }

    let part = if part == Part::D { Part::C } else { part };
    current
        .increment(part)
        .ok()
        .filter(|candidate| history.contains(candidate))
}

/// Whether released history permits incrementing `part` of `current`.
pub fn incrementable(part: Part, current: &Version, history: &VersionHistory) -> bool {
    blocking_release(part, current, history).is_none()
}
