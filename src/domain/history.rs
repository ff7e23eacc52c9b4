use crate::domain::{SupportTip, Version};
use tracing::debug;

/// Every released version found in the repository's tags, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionHistory {
    versions: Vec<Version>,
}

impl VersionHistory {
    /// Build the history from raw tag names.
    ///
    /// Tags that do not follow the version grammar are skipped. Tags that
    /// parse to the same version (such as `1.2.3` and `1.2.3-0`) collapse
    /// into a single entry.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = tags
            .into_iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                let parsed = Version::parse(tag);
                if parsed.is_none() {
                    debug!(tag, "skipping tag that is not a version");
                }
                parsed
            })
            .collect();
        Self::from_versions(versions)
    }

    pub fn from_versions(mut versions: Vec<Version>) -> Self {
        versions.sort_unstable_by(|x, y| y.cmp(x));
        versions.dedup();
        VersionHistory { versions }
    }

    /// Versions in descending order
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.binary_search_by(|v| version.cmp(v)).is_ok()
    }

    /// The newest released version
    pub fn latest(&self) -> Option<Version> {
        self.versions.first().copied()
    }

    /// True if nothing newer than `version` has been released.
    pub fn is_edge(&self, version: &Version) -> bool {
        self.latest().map_or(true, |top| *version >= top)
    }

    /// Record a freshly tagged release.
    pub fn record(&mut self, version: Version) {
        if let Err(pos) = self.versions.binary_search_by(|v| version.cmp(v)) {
            self.versions.insert(pos, version);
        }
    }

    /// The prefix a maintenance branch may be cut for, if `version` is
    /// eligible.
    ///
    /// Eligibility is judged one level at a time: first whether `version`
    /// carries the highest B of its A line, then whether it carries the
    /// highest C of its A.B line. Bugfix and dev releases never qualify on
    /// their own, and the edge version is already maintained by mainline.
    pub fn support_tip(&self, version: &Version) -> Option<SupportTip> {
        if self.latest() == Some(*version) {
            return None;
        }

        let same_major: Vec<&Version> = self.versions.iter().filter(|v| v.a == version.a).collect();
        if same_major.iter().map(|v| v.b).max() == Some(version.b) {
            return Some(SupportTip::Major {
                a: version.a,
                b: version.b,
            });
        }

        let same_minor = same_major.iter().filter(|v| v.b == version.b);
        if same_minor.map(|v| v.c).max() == Some(version.c) {
            return Some(SupportTip::Minor {
                a: version.a,
                b: version.b,
                c: version.c,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(a: u32, b: u32, c: u32) -> Version {
        Version::new(a, b, c, 0)
    }

    fn sample() -> VersionHistory {
        VersionHistory::from_tags(["1.0.0", "1.1.0", "1.1.1", "2.0.0"])
    }

    #[test]
    fn test_from_tags_sorts_descending_and_skips_foreign_tags() {
        let history = VersionHistory::from_tags(["1.0.0", "nightly", "v3.0.0", "2.0.0", "1.0.0-2"]);
        assert_eq!(
            history.versions(),
            &[v(2, 0, 0), Version::new(1, 0, 0, 2), v(1, 0, 0)]
        );
    }

    #[test]
    fn test_from_tags_is_order_independent() {
        let forward = VersionHistory::from_tags(["1.0.0", "1.2.0", "1.1.0"]);
        let backward = VersionHistory::from_tags(["1.1.0", "1.2.0", "1.0.0"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_equal_versions_collapse() {
        let history = VersionHistory::from_tags(["1.2.3", "1.2.3-0"]);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_contains_and_latest() {
        let history = sample();
        assert!(history.contains(&v(1, 1, 1)));
        assert!(!history.contains(&v(1, 2, 0)));
        assert_eq!(history.latest(), Some(v(2, 0, 0)));
        assert!(history.is_edge(&v(2, 0, 0)));
        assert!(!history.is_edge(&v(1, 1, 1)));
    }

    #[test]
    fn test_empty_history() {
        let history = VersionHistory::default();
        assert!(history.is_empty());
        assert!(history.is_edge(&v(0, 0, 0)));
        assert_eq!(history.support_tip(&v(0, 0, 0)), None);
    }

    #[test]
    fn test_record_keeps_order() {
        let mut history = sample();
        history.record(v(1, 2, 0));
        history.record(v(1, 2, 0));
        assert_eq!(history.len(), 5);
        assert_eq!(history.versions()[1], v(1, 2, 0));
        assert!(history.contains(&v(1, 2, 0)));
    }

    #[test]
    fn test_support_tip_edge_version() {
        assert_eq!(sample().support_tip(&v(2, 0, 0)), None);
    }

    #[test]
    fn test_support_tip_latest_minor_of_major() {
        assert_eq!(
            sample().support_tip(&v(1, 1, 1)),
            Some(SupportTip::Major { a: 1, b: 1 })
        );
        assert_eq!(
            sample().support_tip(&v(1, 1, 0)),
            Some(SupportTip::Major { a: 1, b: 1 })
        );
    }

    #[test]
    fn test_support_tip_latest_patch_of_minor() {
        assert_eq!(
            sample().support_tip(&v(1, 0, 0)),
            Some(SupportTip::Minor { a: 1, b: 0, c: 0 })
        );
    }

    #[test]
    fn test_support_tip_rejects_superseded_patch() {
        let history = VersionHistory::from_tags(["1.0.0", "1.0.1", "1.1.0", "2.0.0"]);
        assert_eq!(history.support_tip(&v(1, 0, 0)), None);
        assert_eq!(
            history.support_tip(&v(1, 0, 1)),
            Some(SupportTip::Minor { a: 1, b: 0, c: 1 })
        );
    }
}
