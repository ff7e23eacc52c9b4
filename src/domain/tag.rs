use crate::domain::Version;
use regex::Regex;
use std::sync::OnceLock;

fn describe_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-[0-9]+-g?[0-9a-f]{7,}$").expect("suffix pattern is valid"))
}

/// An annotated release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub message: String,
}

impl Tag {
    /// Release tag for a version: named by its rendered form
    pub fn release(version: &Version) -> Self {
        let name = version.to_string();
        Tag {
            message: format!("Version {} released via TDVer", name),
            name,
        }
    }
}

/// The tag a describe string was derived from.
///
/// `described` is either a tag name or a tag name followed by the
/// `-<commits>-g<hash>` suffix. The tag name is kept as written, so `1.0.0-0`
/// stays distinct from `1.0.0` even though both name the same version. When
/// several tags fit, the longest wins.
pub fn described_tag<'t>(described: &str, tags: &'t [String]) -> Option<&'t str> {
    tags.iter()
        .map(String::as_str)
        .filter(|name| match described.strip_prefix(name) {
            Some("") => true,
            Some(rest) => describe_suffix().is_match(rest),
            None => false,
        })
        .max_by_key(|name| name.len())
}
