use crate::error::{Result, TdverError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// One of the four positions of a TDVer version, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    A,
    B,
    C,
    D,
}

impl Part {
    /// All parts in precedence order
    pub const ALL: [Part; 4] = [Part::A, Part::B, Part::C, Part::D];

    /// Zero-based position within the version tuple
    pub fn index(self) -> usize {
        match self {
            Part::A => 0,
            Part::B => 1,
            Part::C => 2,
            Part::D => 3,
        }
    }

    /// Lowercase name ("a".."d")
    pub fn name(self) -> &'static str {
        match self {
            Part::A => "a",
            Part::B => "b",
            Part::C => "c",
            Part::D => "d",
        }
    }

    /// Uppercase name ("A".."D")
    pub fn label(self) -> &'static str {
        match self {
            Part::A => "A",
            Part::B => "B",
            Part::C => "C",
            Part::D => "D",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// TDVer version identifier `A.B.C-D`.
///
/// Field order matters: the derived `Ord` is lexicographic on (a, b, c, d),
/// which is the ordering every history query relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

// The describe suffix (`<commits>-g<hash>`) is tried before D so its commit
// count is never read as the dev part.
const VERSION_PATTERN: &str = r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-?(?:[0-9]+-g?[0-9a-f]{7,}|([0-9]+)))*$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

impl Version {
    /// Create a new version
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Version { a, b, c, d }
    }

    /// Parse a tag name or describe string, returning `None` when it does
    /// not follow the version grammar.
    ///
    /// Accepts `A.B.C`, `A.B.C-D`, and either form followed by a describe
    /// suffix such as `-3-gabc1234`, which is discarded.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = version_regex().captures(text)?;
        let part = |i: usize| -> Option<u32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        Some(Version {
            a: part(1)?,
            b: part(2)?,
            c: part(3)?,
            d: part(4)?,
        })
    }

    /// Value of a single part
    pub fn get(&self, part: Part) -> u32 {
        match part {
            Part::A => self.a,
            Part::B => self.b,
            Part::C => self.c,
            Part::D => self.d,
        }
    }

    /// Return the version with `part` incremented and every less significant
    /// part reset to zero.
    ///
    /// Fails when `part` is already at its maximum value.
    pub fn increment(&self, part: Part) -> Result<Self> {
        let mut parts = [self.a, self.b, self.c, self.d];
        let pos = part.index();
        parts[pos] = parts[pos].checked_add(1).ok_or_else(|| {
            TdverError::version(format!(
                "version part {} of {} cannot increment past {}",
                part,
                self,
                u32::MAX
            ))
        })?;
        for later in parts.iter_mut().skip(pos + 1) {
            *later = 0;
        }
        Ok(Version::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl FromStr for Version {
    type Err = TdverError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s).ok_or_else(|| {
            TdverError::version(format!(
                "Invalid version format: '{}' - expected A.B.C[-D]",
                s
            ))
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.d > 0 {
            write!(f, "{}.{}.{}-{}", self.a, self.b, self.c, self.d)
        } else {
            write!(f, "{}.{}.{}", self.a, self.b, self.c)
        }
    }
}
