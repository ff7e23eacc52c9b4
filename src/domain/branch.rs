use std::fmt;

/// The version prefix a maintenance branch can be cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportTip {
    /// Latest minor release of a major line: `A.B.x`
    Major { a: u32, b: u32 },
    /// Latest patch release of a minor line: `A.B.C.x`
    Minor { a: u32, b: u32, c: u32 },
}

impl SupportTip {
    /// Name of the local branch that maintains this tip
    pub fn branch_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SupportTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportTip::Major { a, b } => write!(f, "{}.{}.x", a, b),
            SupportTip::Minor { a, b, c } => write!(f, "{}.{}.{}.x", a, b, c),
        }
    }
}
