//! Analysis engine for classifying repository changes since the last release

pub mod change_analyzer;

pub use change_analyzer::{ChangeAnalyzer, WorkingState};
