use std::time::Duration;

use super::assertions::Assertion;

/// Why a commit is expected to be refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyStaging,
    EmptyMessage,
}

/// All possible actions in a test scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // Working tree
    WriteFile { path: String, content: Vec<u8> },
    RemoveFile { path: String },

    // Repository operations
    Stage { paths: Vec<String> },
    Commit { message: String },
    CommitRejected { message: String, reason: Rejection },

    // Storage
    OverwriteDocument { content: Vec<u8> },
    Reopen,

    // Time control
    Wait { duration: Duration },

    Assert { assertion: Assertion },
}
