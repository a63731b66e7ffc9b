use anyhow::Result;
use trk_core::Repository;

/// Declarative assertions on repository state
pub enum Assertion {
    // History
    CommitCount(usize),
    HeadMessage(String),
    HeadFileCount(usize),
    HeadContainsFile { path: String },
    RootHasNoParent,
    ParentsLinked,
    HistoryOrder(Vec<String>),
    ChainIntact,
    ChainHasIssues,

    // Staging
    StagingEmpty,
    StagingLen(usize),
    StagedPath { path: String },
    StagedPaths(Vec<String>),
    StagedHashMatchesFile { path: String },

    // Last stage call
    LastStageCount(usize),
    LastStageWarned { path: String },

    // Storage
    NoLeftoverFiles,

    // Custom (takes mutable reference to allow mutations)
    Custom(Box<dyn Fn(&mut Repository) -> Result<()> + Send + Sync>),
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommitCount(n) => write!(f, "CommitCount({})", n),
            Self::HeadMessage(s) => write!(f, "HeadMessage({:?})", s),
            Self::HeadFileCount(n) => write!(f, "HeadFileCount({})", n),
            Self::HeadContainsFile { path } => {
                write!(f, "HeadContainsFile {{ path: {:?} }}", path)
            }
            Self::RootHasNoParent => write!(f, "RootHasNoParent"),
            Self::ParentsLinked => write!(f, "ParentsLinked"),
            Self::HistoryOrder(messages) => write!(f, "HistoryOrder({:?})", messages),
            Self::ChainIntact => write!(f, "ChainIntact"),
            Self::ChainHasIssues => write!(f, "ChainHasIssues"),
            Self::StagingEmpty => write!(f, "StagingEmpty"),
            Self::StagingLen(n) => write!(f, "StagingLen({})", n),
            Self::StagedPath { path } => write!(f, "StagedPath {{ path: {:?} }}", path),
            Self::StagedPaths(paths) => write!(f, "StagedPaths({:?})", paths),
            Self::StagedHashMatchesFile { path } => {
                write!(f, "StagedHashMatchesFile {{ path: {:?} }}", path)
            }
            Self::LastStageCount(n) => write!(f, "LastStageCount({})", n),
            Self::LastStageWarned { path } => write!(f, "LastStageWarned {{ path: {:?} }}", path),
            Self::NoLeftoverFiles => write!(f, "NoLeftoverFiles"),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
