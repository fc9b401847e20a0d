#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to parse pipeline snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no pipeline snapshot selected; pick an event before resolving state")]
    NoSnapshot,
}
