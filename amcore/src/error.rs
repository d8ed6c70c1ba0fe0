use thiserror::Error;

/// Failures reported by a repository adapter.
///
/// Adapters only need to distinguish the few conditions that callers
/// act upon; everything else is carried as `Other` with the message of
/// the underlying engine.
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
pub enum RepoError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// Local changes in the working tree conflict with the operation.
    #[error("working tree has conflicting changes: {0}")]
    DirtyTree(String),
    #[error("repository error: {0}")]
    Other(String),
}

#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid workspace identifier `{value}`: {reason}")]
    InvalidIdentifier {
        value: String,
        reason: &'static str,
    },
    #[error("invalid asset reference `{value}`: {reason}")]
    InvalidReference {
        value: String,
        reason: &'static str,
    },
}
