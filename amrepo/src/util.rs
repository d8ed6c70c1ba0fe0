use amcore::error::RepoError;
use git2::ErrorCode;

/// Anything that isn't specifically handled by the caller.
pub(crate) fn other(e: git2::Error) -> RepoError {
    RepoError::Other(e.message().to_string())
}

/// Lookup failures, where `NotFound` refers to the thing being looked
/// up and not some internal object.
pub(crate) fn lookup(what: impl FnOnce() -> String) -> impl FnOnce(git2::Error) -> RepoError {
    move |e| match e.code() {
        ErrorCode::NotFound => RepoError::NotFound(what()),
        _ => other(e),
    }
}

pub(crate) fn checkout(e: git2::Error) -> RepoError {
    match e.code() {
        ErrorCode::Conflict
        | ErrorCode::MergeConflict
        | ErrorCode::Modified
        | ErrorCode::Uncommitted => RepoError::DirtyTree(e.message().to_string()),
        _ => other(e),
    }
}
