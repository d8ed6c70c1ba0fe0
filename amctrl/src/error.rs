use amcore::{
    error::{
        RepoError,
        ValueError,
    },
    workspace::WorkspaceIdentifier,
};
use http::StatusCode;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CtrlError {
    #[error("{0}")]
    InvalidIdentifier(ValueError),
    #[error("no repository found for workspace `{0}`")]
    NotFound(WorkspaceIdentifier),
    #[error("{0}")]
    InvalidReference(ValueError),
    #[error("branch `{0}` already exists")]
    BranchAlreadyExists(String),
    #[error("branch `{0}` not found")]
    BranchNotFound(String),
    #[error("cannot delete the current branch `{0}`")]
    CannotDeleteCurrentBranch(String),
    #[error("cannot change branch with {0} staged reference(s)")]
    StagingNotEmpty(usize),
    /// The adapter error is kept as the source and logged, but never
    /// rendered.
    #[error("\"Repo manager\" encountered an unexpected failure")]
    RepositoryFailure(#[source] RepoError),
}

impl CtrlError {
    /// Stable code naming the kind of failure.
    pub fn kind(&self) -> &'static str {
        match self {
            CtrlError::InvalidIdentifier(_) => "InvalidIdentifier",
            CtrlError::NotFound(_) => "NotFound",
            CtrlError::InvalidReference(_) => "InvalidReference",
            CtrlError::BranchAlreadyExists(_) => "BranchAlreadyExists",
            CtrlError::BranchNotFound(_) => "BranchNotFound",
            CtrlError::CannotDeleteCurrentBranch(_) => "CannotDeleteCurrentBranch",
            CtrlError::StagingNotEmpty(_) => "StagingNotEmpty",
            CtrlError::RepositoryFailure(_) => "RepositoryFailure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CtrlError::InvalidIdentifier(_)
            | CtrlError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            CtrlError::NotFound(_)
            | CtrlError::BranchNotFound(_) => StatusCode::NOT_FOUND,
            CtrlError::BranchAlreadyExists(_)
            | CtrlError::CannotDeleteCurrentBranch(_)
            | CtrlError::StagingNotEmpty(_) => StatusCode::CONFLICT,
            CtrlError::RepositoryFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValueError> for CtrlError {
    fn from(e: ValueError) -> Self {
        match e {
            ValueError::InvalidIdentifier { .. } => CtrlError::InvalidIdentifier(e),
            _ => CtrlError::InvalidReference(e),
        }
    }
}

impl From<RepoError> for CtrlError {
    fn from(e: RepoError) -> Self {
        log::error!("repository failure: {e}");
        CtrlError::RepositoryFailure(e)
    }
}
