use std::path::{
    Path,
    PathBuf,
};

use crate::{
    asset::AssetRef,
    branch::BranchListing,
    error::RepoError,
};

/// Opens repositories; one instance is shared by every workspace.
pub trait RepoBackend: Send + Sync {
    /// Fails with [`RepoError::NotFound`] if there is no repository at
    /// `location`.
    fn open(&self, location: &Path) -> Result<Box<dyn RepoHandle>, RepoError>;
}

/// A single opened repository with a working tree.
///
/// Implementations need not be internally synchronized; callers are
/// expected to serialize access.
pub trait RepoHandle: Send {
    fn current_branch(&self) -> Result<String, RepoError>;

    fn list_branches(&self) -> Result<BranchListing, RepoError>;

    /// Fails with [`RepoError::AlreadyExists`] if `name` is taken.
    fn create_branch(&self, name: &str) -> Result<(), RepoError>;

    /// Check out the local branch `name`, creating it from a
    /// remote-tracking `<remote>/<name>` if there is no local one.
    ///
    /// Fails with [`RepoError::NotFound`] for unknown branches, including
    /// names given with their remote prefix, and [`RepoError::DirtyTree`]
    /// if local changes would be overwritten.  On failure HEAD, the working
    /// tree and the set of local branches are left as they were.
    fn checkout_branch(&self, name: &str) -> Result<(), RepoError>;

    fn delete_branch(&self, name: &str) -> Result<(), RepoError>;

    /// Absolute path of the file behind `asset`; fails with
    /// [`RepoError::NotFound`] if it does not exist.
    fn resolve_asset_path(&self, asset: &AssetRef) -> Result<PathBuf, RepoError>;

    /// Unstage everything at the repository level.
    fn reset_index(&self) -> Result<(), RepoError>;
}
