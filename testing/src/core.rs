use amcore::{
    asset::AssetRef,
    branch::BranchListing,
    error::RepoError,
    repo::{
        RepoBackend,
        RepoHandle,
    },
};
use mockall::mock;
use std::path::{
    Path,
    PathBuf,
};

mock! {
    pub Backend {}

    impl RepoBackend for Backend {
        fn open(&self, location: &Path) -> Result<Box<dyn RepoHandle>, RepoError>;
    }
}

mock! {
    pub Handle {}

    impl RepoHandle for Handle {
        fn current_branch(&self) -> Result<String, RepoError>;
        fn list_branches(&self) -> Result<BranchListing, RepoError>;
        fn create_branch(&self, name: &str) -> Result<(), RepoError>;
        fn checkout_branch(&self, name: &str) -> Result<(), RepoError>;
        fn delete_branch(&self, name: &str) -> Result<(), RepoError>;
        fn resolve_asset_path(&self, asset: &AssetRef) -> Result<PathBuf, RepoError>;
        fn reset_index(&self) -> Result<(), RepoError>;
    }
}

/// A handle currently on `branch`, with every asset resolving under
/// `/workspace`.
pub fn mock_handle_on(branch: &'static str) -> MockHandle {
    let mut handle = MockHandle::new();
    handle.expect_current_branch()
        .times(1)
        .returning(move || Ok(branch.to_string()));
    handle.expect_resolve_asset_path()
        .returning(|asset| Ok(Path::new("/workspace").join(asset.relative_path())));
    handle
}
