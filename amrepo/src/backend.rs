use amcore::{
    error::RepoError,
    repo::{
        RepoBackend,
        RepoHandle,
    },
};
use std::path::Path;

use crate::handle::GitHandle;

/// Opens working-tree repositories through libgit2.
#[derive(Clone, Debug, Default)]
pub struct GitBackend;

impl GitBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RepoBackend for GitBackend {
    fn open(&self, location: &Path) -> Result<Box<dyn RepoHandle>, RepoError> {
        Ok(Box::new(GitHandle::open(location)?))
    }
}
