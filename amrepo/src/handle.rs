use std::path::PathBuf;

/// A repository with a working tree, opened through libgit2.
pub struct GitHandle {
    pub(crate) repo: git2::Repository,
    pub(crate) workdir: PathBuf,
}

mod impls;
