use amcore::{
    asset::AssetRef,
    branch::BranchListing,
    error::RepoError,
    repo::RepoHandle,
};
use git2::{
    BranchType,
    Commit,
    Delta,
    ErrorCode,
    Repository,
    Tree,
    build::CheckoutBuilder,
};
use std::{
    fmt,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::util::{
    checkout,
    lookup,
    other,
};
use super::GitHandle;

impl fmt::Debug for GitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHandle")
            .field("workdir", &self.workdir)
            .finish()
    }
}

impl GitHandle {
    pub fn open(location: &Path) -> Result<Self, RepoError> {
        let repo = Repository::open(location)
            .map_err(lookup(|| format!("no repository at {location:?}")))?;
        let workdir = repo.workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| RepoError::Other(
                format!("repository at {location:?} has no working tree")
            ))?;
        info!("Opened repository with working tree at {workdir:?}");
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn branch_names(&self, kind: BranchType) -> Result<Vec<String>, RepoError> {
        let mut names = Vec::new();
        for entry in self.repo.branches(Some(kind)).map_err(other)? {
            let (branch, _) = entry.map_err(other)?;
            match branch.name().map_err(other)? {
                // symbolic `origin/HEAD` is not a branch of its own
                Some(name) if kind == BranchType::Remote && name.ends_with("/HEAD") => (),
                Some(name) => names.push(name.to_string()),
                None => warn!("skipping branch with a name that is not valid UTF-8"),
            }
        }
        Ok(names)
    }

    /// The commit `name` points at; for a name only known as a
    /// remote-tracking branch, also the first `<remote>/<name>` carrying it.
    fn checkout_target(
        &self,
        name: &str,
    ) -> Result<(Commit<'_>, Option<String>), RepoError> {
        match self.repo.find_branch(name, BranchType::Local) {
            Ok(branch) => Ok((branch.get().peel_to_commit().map_err(other)?, None)),
            Err(e) if e.code() == ErrorCode::NotFound => {
                let remotes = self.repo.remotes().map_err(other)?;
                for remote in remotes.iter().flatten() {
                    let upstream = format!("{remote}/{name}");
                    match self.repo.find_branch(&upstream, BranchType::Remote) {
                        Ok(branch) => {
                            let commit = branch.get().peel_to_commit().map_err(other)?;
                            return Ok((commit, Some(upstream)));
                        }
                        Err(e) if e.code() == ErrorCode::NotFound => continue,
                        Err(e) => return Err(other(e)),
                    }
                }
                Err(RepoError::NotFound(format!("branch `{name}`")))
            }
            Err(e) => Err(other(e)),
        }
    }

    fn track_remote_branch(
        &self,
        name: &str,
        upstream: &str,
        commit: &Commit<'_>,
    ) -> Result<(), RepoError> {
        let mut branch = self.repo.branch(name, commit, false).map_err(other)?;
        if let Err(e) = branch.set_upstream(Some(upstream)) {
            warn!("created branch `{name}` but could not track `{upstream}`: {e}");
        }
        info!("Created branch `{name}` from remote-tracking `{upstream}`");
        Ok(())
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>, RepoError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree().map_err(other)?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(other(e)),
        }
    }

    /// Check out `target` then point HEAD at `name`.  Should HEAD fail
    /// to move, the working tree is put back to `previous`.
    fn switch_to(
        &self,
        name: &str,
        target: &Tree<'_>,
        previous: Option<&Tree<'_>>,
    ) -> Result<(), RepoError> {
        let mut opts = CheckoutBuilder::new();
        opts.safe();
        self.repo.checkout_tree(target.as_object(), Some(&mut opts))
            .map_err(checkout)?;
        if let Err(e) = self.repo.set_head(&format!("refs/heads/{name}")) {
            if let Some(previous) = previous {
                if let Err(e) = self.restore_tree(previous, target) {
                    error!("could not restore working tree in {:?}: {e}", self.workdir);
                }
            }
            return Err(other(e));
        }
        Ok(())
    }

    /// Undo a safe checkout from `previous` to `target`.  Only paths that
    /// differ between the two trees are written; the safe checkout left
    /// none of those with local changes.
    fn restore_tree(&self, previous: &Tree<'_>, target: &Tree<'_>) -> Result<(), git2::Error> {
        let diff = self.repo.diff_tree_to_tree(Some(previous), Some(target), None)?;
        let mut index = self.repo.index()?;
        let mut opts = CheckoutBuilder::new();
        opts.force().recreate_missing(true);
        let mut restore = false;
        for delta in diff.deltas() {
            match (delta.status(), delta.old_file().path(), delta.new_file().path()) {
                (Delta::Added, _, Some(path)) => {
                    if let Err(e) = fs::remove_file(self.workdir.join(path)) {
                        warn!("could not remove {path:?}: {e}");
                    }
                    index.remove_path(path)?;
                }
                (_, Some(path), _) => {
                    opts.path(path);
                    restore = true;
                }
                _ => (),
            }
        }
        index.write()?;
        if restore {
            self.repo.checkout_tree(previous.as_object(), Some(&mut opts))?;
        }
        Ok(())
    }

    fn discard_branch(&self, name: &str) {
        let deleted = self.repo.find_branch(name, BranchType::Local)
            .and_then(|mut branch| branch.delete());
        match deleted {
            Ok(()) => info!("Discarded branch `{name}` after failed checkout"),
            Err(e) => error!("could not discard branch `{name}`: {e}"),
        }
    }
}

impl RepoHandle for GitHandle {
    fn current_branch(&self) -> Result<String, RepoError> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => head.shorthand()
                .map(str::to_string)
                .ok_or_else(|| RepoError::Other(
                    "current branch name is not valid UTF-8".to_string()
                )),
            Ok(_) => Err(RepoError::Other("HEAD is detached".to_string())),
            // a freshly initialized repository has no commits yet
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD").map_err(other)?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
                    .ok_or_else(|| RepoError::Other(
                        "HEAD does not point at a branch".to_string()
                    ))
            }
            Err(e) => Err(other(e)),
        }
    }

    fn list_branches(&self) -> Result<BranchListing, RepoError> {
        Ok(BranchListing::new(
            self.branch_names(BranchType::Local)?,
            self.branch_names(BranchType::Remote)?,
        ))
    }

    fn create_branch(&self, name: &str) -> Result<(), RepoError> {
        if !git2::Reference::is_valid_name(&format!("refs/heads/{name}")) {
            return Err(RepoError::Other(format!("invalid branch name `{name}`")));
        }
        let commit = self.repo.head()
            .and_then(|head| head.peel_to_commit())
            .map_err(other)?;
        self.repo.branch(name, &commit, false)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => RepoError::AlreadyExists(format!("branch `{name}`")),
                _ => other(e),
            })?;
        info!("Created branch `{name}` at {}", commit.id());
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<(), RepoError> {
        let (commit, upstream) = self.checkout_target(name)?;
        let target = commit.tree().map_err(other)?;
        // conflicts with local changes surface here, before anything is written
        self.repo.checkout_tree(target.as_object(), Some(CheckoutBuilder::new().dry_run()))
            .map_err(checkout)?;
        let previous = self.head_tree()?;
        if let Some(upstream) = &upstream {
            self.track_remote_branch(name, upstream, &commit)?;
        }
        if let Err(e) = self.switch_to(name, &target, previous.as_ref()) {
            if upstream.is_some() {
                self.discard_branch(name);
            }
            return Err(e);
        }
        info!("Checked out branch `{name}` in {:?}", self.workdir);
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<(), RepoError> {
        let mut branch = self.repo.find_branch(name, BranchType::Local)
            .map_err(lookup(|| format!("branch `{name}`")))?;
        branch.delete().map_err(other)?;
        info!("Deleted branch `{name}`");
        Ok(())
    }

    fn resolve_asset_path(&self, asset: &AssetRef) -> Result<PathBuf, RepoError> {
        let path = self.workdir.join(asset.relative_path());
        if path.is_file() {
            Ok(path)
        }
        else {
            Err(RepoError::NotFound(format!("`{asset}` has no file at {path:?}")))
        }
    }

    fn reset_index(&self) -> Result<(), RepoError> {
        let mut index = self.repo.index().map_err(other)?;
        match self.repo.head() {
            Ok(head) => {
                let tree = head.peel_to_tree().map_err(other)?;
                index.read_tree(&tree).map_err(other)?;
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => index.clear().map_err(other)?,
            Err(e) => return Err(other(e)),
        }
        index.write().map_err(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_am::repo::{
        commit_files,
        create_workspace_repo,
        REMOTE_BRANCHES,
    };

    #[test]
    fn current_and_list() -> anyhow::Result<()> {
        let (td, _) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        assert_eq!(handle.current_branch()?, "good_repo");
        let listing = handle.list_branches()?;
        assert_eq!(listing.local, &["good_repo"]);
        assert_eq!(listing.total_remotes, REMOTE_BRANCHES.len());
        assert!(listing.remote.iter().all(|name| name.starts_with("origin/")));
        Ok(())
    }

    #[test]
    fn unborn_head() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("fresh");
        Repository::init_opts(td.path(), &opts)?;
        let handle = GitHandle::open(td.path())?;
        assert_eq!(handle.current_branch()?, "fresh");
        handle.reset_index()?;
        // nothing to branch from yet
        assert!(matches!(handle.create_branch("other"), Err(RepoError::Other(_))));
        Ok(())
    }

    #[test]
    fn bare_is_not_a_workspace() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        Repository::init_bare(td.path())?;
        assert!(matches!(GitHandle::open(td.path()), Err(RepoError::Other(_))));
        Ok(())
    }

    #[test]
    fn create_checkout_delete() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        handle.create_branch("feature")?;
        assert_eq!(
            handle.create_branch("feature"),
            Err(RepoError::AlreadyExists("branch `feature`".into())),
        );
        assert!(matches!(handle.create_branch("bad..name"), Err(RepoError::Other(_))));

        handle.checkout_branch("feature")?;
        assert_eq!(handle.current_branch()?, "feature");
        commit_files(&repo, "feature work", &[("assets/new.png", "new")])?;

        handle.checkout_branch("good_repo")?;
        assert_eq!(handle.current_branch()?, "good_repo");
        // checkout updated the working tree
        assert!(!td.path().join("assets/new.png").exists());

        assert!(handle.list_branches()?.has_local("feature"));
        handle.delete_branch("feature")?;
        assert!(!handle.list_branches()?.has_local("feature"));
        assert!(matches!(handle.delete_branch("feature"), Err(RepoError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn checkout_unknown() -> anyhow::Result<()> {
        let (td, _) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        assert_eq!(
            handle.checkout_branch("unknown"),
            Err(RepoError::NotFound("branch `unknown`".into())),
        );
        assert_eq!(handle.current_branch()?, "good_repo");
        Ok(())
    }

    #[test]
    fn checkout_remote_tracking() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        assert!(!handle.list_branches()?.has_local("develop"));
        handle.checkout_branch("develop")?;
        assert_eq!(handle.current_branch()?, "develop");
        assert!(handle.list_branches()?.has_local("develop"));
        let branch = repo.find_branch("develop", BranchType::Local)?;
        assert_eq!(branch.upstream()?.name()?, Some("origin/develop"));
        Ok(())
    }

    #[test]
    fn checkout_dirty_tree() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        handle.create_branch("feature")?;
        handle.checkout_branch("feature")?;
        commit_files(&repo, "diverge", &[("README", "changed on feature\n")])?;
        fs::write(td.path().join("README"), "local edit\n")?;
        assert!(matches!(
            handle.checkout_branch("good_repo"),
            Err(RepoError::DirtyTree(_)),
        ));
        assert_eq!(handle.current_branch()?, "feature");
        Ok(())
    }

    #[test]
    fn checkout_remote_dirty_tree_creates_nothing() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        commit_files(&repo, "diverge", &[("README", "good_repo readme\n")])?;
        fs::write(td.path().join("README"), "local edit\n")?;
        assert!(matches!(
            handle.checkout_branch("develop"),
            Err(RepoError::DirtyTree(_)),
        ));
        assert_eq!(handle.current_branch()?, "good_repo");
        assert!(!handle.list_branches()?.has_local("develop"));
        assert_eq!(fs::read_to_string(td.path().join("README"))?, "local edit\n");
        Ok(())
    }

    #[test]
    fn checkout_head_locked_restores_tree() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        handle.create_branch("feature")?;
        handle.checkout_branch("feature")?;
        commit_files(&repo, "feature work", &[
            ("assets/feature.png", "feature"),
            ("README", "feature readme\n"),
        ])?;
        fs::write(td.path().join("resources/readme.txt"), "local edit")?;

        let lock = repo.path().join("HEAD.lock");
        fs::write(&lock, "")?;
        assert!(matches!(
            handle.checkout_branch("good_repo"),
            Err(RepoError::Other(_)),
        ));
        fs::remove_file(&lock)?;
        assert_eq!(handle.current_branch()?, "feature");
        assert_eq!(fs::read_to_string(td.path().join("assets/feature.png"))?, "feature");
        assert_eq!(fs::read_to_string(td.path().join("README"))?, "feature readme\n");
        assert_eq!(fs::read_to_string(td.path().join("resources/readme.txt"))?, "local edit");

        handle.checkout_branch("good_repo")?;
        assert!(!td.path().join("assets/feature.png").exists());
        assert_eq!(fs::read_to_string(td.path().join("resources/readme.txt"))?, "local edit");
        Ok(())
    }

    #[test]
    fn checkout_remote_head_locked_discards_branch() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        handle.create_branch("scratch")?;
        handle.checkout_branch("scratch")?;
        let oid = commit_files(&repo, "develop work", &[("assets/develop.png", "develop")])?;
        repo.reference("refs/remotes/origin/develop", oid, true, "advance remote")?;
        handle.checkout_branch("good_repo")?;
        handle.delete_branch("scratch")?;

        let lock = repo.path().join("HEAD.lock");
        fs::write(&lock, "")?;
        assert!(matches!(
            handle.checkout_branch("develop"),
            Err(RepoError::Other(_)),
        ));
        fs::remove_file(&lock)?;
        assert_eq!(handle.current_branch()?, "good_repo");
        assert!(!handle.list_branches()?.has_local("develop"));
        assert!(!td.path().join("assets/develop.png").exists());

        handle.checkout_branch("develop")?;
        assert!(td.path().join("assets/develop.png").is_file());
        Ok(())
    }

    #[test]
    fn checkout_takes_short_name() -> anyhow::Result<()> {
        let (td, _) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        assert!(handle.list_branches()?.remote.iter().any(|name| name == "origin/develop"));
        assert!(matches!(
            handle.checkout_branch("origin/develop"),
            Err(RepoError::NotFound(_)),
        ));
        assert!(!handle.list_branches()?.has_local("develop"));
        Ok(())
    }

    #[test]
    fn resolve_asset() -> anyhow::Result<()> {
        let (td, _) = create_workspace_repo("good_repo")?;
        let handle = GitHandle::open(td.path())?;
        let asset: AssetRef = "assets/foo.png".parse()?;
        assert_eq!(
            handle.resolve_asset_path(&asset)?,
            td.path().join("assets").join("foo.png"),
        );
        let resource: AssetRef = "resources/readme.txt".parse()?;
        assert!(handle.resolve_asset_path(&resource)?.is_file());
        let missing: AssetRef = "assets/missing.png".parse()?;
        assert!(matches!(
            handle.resolve_asset_path(&missing),
            Err(RepoError::NotFound(_)),
        ));
        // directories are not assets
        let dir: AssetRef = "assets/levels".parse()?;
        assert!(matches!(
            handle.resolve_asset_path(&dir),
            Err(RepoError::NotFound(_)),
        ));
        Ok(())
    }

    #[test]
    fn reset_index_unstages() -> anyhow::Result<()> {
        let (td, repo) = create_workspace_repo("good_repo")?;
        fs::write(td.path().join("assets/foo.png"), "modified")?;
        let mut index = repo.index()?;
        index.add_path(Path::new("assets/foo.png"))?;
        index.write()?;
        let staged = |repo: &Repository| -> anyhow::Result<usize> {
            let head = repo.head()?.peel_to_tree()?;
            let mut index = repo.index()?;
            index.read(true)?;
            Ok(repo.diff_tree_to_index(Some(&head), Some(&index), None)?.deltas().len())
        };
        assert_eq!(staged(&repo)?, 1);

        let handle = GitHandle::open(td.path())?;
        handle.reset_index()?;
        assert_eq!(staged(&repo)?, 0);
        // working tree is left alone
        assert_eq!(fs::read_to_string(td.path().join("assets/foo.png"))?, "modified");
        Ok(())
    }
}
