use git2::{
    Commit,
    Oid,
    Repository,
    RepositoryInitOptions,
    Signature,
};
use std::{
    fs,
    path::Path,
};
use tempfile::TempDir;

/// Branches present under `refs/remotes/origin/` in every fixture.
pub const REMOTE_BRANCHES: &[&str] = &["good_repo", "develop", "release"];

/// Files committed by the initial commit.
pub const INITIAL_FILES: &[(&str, &str)] = &[
    ("README", "content repository\n"),
    ("assets/foo.png", "not really a png"),
    ("assets/levels/level1.json", "{}"),
    ("resources/readme.txt", "a resource"),
];

pub fn create_workspace_repo(
    branch: &str,
) -> anyhow::Result<(TempDir, Repository)> {
    let tempdir = tempfile::tempdir()?;
    let repo = init_workspace_repo(tempdir.path(), branch)?;
    Ok((tempdir, repo))
}

/// A working-tree repository at `target` on `branch`, with one commit
/// and an `origin` remote carrying [`REMOTE_BRANCHES`].
pub fn init_workspace_repo(
    target: &Path,
    branch: &str,
) -> anyhow::Result<Repository> {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(branch);
    let repo = Repository::init_opts(target, &opts)?;
    let commit_id = commit_files(&repo, "initial commit", INITIAL_FILES)?;
    repo.remote("origin", "https://content.example.com/carol.git")?;
    for name in REMOTE_BRANCHES {
        repo.reference(
            &format!("refs/remotes/origin/{name}"),
            commit_id,
            true,
            "fixture remote branch",
        )?;
    }
    Ok(repo)
}

/// Write `files` into the working tree and commit them onto HEAD.
pub fn commit_files(
    repo: &Repository,
    message: &str,
    files: &[(&str, &str)],
) -> anyhow::Result<Oid> {
    let workdir = repo.workdir()
        .ok_or_else(|| anyhow::anyhow!("fixture repository must not be bare"))?;
    let mut index = repo.index()?;
    index.read(false)?;
    for (name, contents) in files {
        let path = workdir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        index.add_path(Path::new(name))?;
    }
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = Signature::now("user", "user@example.com")?;
    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(_) => None,
    };
    let parents: Vec<&Commit> = parent.iter().collect();
    Ok(repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?)
}

#[test]
fn smoke_test_init_workspace_repo() -> anyhow::Result<()> {
    let (td, repo) = create_workspace_repo("good_repo")?;
    assert_eq!(repo.head()?.shorthand(), Some("good_repo"));
    for (name, contents) in INITIAL_FILES {
        assert_eq!(&fs::read_to_string(td.path().join(name))?, contents);
    }
    let remotes = repo.branches(Some(git2::BranchType::Remote))?.count();
    assert_eq!(remotes, REMOTE_BRANCHES.len());
    Ok(())
}
