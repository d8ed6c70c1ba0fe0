use serde::{Deserialize, Serialize};

/// Branch names of a workspace.
///
/// Remote-tracking branches are listed as `<remote>/<name>`, e.g.
/// `origin/develop`; these are checked out by their short name
/// (`develop`), which creates the local branch tracking it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchListing {
    pub local: Vec<String>,
    pub remote: Vec<String>,
    pub total: usize,
    pub total_locals: usize,
    pub total_remotes: usize,
}

impl BranchListing {
    pub fn new(local: Vec<String>, remote: Vec<String>) -> Self {
        let total_locals = local.len();
        let total_remotes = remote.len();
        Self {
            local,
            remote,
            total: total_locals + total_remotes,
            total_locals,
            total_remotes,
        }
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.local.iter().any(|n| n == name)
    }
}
