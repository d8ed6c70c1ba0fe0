use amcore::{
    repo::RepoHandle,
    stage::Stage,
    workspace::WorkspaceIdentifier,
};
use parking_lot::Mutex;

use crate::policy::SwitchPolicy;

/// The live handle for one workspace, shared by every caller that
/// resolved the same identifier.
///
/// All operations, reads included, go through the single `state` lock
/// so the stage always refers to the branch that is checked out.
pub struct WorkspaceCtrl {
    pub(crate) identifier: WorkspaceIdentifier,
    pub(crate) switch_policy: SwitchPolicy,
    pub(crate) state: Mutex<WorkspaceState>,
}

pub(crate) struct WorkspaceState {
    pub(crate) repo: Box<dyn RepoHandle>,
    pub(crate) stage: Stage,
    pub(crate) current_branch: String,
}

mod branch;
mod impls;
mod stage;
