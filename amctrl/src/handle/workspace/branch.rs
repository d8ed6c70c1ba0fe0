use amcore::{
    branch::BranchListing,
    error::RepoError,
};

use crate::{
    error::CtrlError,
    policy::{
        reconcile_stage,
        StageAction,
    },
    reply::Confirmation,
};
use super::WorkspaceCtrl;

impl WorkspaceCtrl {
    pub fn get_current_branch(&self) -> String {
        self.state.lock().current_branch.clone()
    }

    pub fn list_branches(&self) -> Result<BranchListing, CtrlError> {
        Ok(self.state.lock().repo.list_branches()?)
    }

    /// Create `name` at the current commit without switching to it.
    pub fn create_branch(&self, name: &str) -> Result<Confirmation, CtrlError> {
        let state = self.state.lock();
        match state.repo.create_branch(name) {
            Ok(()) => Ok(Confirmation::Created),
            Err(RepoError::AlreadyExists(_)) => Err(CtrlError::BranchAlreadyExists(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Check out `name`.  The switch policy is applied before touching
    /// the repository; on failure both the current branch and the stage
    /// are left as they were.  Once the checkout went through the switch
    /// is reported as done, even if the index could not be reset.
    pub fn change_branch(&self, name: &str) -> Result<Confirmation, CtrlError> {
        let mut state = self.state.lock();
        if state.current_branch == name {
            return Ok(Confirmation::Ok);
        }
        let action = reconcile_stage(self.switch_policy, &state.stage)?;
        match state.repo.checkout_branch(name) {
            Ok(()) => (),
            Err(RepoError::NotFound(_)) => return Err(CtrlError::BranchNotFound(name.to_string())),
            Err(e) => return Err(e.into()),
        }
        log::info!(
            "{}: switched branch from `{}` to `{name}`",
            self.identifier,
            state.current_branch,
        );
        state.current_branch = name.to_string();
        if action == StageAction::Clear {
            state.stage.clear();
            if let Err(e) = state.repo.reset_index() {
                log::error!("{}: could not reset index after switching to `{name}`: {e}", self.identifier);
            }
        }
        Ok(Confirmation::Ok)
    }

    pub fn delete_branch(&self, name: &str) -> Result<Confirmation, CtrlError> {
        let state = self.state.lock();
        if state.current_branch == name {
            return Err(CtrlError::CannotDeleteCurrentBranch(name.to_string()));
        }
        match state.repo.delete_branch(name) {
            Ok(()) => Ok(Confirmation::Removed),
            Err(RepoError::NotFound(_)) => Err(CtrlError::BranchNotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
