use amcore::{
    repo::RepoHandle,
    stage::Stage,
    workspace::WorkspaceIdentifier,
};
use parking_lot::Mutex;
use std::fmt;

use crate::{
    error::CtrlError,
    policy::SwitchPolicy,
};
use super::{
    WorkspaceCtrl,
    WorkspaceState,
};

impl fmt::Debug for WorkspaceCtrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceCtrl")
            .field("identifier", &self.identifier)
            .field("switch_policy", &self.switch_policy)
            .finish()
    }
}

impl WorkspaceCtrl {
    pub(crate) fn new(
        identifier: WorkspaceIdentifier,
        repo: Box<dyn RepoHandle>,
        switch_policy: SwitchPolicy,
    ) -> Result<Self, CtrlError> {
        let current_branch = repo.current_branch()?;
        Ok(Self {
            identifier,
            switch_policy,
            state: Mutex::new(WorkspaceState {
                repo,
                stage: Stage::new(),
                current_branch,
            }),
        })
    }

    pub fn identifier(&self) -> &WorkspaceIdentifier {
        &self.identifier
    }

    pub fn switch_policy(&self) -> SwitchPolicy {
        self.switch_policy
    }
}
