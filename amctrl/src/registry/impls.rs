use amcore::{
    error::RepoError,
    repo::RepoBackend,
    workspace::WorkspaceIdentifier,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
};

use crate::{
    error::CtrlError,
    handle::WorkspaceCtrl,
    policy::SwitchPolicy,
};
use super::{
    Registry,
    Slot,
};

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("switch_policy", &self.switch_policy)
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

impl Registry {
    pub fn new(
        backend: impl RepoBackend + 'static,
        switch_policy: SwitchPolicy,
    ) -> Self {
        Self::with_backend(Arc::new(backend), switch_policy)
    }

    pub fn with_backend(
        backend: Arc<dyn RepoBackend>,
        switch_policy: SwitchPolicy,
    ) -> Self {
        Self {
            backend,
            switch_policy,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn switch_policy(&self) -> SwitchPolicy {
        self.switch_policy
    }

    /// Resolve a percent-encoded identifier, opening the repository on
    /// first use.
    pub fn find(&self, identifier: &str) -> Result<Arc<WorkspaceCtrl>, CtrlError> {
        self.find_identifier(WorkspaceIdentifier::decode(identifier)?)
    }

    pub fn find_identifier(
        &self,
        identifier: WorkspaceIdentifier,
    ) -> Result<Arc<WorkspaceCtrl>, CtrlError> {
        let slot = self.slots.lock()
            .entry(identifier.clone())
            .or_default()
            .clone();
        let mut entry = slot.lock();
        if let Some(workspace) = entry.as_ref() {
            return Ok(workspace.clone());
        }
        match self.open(&identifier) {
            Ok(workspace) => {
                *entry = Some(workspace.clone());
                Ok(workspace)
            }
            Err(e) => {
                drop(entry);
                self.discard_slot(&identifier, &slot);
                Err(e)
            }
        }
    }

    /// Forget the workspace for `identifier`; returns it if it was open.
    /// Callers that already hold it keep a working handle.
    pub fn evict(&self, identifier: &str) -> Result<Option<Arc<WorkspaceCtrl>>, CtrlError> {
        let identifier = WorkspaceIdentifier::decode(identifier)?;
        let slot = self.slots.lock().remove(&identifier);
        let workspace = slot.and_then(|slot| slot.lock().take());
        if workspace.is_some() {
            log::info!("evicted workspace {identifier}");
        }
        Ok(workspace)
    }

    /// Number of workspaces held, including any still being opened.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    pub fn identifiers(&self) -> Vec<WorkspaceIdentifier> {
        let mut result: Vec<_> = self.slots.lock().keys().cloned().collect();
        result.sort();
        result
    }

    fn open(
        &self,
        identifier: &WorkspaceIdentifier,
    ) -> Result<Arc<WorkspaceCtrl>, CtrlError> {
        let location = identifier.location();
        let repo = self.backend.open(&location)
            .map_err(|e| match e {
                RepoError::NotFound(_) => CtrlError::NotFound(identifier.clone()),
                e => e.into(),
            })?;
        let workspace = WorkspaceCtrl::new(identifier.clone(), repo, self.switch_policy)?;
        log::info!(
            "opened workspace {identifier} at {location:?} on branch `{}`",
            workspace.get_current_branch(),
        );
        Ok(Arc::new(workspace))
    }

    fn discard_slot(&self, identifier: &WorkspaceIdentifier, slot: &Slot) {
        let mut slots = self.slots.lock();
        let unused = slots.get(identifier)
            .map(|current| Arc::ptr_eq(current, slot))
            .unwrap_or(false)
            // a locked slot is being opened again by another caller
            && slot.try_lock().map(|entry| entry.is_none()).unwrap_or(false);
        if unused {
            slots.remove(identifier);
        }
    }
}
