use amcore::{
    repo::RepoBackend,
    workspace::WorkspaceIdentifier,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::Arc,
};

use crate::{
    handle::WorkspaceCtrl,
    policy::SwitchPolicy,
};

/// Holds a workspace while it is being opened; the slot lock is what
/// serializes construction for one identifier.
type Slot = Arc<Mutex<Option<Arc<WorkspaceCtrl>>>>;

/// Resolves workspace identifiers to the one shared [`WorkspaceCtrl`]
/// for each location.
///
/// The map lock is only held to look up or insert slots, never while a
/// repository is being opened, so a slow open only delays callers of
/// that same identifier.
pub struct Registry {
    backend: Arc<dyn RepoBackend>,
    switch_policy: SwitchPolicy,
    slots: Mutex<HashMap<WorkspaceIdentifier, Slot>>,
}

mod builder;
mod impls;

pub use builder::Builder;
