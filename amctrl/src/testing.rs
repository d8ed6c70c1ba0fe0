use test_am::core::MockHandle;

use crate::{
    handle::WorkspaceCtrl,
    policy::SwitchPolicy,
};

pub(crate) fn workspace_ctrl(
    handle: MockHandle,
    switch_policy: SwitchPolicy,
) -> WorkspaceCtrl {
    WorkspaceCtrl::new(
        "file:///workspace".parse().expect("valid identifier"),
        Box::new(handle),
        switch_policy,
    ).expect("mock handle reports a current branch")
}
