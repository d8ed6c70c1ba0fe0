use amcore::stage::Stage;
use clap::ValueEnum;

use crate::error::CtrlError;

/// How a branch switch treats references that are still staged.
///
/// Staged references are relative to the checkout they were made
/// against, so they never survive a successful switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SwitchPolicy {
    /// Switch, then clear the stage.
    #[default]
    AutoClear,
    /// Refuse to switch while anything is staged.
    Refuse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    Keep,
    Clear,
}

/// Decide, before any repository change, what happens to `stage` when
/// switching branches.
pub fn reconcile_stage(
    policy: SwitchPolicy,
    stage: &Stage,
) -> Result<StageAction, CtrlError> {
    match policy {
        SwitchPolicy::AutoClear if stage.is_empty() => Ok(StageAction::Keep),
        SwitchPolicy::AutoClear => Ok(StageAction::Clear),
        SwitchPolicy::Refuse if stage.is_empty() => Ok(StageAction::Keep),
        SwitchPolicy::Refuse => Err(CtrlError::StagingNotEmpty(stage.len())),
    }
}
