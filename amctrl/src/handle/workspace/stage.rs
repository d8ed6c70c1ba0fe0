use amcore::asset::AssetRef;

use crate::{
    error::CtrlError,
    reply::Confirmation,
};
use super::WorkspaceCtrl;

impl WorkspaceCtrl {
    /// Snapshot of the staged references in insertion order.
    pub fn get_stage(&self) -> Vec<AssetRef> {
        self.state.lock().stage.items().to_vec()
    }

    /// Unstage everything, in the repository index too.
    pub fn empty_stage(&self) -> Result<Confirmation, CtrlError> {
        let mut state = self.state.lock();
        state.repo.reset_index()?;
        state.stage.clear();
        log::debug!("emptied stage of {}", self.identifier);
        Ok(Confirmation::Ok)
    }

    /// Stage a percent-encoded `assets/...` or `resources/...`
    /// reference; staging it again is a no-op.
    pub fn add_asset_to_stage(&self, reference: &str) -> Result<Confirmation, CtrlError> {
        let asset = AssetRef::decode(reference)?;
        let mut state = self.state.lock();
        if state.stage.contains(&asset) {
            return Ok(Confirmation::Ok);
        }
        let path = state.repo.resolve_asset_path(&asset)?;
        log::debug!("staging {asset} ({path:?}) in {}", self.identifier);
        state.stage.insert(asset);
        Ok(Confirmation::Ok)
    }

    /// Unstage a percent-encoded reference; absent references are
    /// ignored.
    pub fn remove_asset_from_stage(&self, reference: &str) -> Result<Confirmation, CtrlError> {
        let asset = AssetRef::decode(reference)?;
        if self.state.lock().stage.remove(&asset) {
            log::debug!("unstaged {asset} in {}", self.identifier);
        }
        Ok(Confirmation::Ok)
    }
}
