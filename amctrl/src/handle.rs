mod workspace;

pub use workspace::WorkspaceCtrl;
