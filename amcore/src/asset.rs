use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Asset,
    Resource,
}

/// A typed reference to content inside a workspace, written as
/// `assets/<path>` or `resources/<path>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetRef {
    kind: AssetKind,
    path: String,
}

mod impls;
