use serde::{Deserialize, Serialize};

/// The normalized, percent-decoded location string that keys a
/// workspace, e.g. `file:///srv/content/project`.
///
/// Equal identifiers always denote the same workspace; construct via
/// [`WorkspaceIdentifier::decode`] for values received percent-encoded,
/// or through `FromStr` for values that are already decoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceIdentifier(String);

mod impls;
