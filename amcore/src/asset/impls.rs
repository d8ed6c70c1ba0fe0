use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
};

use crate::{
    error::ValueError,
    util::percent_decode,
};
use super::{
    AssetKind,
    AssetRef,
};

impl AssetKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Asset => "assets",
            AssetKind::Resource => "resources",
        }
    }
}

impl AssetRef {
    /// Decode one layer of percent-encoding then validate.
    pub fn decode(encoded: &str) -> Result<Self, ValueError> {
        let decoded = percent_decode(encoded)
            .map_err(|_| ValueError::InvalidReference {
                value: encoded.to_string(),
                reason: "does not decode to valid UTF-8",
            })?;
        decoded.parse()
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// The path below the kind prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path relative to the root of the working tree.
    pub fn relative_path(&self) -> PathBuf {
        let mut result = PathBuf::from(self.kind.prefix());
        result.extend(self.path.split('/'));
        result
    }
}

impl FromStr for AssetRef {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ValueError::InvalidReference {
            value: s.to_string(),
            reason,
        };
        let value = s.strip_prefix('/').unwrap_or(s);
        let (prefix, path) = value.split_once('/')
            .ok_or_else(|| invalid("expected `assets/<path>` or `resources/<path>`"))?;
        let kind = match prefix {
            "assets" => AssetKind::Asset,
            "resources" => AssetKind::Resource,
            _ => return Err(invalid("expected `assets/<path>` or `resources/<path>`")),
        };
        if path.is_empty() {
            return Err(invalid("missing path"));
        }
        if path.contains('\\') || path.chars().any(char::is_control) {
            return Err(invalid("path contains forbidden characters"));
        }
        if path.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
            return Err(invalid("path contains empty or relative segments"));
        }
        Ok(Self { kind, path: path.to_string() })
    }
}

impl TryFrom<String> for AssetRef {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetRef> for String {
    fn from(value: AssetRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.prefix(), self.path)
    }
}
