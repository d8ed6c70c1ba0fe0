use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
};

use crate::{
    error::ValueError,
    util::{
        percent_decode,
        trim_trailing_slashes,
    },
};
use super::WorkspaceIdentifier;

const FILE_SCHEME: &str = "file://";

impl WorkspaceIdentifier {
    /// Decode one layer of percent-encoding then normalize.
    pub fn decode(encoded: &str) -> Result<Self, ValueError> {
        let decoded = percent_decode(encoded)
            .map_err(|_| ValueError::InvalidIdentifier {
                value: encoded.to_string(),
                reason: "does not decode to valid UTF-8",
            })?;
        decoded.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The local file system location this identifier points at.
    pub fn location(&self) -> PathBuf {
        match self.0.strip_prefix(FILE_SCHEME) {
            Some(path) => {
                // `file:///C:/work` carries a drive letter after the slash
                let bytes = path.as_bytes();
                if bytes.len() >= 3
                    && bytes[0] == b'/'
                    && bytes[1].is_ascii_alphabetic()
                    && bytes[2] == b':'
                {
                    PathBuf::from(&path[1..])
                }
                else {
                    PathBuf::from(path)
                }
            }
            None => PathBuf::from(&self.0),
        }
    }
}

impl FromStr for WorkspaceIdentifier {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ValueError::InvalidIdentifier {
            value: s.to_string(),
            reason,
        };
        if s.is_empty() {
            return Err(invalid("empty identifier"));
        }
        if s.chars().any(char::is_control) {
            return Err(invalid("contains control characters"));
        }
        let value = s.replace('\\', "/");
        let normalized = match value.split_once("://") {
            Some((scheme, rest)) => {
                if !scheme.eq_ignore_ascii_case("file") {
                    return Err(invalid("only file URIs are supported"));
                }
                let (host, path) = match rest.find('/') {
                    Some(idx) => rest.split_at(idx),
                    None => return Err(invalid("file URI without a path")),
                };
                if !(host.is_empty() || host.eq_ignore_ascii_case("localhost")) {
                    return Err(invalid("file URI names a remote host"));
                }
                format!("{FILE_SCHEME}{}", trim_trailing_slashes(path.to_string()))
            }
            None => trim_trailing_slashes(value),
        };
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for WorkspaceIdentifier {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WorkspaceIdentifier> for String {
    fn from(value: WorkspaceIdentifier) -> Self {
        value.0
    }
}

impl AsRef<str> for WorkspaceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn decode_file_uri() -> anyhow::Result<()> {
        let id = WorkspaceIdentifier::decode("file%3A%2F%2F%2Ftmp%2Fcarol%2F")?;
        assert_eq!(id.as_str(), "file:///tmp/carol");
        assert_eq!(id.location(), Path::new("/tmp/carol"));
        Ok(())
    }

    #[test]
    fn same_location_same_key() -> anyhow::Result<()> {
        let a: WorkspaceIdentifier = "file:///tmp/carol".parse()?;
        let b: WorkspaceIdentifier = "file://localhost/tmp/carol/".parse()?;
        let c = WorkspaceIdentifier::decode("file:%2F%2F%2Ftmp%2Fcarol")?;
        assert_eq!(a, b);
        assert_eq!(a, c);
        let d: WorkspaceIdentifier = "file:///tmp/carol2".parse()?;
        assert_ne!(a, d);
        Ok(())
    }

    #[test]
    fn plain_path() -> anyhow::Result<()> {
        let id: WorkspaceIdentifier = "/srv/work/".parse()?;
        assert_eq!(id.as_str(), "/srv/work");
        assert_eq!(id.location(), Path::new("/srv/work"));
        let root: WorkspaceIdentifier = "/".parse()?;
        assert_eq!(root.location(), Path::new("/"));
        Ok(())
    }

    #[test]
    fn windows_style() -> anyhow::Result<()> {
        let id: WorkspaceIdentifier = "file:///C:\\work\\carol".parse()?;
        assert_eq!(id.as_str(), "file:///C:/work/carol");
        assert_eq!(id.location(), Path::new("C:/work/carol"));
        Ok(())
    }

    #[test]
    fn rejected() {
        for value in [
            "",
            "http://example.com/repo",
            "file://example.com/repo",
            "file://",
            "/tmp/\u{0}evil",
        ] {
            assert!(matches!(
                value.parse::<WorkspaceIdentifier>(),
                Err(ValueError::InvalidIdentifier { .. }),
            ), "{value:?} should be rejected");
        }
        assert!(WorkspaceIdentifier::decode("%FF%FE").is_err());
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let id: WorkspaceIdentifier = serde_json::from_str(r#""file:///tmp/x/""#)?;
        assert_eq!(serde_json::to_string(&id)?, r#""file:///tmp/x""#);
        assert!(serde_json::from_str::<WorkspaceIdentifier>(r#""""#).is_err());
        Ok(())
    }
}
