use percent_encoding::{
    utf8_percent_encode,
    NON_ALPHANUMERIC,
};
use std::path::Path;

/// The `file://` URI of `path`, percent-encoded the way identifiers
/// arrive from the boundary.
pub fn encoded_file_uri(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let uri = if path.starts_with('/') {
        format!("file://{path}")
    }
    else {
        format!("file:///{path}")
    };
    utf8_percent_encode(&uri, NON_ALPHANUMERIC).to_string()
}

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
