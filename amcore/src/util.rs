use percent_encoding::percent_decode_str;
use std::str::Utf8Error;

/// Decode a single layer of percent-encoding; malformed escapes are
/// kept verbatim, only invalid UTF-8 in the result is an error.
pub(crate) fn percent_decode(value: &str) -> Result<String, Utf8Error> {
    Ok(percent_decode_str(value).decode_utf8()?.into_owned())
}

pub(crate) fn trim_trailing_slashes(mut value: String) -> String {
    while value.len() > 1 && value.ends_with('/') {
        value.pop();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(percent_decode("file%3A%2F%2F%2Ftmp").unwrap(), "file:///tmp");
        assert_eq!(percent_decode("100%").unwrap(), "100%");
        assert!(percent_decode("%FF").is_err());
    }

    #[test]
    fn trim() {
        assert_eq!(trim_trailing_slashes("/".into()), "/");
        assert_eq!(trim_trailing_slashes("/tmp//".into()), "/tmp");
        assert_eq!(trim_trailing_slashes("tmp".into()), "tmp");
    }
}
