//! Helpers for building request paths.

use crate::error::{Error, Result};

/// Percent-encode a single URL path segment.
///
/// Everything except RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`) is encoded,
/// including `/`, so a caller-supplied name can never add path segments.
#[must_use]
pub fn encode_url(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Encode a caller-supplied name for use as the last path segment.
///
/// URL parsers collapse `.` and `..` even when percent-encoded, which would retarget the
/// request, so those two names are refused.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for `.` and `..`.
pub fn encode_path_segment(segment: &str) -> Result<String> {
    if segment == "." || segment == ".." {
        return Err(Error::InvalidParameter(format!(
            "`{segment}` cannot be used as a path segment"
        )));
    }
    Ok(encode_url(segment))
}
