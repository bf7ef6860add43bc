//! RFC 6901 helpers. The root pointer is the empty string.

pub(crate) fn escape_token(raw: &str) -> String {
    raw.replace('~', "~0").replace('/', "~1")
}

pub(crate) fn join(parent: &str, token: &str) -> String {
    format!("{parent}/{}", escape_token(token))
}

/// Splits a pointer into its parent and final token.
pub(crate) fn split_last(pointer: &str) -> Option<(&str, &str)> {
    pointer.rsplit_once('/')
}
