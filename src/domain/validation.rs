//! Syntax checks for answers that end up inside Kubernetes object definitions.

const MAX_LABEL_LEN: usize = 63;

/// Whether `value` is a DNS-1123 label (lowercase alphanumerics and `-`, at most 63 chars).
pub fn is_dns_label(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_LABEL_LEN
        && value.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        && !value.starts_with('-')
        && !value.ends_with('-')
}

/// Whether `value` is a host name: dot-separated labels of alphanumerics, `-` and `_`.
///
/// Single-label hosts such as `localhost` and bare IPv4 addresses are accepted.
pub fn is_domain(value: &str) -> bool {
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}
