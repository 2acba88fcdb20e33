use url::Url;

/// Check whether a string is a usable fetch target.
///
/// True iff the string decomposes into a scheme and a non-empty network
/// location (host, optionally with a port). Anything else, including
/// scheme-only strings and `mailto:`-style URLs without a host, is rejected.
/// Never panics on malformed input.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}
