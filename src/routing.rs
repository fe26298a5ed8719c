//! Path classification for inbound requests.
//!
//! Every request is classified once from its raw path string, first match
//! wins. The short-image rule is positional: a path splitting into exactly
//! five slash-delimited elements (the leading element is empty) is treated as
//! a short-form pull regardless of what the segments contain, so
//! `/v2/redis/manifests/latest` counts even though it is also a legal
//! registry API path.

/// What an inbound request's path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/v2/` - registry API root, answered with a rewritten auth challenge
    Discovery,
    /// `/auth/token` - token relay with scope rewriting
    TokenAuth,
    /// `/` - static help page
    Home,
    /// Five-element path, redirected to the mirror with a `library` segment
    ShortImage,
    /// Everything else, forwarded to the origin registry verbatim
    Proxy,
}

/// Classify a request path. Rules are evaluated in order; first match wins.
pub fn classify(path: &str) -> Route {
    match path {
        "/v2/" => Route::Discovery,
        "/auth/token" => Route::TokenAuth,
        "/" => Route::Home,
        _ if path.split('/').count() == 5 => Route::ShortImage,
        _ => Route::Proxy,
    }
}

/// Rewrite a short-form image path for the mirror by inserting the `library`
/// namespace after the image name: `/v2/<name>/<resource>/<ref>` becomes
/// `/v2/<name>/library/<resource>/<ref>`.
///
/// The caller has already classified the path as [`Route::ShortImage`], so it
/// is known to split into exactly five elements.
pub fn namespaced_mirror_path(path: &str) -> String {
    let mut parts: Vec<&str> = path.split('/').collect();
    parts.insert(3, "library");
    parts.join("/")
}
