//! Token scope rewriting.
//!
//! Docker clients request bare image names like `redis` without the implicit
//! `library/` namespace. The origin's token endpoint only understands fully
//! namespaced repository names, so single-segment names in the `scope` query
//! parameter get the namespace prepended before the request is relayed.

/// Rewrite a colon-delimited `type:name:actions` scope string.
///
/// If the scope has exactly three parts and the name part carries no
/// namespace, `library/` is prepended to the name. Anything else, including
/// malformed scopes, passes through unchanged.
pub fn rewrite_scope(scope: &str) -> String {
    let parts: Vec<&str> = scope.split(':').collect();
    if parts.len() == 3 && !parts[1].contains('/') {
        format!("{}:library/{}:{}", parts[0], parts[1], parts[2])
    } else {
        scope.to_string()
    }
}
