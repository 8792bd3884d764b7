use crate::url::same_host;
use url::Url;

/// Returns true if a URL falls within the crawl scope
///
/// A URL is in scope when it lives on the scope's host and port, and its
/// path is the scope path or lies below it. `https://example.com/news`
/// contains `/news` and `/news/2024/item`, but not `/newsletter`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use awacs::url::is_in_scope;
///
/// let scope = Url::parse("https://example.com/news").unwrap();
/// assert!(is_in_scope(&scope, &Url::parse("https://example.com/news/item").unwrap()));
/// assert!(!is_in_scope(&scope, &Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn is_in_scope(scope: &Url, candidate: &Url) -> bool {
    if !same_host(scope, candidate) {
        return false;
    }

    if scope.port_or_known_default() != candidate.port_or_known_default() {
        return false;
    }

    let base = scope.path().trim_end_matches('/');
    let path = candidate.path();

    base.is_empty() || path == base || path.starts_with(&format!("{}/", base))
}
