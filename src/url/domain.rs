use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `data:` or `file:` URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use awacs::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs point at the same host
///
/// The comparison ignores case and port. URLs without a host never match,
/// not even each other.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use awacs::url::same_host;
///
/// let scope = Url::parse("https://example.com/news").unwrap();
/// assert!(same_host(&scope, &Url::parse("https://Example.com:8443/about").unwrap()));
/// assert!(!same_host(&scope, &Url::parse("https://cdn.example.com/").unwrap()));
/// ```
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
