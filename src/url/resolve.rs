use url::Url;

/// Prefixes of href values a browser does not follow as a page request
const UNFOLLOWABLE_PREFIXES: &[&str] = &["tel:", "mailto:", "#"];

/// Returns true if a raw href value is a conventionally followable link
///
/// Telephone links, mail links and same-page fragment references are not
/// followable and must never be resolved or requested. Leading whitespace is
/// ignored and schemes match case-insensitively, as in a browser.
///
/// # Examples
///
/// ```
/// use awacs::url::is_followable;
///
/// assert!(is_followable("/about"));
/// assert!(!is_followable("mailto:x@y.com"));
/// assert!(!is_followable(" MAILTO:x@y.com"));
/// assert!(!is_followable("#top"));
/// ```
pub fn is_followable(href: &str) -> bool {
    let href = href.trim_start();
    !UNFOLLOWABLE_PREFIXES.iter().any(|prefix| {
        href.get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Returns true if a resolved URL can be requested over HTTP
///
/// `javascript:`, `data:` and other non-web targets resolve to absolute URLs
/// but are never requested.
pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolves an href against a base URL using standard URI-join semantics
///
/// Returns None for hrefs that cannot be resolved; callers skip those links.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use awacs::url::resolve_href;
///
/// let scope = Url::parse("https://example.com/news").unwrap();
/// let resolved = resolve_href(&scope, "/about").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/about");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    match base.join(href.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping unresolvable href {:?}: {}", href, e);
            None
        }
    }
}
