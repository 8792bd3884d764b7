//! HTML parser for extracting links
//!
//! This module handles parsing HTML content to extract:
//! - Raw anchor targets, exactly as written, for the checks
//! - Absolute page links for crawl discovery

use crate::url::{is_followable, is_web_url, resolve_href};
use scraper::{Html, Selector};
use url::Url;

/// Extracts every `href` value of `<a>` elements in document order
///
/// Values are returned untouched; filtering and resolution are up to the
/// caller. Malformed markup is parsed leniently and at worst yields no links.
///
/// # Example
///
/// ```
/// use awacs::crawler::extract_hrefs;
///
/// let html = r##"<a href="/page">Page</a><a name="x">No href</a><a href="#top">Top</a>"##;
/// assert_eq!(extract_hrefs(html), vec!["/page", "#top"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Extracts the pages a document links to, for crawl discovery
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` targets resolved against `base_url`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `tel:`, `mailto:` and fragment-only links
/// - `javascript:` and `data:` links
/// - Invalid URLs and non-HTTP(S) URLs after resolution
///
/// Fragments are removed from the returned URLs.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_page_link(href, base_url) {
                links.push(url);
            }
        }
    }

    links
}

fn resolve_page_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || !is_followable(href) {
        return None;
    }

    let mut url = resolve_href(base_url, href)?;
    if !is_web_url(&url) {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}
