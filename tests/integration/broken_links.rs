//! Broken link check against mock servers

use awacs::checks::{BrokenLinkCheck, Check, Finding, FindingKind, Page};
use awacs::config::RunArguments;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Basic` header value for user "user" with password "secret"
const BASIC_USER_SECRET: &str = "Basic dXNlcjpzZWNyZXQ=";

fn arguments(scope: &str) -> RunArguments {
    RunArguments::new(Url::parse(scope).expect("Failed to parse scope"))
}

fn build_check(arguments: RunArguments) -> BrokenLinkCheck {
    BrokenLinkCheck::new(Arc::new(arguments)).expect("Failed to build check")
}

fn page(url: &str, html: &str) -> Page {
    Page::new(Url::parse(url).expect("Failed to parse page URL"), html)
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn messages(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|finding| finding.message()).collect()
}

#[tokio::test]
async fn test_end_to_end_single_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_status(&mock_server, "/ok", 200).await;
    mount_status(&mock_server, "/broken", 404).await;

    let check = build_check(arguments(&base_url));
    let html = r##"
        <html><body>
            <a href="/ok">Fine</a>
            <a href="/broken">Gone</a>
            <a href="#top">Top</a>
            <a href="mailto:x@y.com">Mail</a>
        </body></html>
    "##;

    let findings = check.check(&page(&base_url, html)).await;

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind(), FindingKind::Warning);
    assert_eq!(
        findings[0].message(),
        format!("Broken link: {}/broken (HTTP 404)", base_url)
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_unfollowable_links_issue_no_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let check = build_check(arguments(&base_url));
    let html = r##"
        <a href="tel:+31201234567">Call</a>
        <a href="mailto:info@example.com">Mail</a>
        <a href="#content">Skip</a>
    "##;

    let findings = check.check(&page(&base_url, html)).await;

    assert!(findings.is_empty());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_relative_href_resolves_against_scope() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let check = build_check(arguments(&format!("{}/news", base_url)));
    let findings = check
        .check(&page(
            &format!("{}/news/item", base_url),
            r#"<a href="/about">About</a>"#,
        ))
        .await;

    assert!(findings.is_empty());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_status_cached_across_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let check = build_check(arguments(&base_url));
    let html = r#"<a href="/shared">Shared</a>"#;

    let first = check.check(&page(&format!("{}/one", base_url), html)).await;
    let second = check.check(&page(&format!("{}/two", base_url), html)).await;

    let expected = format!("Broken link: {}/shared (HTTP 500)", base_url);
    assert_eq!(messages(&first), vec![expected.as_str()]);
    assert_eq!(messages(&second), vec![expected.as_str()]);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_duplicate_links_on_one_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/twice"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&mock_server)
        .await;

    let check = build_check(arguments(&base_url));
    let html = r#"<a href="/twice">1</a><a href="/twice">2</a>"#;
    let findings = check.check(&page(&base_url, html)).await;

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0], findings[1]);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_status_ranges() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let statuses: [u16; 9] = [200, 204, 301, 302, 304, 400, 403, 500, 503];
    for status in statuses {
        mount_status(&mock_server, &format!("/s{}", status), status).await;
    }

    let html: String = statuses
        .iter()
        .map(|status| format!(r#"<a href="/s{}">{}</a>"#, status, status))
        .collect();

    let check = build_check(arguments(&base_url));
    let findings = check.check(&page(&base_url, &html)).await;

    let expected: Vec<String> = [400, 403, 500, 503]
        .iter()
        .map(|status| format!("Broken link: {}/s{} (HTTP {})", base_url, status, status))
        .collect();
    assert_eq!(messages(&findings), expected);
}

#[tokio::test]
async fn test_findings_keep_source_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for route in ["/c", "/a", "/b"] {
        mount_status(&mock_server, route, 404).await;
    }

    let mut arguments = arguments(&base_url);
    arguments.http.max_concurrent_requests = 3;
    let check = build_check(arguments);

    let html = r#"<a href="/c">c</a><a href="/a">a</a><a href="/b">b</a>"#;
    let findings = check.check(&page(&base_url, html)).await;

    let expected: Vec<String> = ["/c", "/a", "/b"]
        .iter()
        .map(|route| format!("Broken link: {}{} (HTTP 404)", base_url, route))
        .collect();
    assert_eq!(messages(&findings), expected);
}

#[tokio::test]
async fn test_unreachable_link_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut arguments = arguments(&base_url);
    arguments.http.timeout_secs = 2;
    arguments.http.connect_timeout_secs = 1;
    let check = build_check(arguments);

    let html = r#"<a href="http://127.0.0.1:9/gone">Gone</a>"#;
    let findings = check.check(&page(&base_url, html)).await;

    assert_eq!(
        messages(&findings),
        vec!["Broken link: http://127.0.0.1:9/gone (HTTP 0)"]
    );
}

#[tokio::test]
async fn test_timed_out_link_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut arguments = arguments(&base_url);
    arguments.http.timeout_secs = 1;
    let check = build_check(arguments);

    let html = r#"<a href="/slow">Slow</a><a href="/slow">Slow again</a>"#;
    let findings = check.check(&page(&base_url, html)).await;

    let expected = format!("Broken link: {}/slow (HTTP 0)", base_url);
    assert_eq!(messages(&findings), vec![expected.as_str(), expected.as_str()]);
}

#[tokio::test]
async fn test_whitespace_padded_unfollowable_links_issue_no_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let check = build_check(arguments(&base_url));
    let html = "<a href=\" mailto:x@y.com\">Mail</a>\
                <a href=\"\ntel:123\">Call</a>\
                <a href=\"  #top\">Top</a>\
                <a href=\"TEL:123\">Call</a>\
                <a href=\"javascript:void(0)\">Menu</a>";

    let findings = check.check(&page(&base_url, html)).await;

    assert!(findings.is_empty());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

/// Responds 200 only when the expected credentials are present, 401 otherwise
async fn mount_auth(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(header("authorization", BASIC_USER_SECRET))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(401))
        .mount(server)
        .await;
}

async fn auth_findings(scope: &str, credentials: bool, target: &str) -> Vec<Finding> {
    let mut arguments = arguments(scope);
    if credentials {
        arguments = arguments.with_credentials("user", "secret");
    }
    let check = build_check(arguments);
    let html = format!(r#"<a href="{}">Target</a>"#, target);
    check.check(&page(scope, &html)).await
}

#[tokio::test]
async fn test_credentials_sent_to_scope_host() {
    let mock_server = MockServer::start().await;
    mount_auth(&mock_server).await;

    let base_url = mock_server.uri();
    let target = format!("{}/private", base_url);

    let findings = auth_findings(&base_url, true, &target).await;
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_credentials_not_sent_to_other_host() {
    let mock_server = MockServer::start().await;
    mount_auth(&mock_server).await;

    let target = format!("{}/private", mock_server.uri());

    let findings = auth_findings("http://scope.invalid/", true, &target).await;
    assert_eq!(
        messages(&findings),
        vec![format!("Broken link: {} (HTTP 401)", target).as_str()]
    );
}

#[tokio::test]
async fn test_no_credentials_for_scope_host() {
    let mock_server = MockServer::start().await;
    mount_auth(&mock_server).await;

    let base_url = mock_server.uri();
    let target = format!("{}/private", base_url);

    let findings = auth_findings(&base_url, false, &target).await;
    assert_eq!(
        messages(&findings),
        vec![format!("Broken link: {} (HTTP 401)", target).as_str()]
    );
}

#[tokio::test]
async fn test_no_credentials_for_other_host() {
    let mock_server = MockServer::start().await;
    mount_auth(&mock_server).await;

    let target = format!("{}/private", mock_server.uri());

    let findings = auth_findings("http://scope.invalid/", false, &target).await;
    assert_eq!(
        messages(&findings),
        vec![format!("Broken link: {} (HTTP 401)", target).as_str()]
    );
}
