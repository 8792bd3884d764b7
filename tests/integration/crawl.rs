//! Full crawl cycle against a mock site

use async_trait::async_trait;
use awacs::checks::{Check, Finding, FindingKind, Page};
use awacs::config::RunArguments;
use awacs::crawler::Coordinator;
use awacs::output::{exit_code, CsvFormatter, Formatter, EXIT_CLEAN, EXIT_FINDINGS};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn arguments(scope: &str) -> Arc<RunArguments> {
    Arc::new(RunArguments::new(
        Url::parse(scope).expect("Failed to parse scope"),
    ))
}

/// Mounts a small site:
///
/// - `/` links to `/a`, `/broken` and an e-mail address
/// - `/a` links back to `/` and to `/broken`
/// - `/broken` answers 404
/// - `/file.pdf` is not HTML
async fn mount_site(server: &MockServer) {
    mount_get(
        server,
        "/",
        html_page(
            r#"<a href="/a">A</a> <a href="/broken">Broken</a>
               <a href="mailto:webmaster@example.com">Mail</a>
               <a href="/file.pdf">PDF</a>"#,
        ),
    )
    .await;
    mount_get(
        server,
        "/a",
        html_page(r#"<a href="/">Home</a> <a href="/broken">Broken</a>"#),
    )
    .await;
    mount_get(
        server,
        "/file.pdf",
        ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
    )
    .await;
    mount_get(server, "/broken", ResponseTemplate::new(404)).await;

    for route in ["/", "/a", "/file.pdf"] {
        Mock::given(method("HEAD"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let mut coordinator =
        Coordinator::new(arguments(&base_url)).expect("Failed to create coordinator");
    let report = coordinator.run().await;

    let urls: Vec<String> = report.pages.iter().map(|p| p.url.to_string()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/broken", base_url),
        ]
    );

    let broken_link = format!("Broken link: {}/broken (HTTP 404)", base_url);
    assert_eq!(report.pages[0].findings, vec![Finding::warning(&broken_link)]);
    assert_eq!(report.pages[1].findings, vec![Finding::warning(&broken_link)]);

    let failure = &report.pages[2].findings;
    assert_eq!(failure.len(), 1);
    assert_eq!(failure[0].kind(), FindingKind::Error);
    assert!(failure[0].message().contains("HTTP 404"));

    assert!(report.finished_at.is_some());
    assert!(!report.truncated);
    assert_eq!(exit_code(&report, false), EXIT_FINDINGS);

    // HEAD /broken was requested once although two pages link to it
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fast_mode_skips_slow_checks() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_get(&mock_server, "/", html_page(r#"<a href="/missing">x</a>"#)).await;

    let mut arguments = RunArguments::new(Url::parse(&base_url).unwrap());
    arguments.fast = true;

    let mut coordinator = Coordinator::new(Arc::new(arguments)).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages[0].findings.is_empty());

    let heads = mock_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.method.to_string() == "HEAD")
        .count();
    assert_eq!(heads, 0);
}

#[tokio::test]
async fn test_crawl_stays_in_scope() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/news",
        html_page(r#"<a href="/news/item">Item</a> <a href="/about">About</a>"#),
    )
    .await;
    mount_get(&mock_server, "/news/item", html_page("No links")).await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("Out of scope"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut arguments = RunArguments::new(Url::parse(&format!("{}/news", base_url)).unwrap());
    arguments.fast = true;

    let mut coordinator = Coordinator::new(Arc::new(arguments)).unwrap();
    let report = coordinator.run().await;

    let paths: Vec<&str> = report.pages.iter().map(|p| p.url.path()).collect();
    assert_eq!(paths, vec!["/news", "/news/item"]);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_page_limit_truncates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/",
        html_page(r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#),
    )
    .await;
    for route in ["/1", "/2", "/3"] {
        mount_get(&mock_server, route, html_page("leaf")).await;
    }

    let mut arguments = RunArguments::new(Url::parse(&base_url).unwrap());
    arguments.fast = true;
    arguments.crawl.max_pages = 2;

    let mut coordinator = Coordinator::new(Arc::new(arguments)).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages.len(), 2);
    assert!(report.truncated);
}

#[tokio::test]
async fn test_unreachable_scope_reports_error() {
    let mut arguments = RunArguments::new(Url::parse("http://127.0.0.1:9/").unwrap());
    arguments.http.connect_timeout_secs = 1;
    arguments.http.timeout_secs = 2;

    let mut coordinator = Coordinator::new(Arc::new(arguments)).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages.len(), 1);
    assert!(report.pages[0].findings[0].is_error());
    assert_eq!(exit_code(&report, true), EXIT_FINDINGS);
}

/// Counts invocations and reports one error per page
struct CountingCheck {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Check for CountingCheck {
    fn new(_arguments: Arc<RunArguments>) -> awacs::Result<Self> {
        Ok(Self {
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }

    async fn check(&self, page: &Page) -> Vec<Finding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        vec![Finding::error(format!("Checked {}", page.url.path()))]
    }
}

#[tokio::test]
async fn test_custom_checks_run_on_every_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(&mock_server, "/", html_page(r#"<a href="/next">next</a>"#)).await;
    mount_get(&mock_server, "/next", html_page("end")).await;

    let arguments = arguments(&base_url);
    let check = CountingCheck::new(Arc::clone(&arguments)).unwrap();
    let calls = Arc::clone(&check.calls);

    let mut coordinator = Coordinator::with_checks(arguments, vec![Box::new(check)]).unwrap();
    let report = coordinator.run().await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(report.pages[1].findings, vec![Finding::error("Checked /next")]);

    let mut out = Vec::new();
    CsvFormatter::new(true).render(&report, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_clean_site_exits_cleanly() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(&mock_server, "/", html_page(r#"<a href="/">self</a>"#)).await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::new(arguments(&base_url)).unwrap();
    let report = coordinator.run().await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(exit_code(&report, false), EXIT_CLEAN);
}
