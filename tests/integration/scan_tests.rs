//! Integration tests for the scan pipeline
//!
//! These tests use wiremock to serve result pages and the search endpoint,
//! and drive the fetcher, matcher, provider and orchestrator end-to-end.

use async_trait::async_trait;
use searchmaster::config::Config;
use searchmaster::fetch::{build_http_client, fetch_page, FetchError, FetchOutcome};
use searchmaster::filter::FilterOptions;
use searchmaster::matcher::analyze;
use searchmaster::output::{Finding, FindingSet, OutputResult, ResultSink};
use searchmaster::scan::{ScanMode, ScanPlan, Scanner};
use searchmaster::search::{DuckDuckGoProvider, SearchProvider};
use searchmaster::SearchMasterError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider answering from a fixed query -> URLs table
///
/// Queries listed in `failing` return a provider error.
struct ScriptedProvider {
    answers: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            answers: HashMap::new(),
            failing: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn answer(mut self, query: &str, urls: Vec<String>) -> Self {
        self.answers.insert(query.to_string(), urls);
        self
    }

    fn fail(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str, limit: usize) -> searchmaster::Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|q| q == query) {
            return Err(SearchMasterError::Provider {
                query: query.to_string(),
                message: "transient backend failure".to_string(),
            });
        }
        Ok(self
            .answers
            .get(query)
            .map(|urls| urls.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Sink recording every render and save call
#[derive(Default)]
struct RecordingSink {
    rendered: RefCell<Vec<(String, FindingSet)>>,
    saved: RefCell<Vec<(String, FindingSet)>>,
}

impl ResultSink for RecordingSink {
    fn render(&self, title: &str, findings: &FindingSet) {
        self.rendered
            .borrow_mut()
            .push((title.to_string(), findings.clone()));
    }

    fn save(&self, path: &Path, findings: &FindingSet) -> OutputResult<()> {
        searchmaster::output::save_findings(path, findings)?;
        self.saved
            .borrow_mut()
            .push((path.display().to_string(), findings.clone()));
        Ok(())
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn config_with_dorks(dorks: &[&str]) -> Config {
    let mut config = Config::default();
    config.dorks = dorks.iter().map(|d| d.to_string()).collect();
    config.scan.timeout_secs = 5;
    config
}

fn urls(set: &FindingSet) -> Vec<&str> {
    set.iter().map(|f| f.url.as_str()).collect()
}

#[tokio::test]
async fn test_dork_scan_keeps_matching_html_and_skips_non_html() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/dump",
        html("<html><head><title>DB dump</title></head><body>PASSWORD=hunter2</body></html>"),
    )
    .await;
    mount_page(
        &server,
        "/backup.sql",
        ResponseTemplate::new(200).set_body_raw("password", "application/octet-stream"),
    )
    .await;

    let dork = r#"filetype:sql "password""#;
    let provider = ScriptedProvider::new().answer(
        &format!("{} password", dork),
        vec![format!("{}/dump", base), format!("{}/backup.sql", base)],
    );
    let scanner = Scanner::with_provider(config_with_dorks(&[dork]), Box::new(provider)).unwrap();

    let outcome = scanner
        .run_stage(ScanMode::Dork, "password", &CancellationToken::new())
        .await;

    assert!(!outcome.interrupted);
    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(
        outcome.findings.as_slice()[0],
        Finding::new(format!("{}/dump", base), "DB dump")
    );
}

#[tokio::test]
async fn test_provider_failure_skips_only_that_dork() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/a", html("<title>A</title><p>acme</p>")).await;
    mount_page(&server, "/c", html("<title>C</title><p>ACME</p>")).await;

    let provider = ScriptedProvider::new()
        .answer("first acme", vec![format!("{}/a", base)])
        .fail("second acme")
        .answer("third acme", vec![format!("{}/c", base)]);
    let calls = provider.calls.clone();

    let scanner = Scanner::with_provider(
        config_with_dorks(&["first", "second", "third"]),
        Box::new(provider),
    )
    .unwrap();

    let outcome = scanner
        .run_stage(ScanMode::Dork, "acme", &CancellationToken::new())
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        urls(&outcome.findings),
        vec![format!("{}/a", base), format!("{}/c", base)]
    );
}

#[tokio::test]
async fn test_failed_and_non_matching_candidates_are_dropped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/missing", ResponseTemplate::new(404)).await;
    mount_page(&server, "/error", ResponseTemplate::new(500)).await;
    mount_page(&server, "/other", html("<title>Other</title><p>unrelated</p>")).await;
    mount_page(&server, "/hit", html("<p>Acme internal</p>")).await;

    let provider = ScriptedProvider::new().answer(
        "acme",
        vec![
            format!("{}/missing", base),
            format!("{}/error", base),
            format!("{}/other", base),
            "http://127.0.0.1:9/unreachable".to_string(),
            format!("{}/hit", base),
        ],
    );
    let scanner = Scanner::with_provider(Config::default(), Box::new(provider)).unwrap();

    let outcome = scanner
        .run_stage(ScanMode::Normal, "acme", &CancellationToken::new())
        .await;

    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(
        outcome.findings.as_slice()[0],
        Finding::new(format!("{}/hit", base), "No Title")
    );
}

#[tokio::test]
async fn test_refetch_mode_requests_each_page_twice() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("<title>Page</title><p>secret</p>"))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.scan.reuse_page_body = false;
    let provider = ScriptedProvider::new().answer("secret", vec![format!("{}/page", base)]);
    let scanner = Scanner::with_provider(config, Box::new(provider)).unwrap();

    let outcome = scanner
        .run_stage(ScanMode::Normal, "secret", &CancellationToken::new())
        .await;

    assert_eq!(urls(&outcome.findings), vec![format!("{}/page", base)]);
}

#[tokio::test]
async fn test_reuse_mode_requests_each_page_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("<title>Page</title><p>secret</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ScriptedProvider::new().answer("secret", vec![format!("{}/page", base)]);
    let scanner = Scanner::with_provider(Config::default(), Box::new(provider)).unwrap();

    let outcome = scanner
        .run_stage(ScanMode::Normal, "secret", &CancellationToken::new())
        .await;

    assert_eq!(outcome.findings.len(), 1);
}

#[tokio::test]
async fn test_analyze_drops_errors_and_keeps_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/one", html("token")).await;
    mount_page(&server, "/gone", ResponseTemplate::new(410)).await;
    mount_page(&server, "/two", html("TOKEN")).await;
    mount_page(&server, "/three", html("nothing")).await;

    let client = build_http_client(&Config::default().http, Duration::from_secs(5)).unwrap();
    let findings = vec![
        Finding::new(format!("{}/one", base), "1"),
        Finding::new(format!("{}/gone", base), "x"),
        Finding::new(format!("{}/two", base), "2"),
        Finding::new(format!("{}/three", base), "3"),
    ];

    let matched = analyze(&client, findings, "token").await;

    let titles: Vec<_> = matched.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["1", "2"]);
}

#[tokio::test]
async fn test_fetch_page_classification() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/titled", html("<title>  Admin Login </title>")).await;
    mount_page(
        &server,
        "/doc.pdf",
        ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
    )
    .await;
    mount_page(&server, "/forbidden", ResponseTemplate::new(403)).await;

    let client = build_http_client(&Config::default().http, Duration::from_secs(5)).unwrap();

    match fetch_page(&client, &format!("{}/titled", base)).await {
        FetchOutcome::Page(page) => {
            assert_eq!(page.finding.title, "Admin Login");
            assert!(page.body.contains("Admin Login"));
        }
        other => panic!("expected page, got {:?}", other),
    }

    match fetch_page(&client, &format!("{}/doc.pdf", base)).await {
        FetchOutcome::Skipped { content_type } => assert_eq!(content_type, "application/pdf"),
        other => panic!("expected skip, got {:?}", other),
    }

    match fetch_page(&client, &format!("{}/forbidden", base)).await {
        FetchOutcome::Failed(FetchError::HttpStatus(status)) => assert_eq!(status, 403),
        other => panic!("expected HTTP failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_applies_filters_saves_then_renders() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/report.pdf", html("<title>Report</title>acme")).await;
    mount_page(&server, "/about", html("<title>About</title>acme")).await;

    let provider = ScriptedProvider::new().answer(
        "acme",
        vec![format!("{}/about", base), format!("{}/report.pdf", base)],
    );
    let scanner = Scanner::with_provider(Config::default(), Box::new(provider)).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("findings.txt");
    let plan = ScanPlan::new(Some("acme"), false, true, false)
        .unwrap()
        .with_filters(FilterOptions {
            social: false,
            files: true,
        })
        .with_output(Some(out.clone()));
    let sink = RecordingSink::default();

    let report = scanner.run(&plan, &sink, &CancellationToken::new()).await;

    assert!(!report.interrupted);
    assert!(report.findings(ScanMode::Dork).is_none());
    let normal = report.findings(ScanMode::Normal).unwrap();
    assert_eq!(urls(normal), vec![format!("{}/report.pdf", base)]);

    let rendered = sink.rendered.borrow();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].0, "Normal Scan Results:");
    assert_eq!(sink.saved.borrow().len(), 1);

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title: Report".to_string(),
            format!("URL: {}/report.pdf", base),
            "-".repeat(80),
        ]
    );
}

#[tokio::test]
async fn test_run_with_no_filter_match_renders_empty_and_writes_no_file() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/plain", html("acme")).await;

    let provider = ScriptedProvider::new()
        .answer("d1 acme", vec![format!("{}/plain", base)])
        .answer("acme", vec![format!("{}/plain", base)]);
    let scanner =
        Scanner::with_provider(config_with_dorks(&["d1"]), Box::new(provider)).unwrap();

    let plan = ScanPlan::new(Some("acme"), false, false, true)
        .unwrap()
        .with_filters(FilterOptions {
            social: true,
            files: true,
        });
    let sink = RecordingSink::default();

    let report = scanner.run(&plan, &sink, &CancellationToken::new()).await;

    assert!(report.findings(ScanMode::Dork).unwrap().is_empty());
    assert!(report.findings(ScanMode::Normal).unwrap().is_empty());

    let rendered = sink.rendered.borrow();
    let titles: Vec<_> = rendered.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, vec!["Dork Scan Results:", "Normal Scan Results:"]);
    assert!(rendered.iter().all(|(_, set)| set.is_empty()));
    assert!(sink.saved.borrow().is_empty());
}

#[tokio::test]
async fn test_both_stages_overwrite_same_output_file() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/from-dork", html("<title>Dork hit</title>acme")).await;
    mount_page(&server, "/from-normal", html("<title>Normal hit</title>acme")).await;

    let provider = ScriptedProvider::new()
        .answer("d1 acme", vec![format!("{}/from-dork", base)])
        .answer("acme", vec![format!("{}/from-normal", base)]);
    let scanner =
        Scanner::with_provider(config_with_dorks(&["d1"]), Box::new(provider)).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("findings.txt");
    let plan = ScanPlan::new(Some("acme"), true, true, false)
        .unwrap()
        .with_output(Some(out.clone()));
    let sink = RecordingSink::default();

    scanner.run(&plan, &sink, &CancellationToken::new()).await;

    assert_eq!(sink.saved.borrow().len(), 2);
    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("Title: Normal hit"));
    assert!(!content.contains("Dork hit"));
}

#[tokio::test]
async fn test_cancelled_run_returns_partial_report() {
    let provider = ScriptedProvider::new();
    let calls = provider.calls.clone();
    let scanner = Scanner::with_provider(Config::default(), Box::new(provider)).unwrap();

    let plan = ScanPlan::new(Some("acme"), false, false, true).unwrap();
    let sink = RecordingSink::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = scanner.run(&plan, &sink, &cancel).await;

    assert!(report.interrupted);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(report.findings(ScanMode::Dork).unwrap().is_empty());
    assert!(report.findings(ScanMode::Normal).is_none());
    assert!(sink.rendered.borrow().is_empty());

    report.render_partial(&sink);
    let rendered = sink.rendered.borrow();
    let titles: Vec<_> = rendered.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Summary of Dork Results (Collected so far):",
            "Summary of Normal Search Results (Collected so far):",
        ]
    );
}

#[tokio::test]
async fn test_cancel_during_slow_fetch_stops_stage() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/fast", html("acme")).await;
    mount_page(
        &server,
        "/slow",
        html("acme").set_delay(Duration::from_secs(3)),
    )
    .await;

    let provider = ScriptedProvider::new()
        .answer("d1 acme", vec![format!("{}/fast", base)])
        .answer("d2 acme", vec![format!("{}/slow", base)]);
    let scanner =
        Scanner::with_provider(config_with_dorks(&["d1", "d2"]), Box::new(provider)).unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let outcome = scanner.run_stage(ScanMode::Dork, "acme", &cancel).await;

    assert!(outcome.interrupted);
    assert_eq!(urls(&outcome.findings), vec![format!("{}/fast", base)]);
}

#[tokio::test]
async fn test_duckduckgo_provider_against_mock_endpoint() {
    let server = MockServer::start().await;

    let results_page = r#"<html><body>
        <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Facme.example%2Fadmin&amp;rut=1">Admin</a></div>
        <div class="result"><a class="result__a" href="https://acme.example/login">Login</a></div>
        <div class="result"><a class="result__a" href="https://acme.example/third">Third</a></div>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "inurl:admin acme"))
        .respond_with(html(results_page))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client(&Config::default().http, Duration::from_secs(5)).unwrap();
    let provider = DuckDuckGoProvider::new(client, &format!("{}/html/", server.uri())).unwrap();

    let urls = provider.search("inurl:admin acme", 2).await.unwrap();
    assert_eq!(
        urls,
        vec!["https://acme.example/admin", "https://acme.example/login"]
    );
}

#[tokio::test]
async fn test_duckduckgo_provider_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = build_http_client(&Config::default().http, Duration::from_secs(5)).unwrap();
    let provider = DuckDuckGoProvider::new(client, &format!("{}/html/", server.uri())).unwrap();

    let result = provider.search("acme", 10).await;
    assert!(matches!(result, Err(SearchMasterError::Provider { .. })));
}
