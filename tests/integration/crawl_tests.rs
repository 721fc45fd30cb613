//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end. One server plays the crawled site,
//! a second one plays the outside world.

use chrono::{Local, TimeZone};
use linksieve::config::{Config, OutputFormat};
use linksieve::crawler::{crawl, Diagnostic, Mode};
use linksieve::report::{export_table_at, Table};
use linksieve::url::HostMatch;
use linksieve::ExportError;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config for tests: exact host matching because every mock server lives on
/// 127.0.0.1, and a short timeout so slow links fail fast
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 1;
    config.crawler.max_concurrent_pages = 4;
    config.crawler.max_concurrent_checks = 4;
    config.crawler.host_match = HostMatch::Exact;
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Mounts the outside world: a link that times out and a link that moved
async fn mount_outside(outside: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(outside)
        .await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", outside.uri()).as_str()),
        )
        .mount(outside)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(outside)
        .await;
}

/// Site whose home page links to an internal page, a dead link and a moved link
async fn mount_site(site: &MockServer, outside: &MockServer) {
    mount_outside(outside).await;
    mount_page(
        site,
        "/",
        format!(
            r#"<a href="/about">About</a>
            <a href="{0}/slow">Slow</a>
            <a href="{0}/moved">Moved</a>"#,
            outside.uri()
        ),
    )
    .await;
    mount_page(site, "/about", r#"<a href="/">Home</a>"#.to_string()).await;
}

fn rows(table: &Table) -> Vec<Vec<String>> {
    table.rows.iter().map(|row| table.cells(row)).collect()
}

#[tokio::test]
async fn test_inventory_lists_every_external_link() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;
    mount_site(&site, &outside).await;

    let report = crawl(&site.uri(), Mode::Inventory, &create_test_config())
        .await
        .unwrap();

    assert_eq!(report.seed, site.uri());
    assert_eq!(report.table.columns(), &["#", "Page", "Link"]);
    assert_eq!(
        rows(&report.table),
        vec![
            vec!["1".to_string(), site.uri(), format!("{}/moved", outside.uri())],
            vec!["2".to_string(), site.uri(), format!("{}/slow", outside.uri())],
        ]
    );
    assert_eq!(report.statistics.pages_visited, 2);
    assert_eq!(report.statistics.network_checks, 0);
    assert!(report.diagnostics.is_empty());

    // Inventory never touches the outside world
    assert!(outside.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_broken_reports_timed_out_link() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;
    mount_site(&site, &outside).await;

    let report = crawl(&site.uri(), Mode::Broken, &create_test_config())
        .await
        .unwrap();

    assert_eq!(
        rows(&report.table),
        vec![vec!["1".to_string(), site.uri(), format!("{}/slow", outside.uri())]]
    );

    let slow = format!("{}/slow", outside.uri());
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        Diagnostic::CheckFailed { url, .. } if *url == slow
    ));
}

#[tokio::test]
async fn test_redirected_reports_destination() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;
    mount_site(&site, &outside).await;

    let report = crawl(&site.uri(), Mode::Redirected, &create_test_config())
        .await
        .unwrap();

    assert_eq!(
        report.table.columns(),
        &["#", "Page", "Link", "Redirect destination"]
    );
    assert_eq!(
        rows(&report.table),
        vec![vec![
            "1".to_string(),
            site.uri(),
            format!("{}/moved", outside.uri()),
            format!("{}/new", outside.uri()),
        ]]
    );
}

#[tokio::test]
async fn test_shared_link_checked_once() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&outside)
        .await;

    let gone = format!("{}/gone", outside.uri());
    mount_page(
        &site,
        "/",
        format!(r#"<a href="/about">About</a><a href="{}">Gone</a>"#, gone),
    )
    .await;
    mount_page(&site, "/about", format!(r#"<a href="{}">Gone again</a>"#, gone)).await;

    let report = crawl(&site.uri(), Mode::Broken, &create_test_config())
        .await
        .unwrap();

    assert_eq!(
        rows(&report.table),
        vec![
            vec!["1".to_string(), site.uri(), gone.clone()],
            vec!["2".to_string(), format!("{}/about", site.uri()), gone.clone()],
        ]
    );
    assert_eq!(report.statistics.external_links_found, 2);
    assert_eq!(report.statistics.distinct_external_links, 1);
    assert_eq!(report.statistics.network_checks, 1);
}

#[tokio::test]
async fn test_cyclic_graph_terminates_without_revisits() {
    let site = MockServer::start().await;

    for (route, body) in [
        ("/", r#"<a href="/a">A</a><a href="/b#top">B</a>"#),
        ("/a", r#"<a href="/b">B</a><a href="/">Home</a><a href="/a/">Self</a>"#),
        ("/b", r#"<a href="/a">A</a><a href="/">Home</a>"#),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(body.to_string()))
            .expect(1)
            .mount(&site)
            .await;
    }

    let report = crawl(&site.uri(), Mode::Inventory, &create_test_config())
        .await
        .unwrap();

    assert!(report.table.is_empty());
    assert_eq!(report.statistics.pages_visited, 3);
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn test_non_canonical_seed_fetched_once() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/">Home</a><a href="/about">About</a>"#.to_string()))
        .expect(1)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(r#"<a href="/">Home</a>"#.to_string()))
        .expect(1)
        .mount(&site)
        .await;

    let seed = format!("{}/", site.uri().replacen("http", "HTTP", 1));
    let report = crawl(&seed, Mode::Inventory, &create_test_config())
        .await
        .unwrap();

    assert_eq!(report.seed, site.uri());
    assert_eq!(report.statistics.pages_visited, 2);
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn test_bad_pages_become_diagnostics() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;

    mount_page(
        &site,
        "/",
        format!(
            r#"<a href="/data.json">Data</a>
            <a href="/missing">Missing</a>
            <a href="/ok">Ok</a>
            <a href="{}/x">Outside</a>"#,
            outside.uri()
        ),
    )
    .await;
    mount_page(&site, "/ok", String::new()).await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a": 1}"#, "application/json"))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let report = crawl(&site.uri(), Mode::Inventory, &create_test_config())
        .await
        .unwrap();

    assert_eq!(report.table.len(), 1);
    assert_eq!(report.statistics.pages_visited, 4);
    assert_eq!(report.statistics.pages_without_links, 2);
    assert_eq!(report.diagnostics.len(), 2);

    let missing = format!("{}/missing", site.uri());
    let data = format!("{}/data.json", site.uri());
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::PageStatus { url, status: 404 } if *url == missing
    )));
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::NotHtml { url, .. } if *url == data
    )));
}

#[tokio::test]
async fn test_invalid_seed_rejected() {
    let result = crawl("example.com", Mode::Inventory, &create_test_config()).await;
    assert!(matches!(result, Err(linksieve::SieveError::InvalidSeed { .. })));
}

#[tokio::test]
async fn test_export_after_crawl() {
    let site = MockServer::start().await;
    let outside = MockServer::start().await;
    mount_site(&site, &outside).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config();
    config.output.directory = dir.path().to_string_lossy().into_owned();
    config.output.format = OutputFormat::Csv;

    let report = crawl(&site.uri(), Mode::Redirected, &config).await.unwrap();
    let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let path = export_table_at(&report.table, &report.seed, &config.output, at).unwrap();
    assert!(path.ends_with("redirected_links/2024-01-02-03-04-05.csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("#,Page,Link,Redirect destination"));
    assert_eq!(
        lines.next().map(str::to_string),
        Some(format!(
            "1,{},{}/moved,{}/new",
            site.uri(),
            outside.uri(),
            outside.uri()
        ))
    );

    let again = export_table_at(&report.table, &report.seed, &config.output, at);
    assert!(matches!(again, Err(ExportError::AlreadyExists(_))));
}
