//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the
//! coordinator through full runs end-to-end.

use policy_crawler::config::{Config, OutputMode};
use policy_crawler::crawler::{run_crawl, run_single_site, Coordinator};
use policy_crawler::output::MemorySink;
use policy_crawler::PolicyRecord;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no inter-request delay
fn create_test_config(max_items: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_items = max_items;
    config.crawler.request_delay_ms = 0;
    config.crawler.listing_timeout_secs = 5;
    config.crawler.document_timeout_secs = 5;
    config
}

/// Listing page with one qualifying `.shtml` link per href
fn listing_page(hrefs: &[String]) -> String {
    let items: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<li><a href="{}">关于第{}号卫生健康政策的通知</a></li>"#,
                href,
                i + 1
            )
        })
        .collect();

    format!(
        r#"<html><body><a href="/index.shtml">首页</a><ul class="list">{}</ul></body></html>"#,
        items
    )
}

fn document_page(n: usize) -> String {
    format!(
        r#"<html><head><title>政策{n}</title></head><body>
        <div class="info">发布时间：2024-01-{n:02} 来源：浙江省卫生健康委员会</div>
        <div class="TRS_Editor"><p>第{n}号文件正文。</p></div>
        </body></html>"#,
        n = n
    )
}

/// Mounts a listing page at `/<site>/list.shtml` linking to `count` documents
async fn mount_site(server: &MockServer, site: &str, count: usize) -> String {
    let hrefs: Vec<String> = (1..=count)
        .map(|i| format!("/{}/doc{}.shtml", site, i))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/{}/list.shtml", site)))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&hrefs)))
        .mount(server)
        .await;

    format!("{}/{}/list.shtml", server.uri(), site)
}

/// Mounts document `n` of `site`, expecting exactly `expected_hits` fetches
async fn mount_document(server: &MockServer, site: &str, n: usize, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/doc{}.shtml", site, n)))
        .respond_with(ResponseTemplate::new(200).set_body_string(document_page(n)))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn titles(records: &[PolicyRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "a", 2).await;
    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "a", 2, 1).await;

    let mut coordinator =
        Coordinator::new(create_test_config(1000), vec![site.clone()], MemorySink::new()).unwrap();
    let stats = coordinator.run().await.unwrap();

    let (state, sink) = coordinator.into_parts();
    let records = state.records();
    assert_eq!(records.len(), 2);
    assert_eq!(stats.records, 2);
    assert_eq!(stats.candidates_discovered, 2);
    assert!(!stats.cap_reached);

    let first = &records[0];
    assert_eq!(first.title, "关于第1号卫生健康政策的通知");
    assert_eq!(first.url, format!("{}/a/doc1.shtml", server.uri()));
    assert_eq!(first.publication_date, "2024-01-01");
    assert_eq!(first.source, "浙江省卫健委");
    assert_eq!(first.website, site);
    assert!(first.content.contains("第1号文件正文。"));

    assert_eq!(sink.checkpoints, vec![(1, 2)]);
    assert_eq!(sink.final_records.as_deref(), Some(records));
}

#[tokio::test]
async fn test_cap_stops_fetching_across_sites() {
    let server = MockServer::start().await;
    let first = mount_site(&server, "a", 5).await;

    for n in 1..=3 {
        mount_document(&server, "a", n, 1).await;
    }
    for n in 4..=5 {
        mount_document(&server, "a", n, 0).await;
    }

    // The second site is never reached
    Mock::given(method("GET"))
        .and(path("/b/list.shtml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(0)
        .mount(&server)
        .await;
    let second = format!("{}/b/list.shtml", server.uri());

    let mut coordinator =
        Coordinator::new(create_test_config(3), vec![first, second], MemorySink::new()).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(coordinator.state().total_crawled(), 3);
    assert!(stats.cap_reached);
    assert_eq!(stats.documents_attempted(), 3);
    assert_eq!(coordinator.sink().checkpoints, vec![(1, 3)]);

    server.verify().await;
}

#[tokio::test]
async fn test_cap_reached_mid_second_site() {
    let server = MockServer::start().await;
    let first = mount_site(&server, "a", 2).await;
    let second = mount_site(&server, "b", 5).await;

    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "a", 2, 1).await;
    mount_document(&server, "b", 1, 1).await;
    for n in 2..=5 {
        mount_document(&server, "b", n, 0).await;
    }

    let mut coordinator =
        Coordinator::new(create_test_config(3), vec![first, second], MemorySink::new()).unwrap();
    coordinator.run().await.unwrap();

    let records = coordinator.state().records();
    assert_eq!(records.len(), 3);
    assert!(records[2].url.ends_with("/b/doc1.shtml"));
    assert_eq!(coordinator.sink().checkpoints, vec![(1, 2), (2, 3)]);

    server.verify().await;
}

#[tokio::test]
async fn test_failed_item_does_not_stop_site() {
    let server = MockServer::start().await;
    let hrefs = vec![
        "/a/doc1.shtml".to_string(),
        "http://127.0.0.1:1/unreachable.shtml".to_string(),
        "/a/doc3.shtml".to_string(),
    ];
    Mock::given(method("GET"))
        .and(path("/a/list.shtml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&hrefs)))
        .mount(&server)
        .await;
    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "a", 3, 1).await;
    let site = format!("{}/a/list.shtml", server.uri());

    let mut coordinator =
        Coordinator::new(create_test_config(1000), vec![site], MemorySink::new()).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(
        titles(coordinator.state().records()),
        vec!["关于第1号卫生健康政策的通知", "关于第3号卫生健康政策的通知"]
    );
    assert_eq!(stats.documents_ok, 2);
    assert_eq!(stats.documents_failed, 1);
}

#[tokio::test]
async fn test_non_200_document_is_skipped() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "a", 3).await;
    mount_document(&server, "a", 1, 1).await;
    Mock::given(method("GET"))
        .and(path("/a/doc2.shtml"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_document(&server, "a", 3, 1).await;

    let mut coordinator =
        Coordinator::new(create_test_config(1000), vec![site], MemorySink::new()).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(coordinator.state().total_crawled(), 2);
    assert_eq!(stats.documents_skipped, 1);
    assert_eq!(stats.documents_failed, 0);
}

#[tokio::test]
async fn test_delay_follows_every_document_attempt() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "a", 3).await;
    mount_document(&server, "a", 1, 1).await;
    Mock::given(method("GET"))
        .and(path("/a/doc2.shtml"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_document(&server, "a", 3, 1).await;

    let mut config = create_test_config(1000);
    config.crawler.request_delay_ms = 200;
    let mut coordinator = Coordinator::new(config, vec![site], MemorySink::new()).unwrap();

    let started = Instant::now();
    let stats = coordinator.run().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(stats.documents_attempted(), 3);
    assert_eq!(stats.records, 2);
    // one pause per attempt, the failed one included
    assert!(
        elapsed >= Duration::from_millis(600),
        "expected at least 600ms, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_failed_listing_only_skips_that_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken/list.shtml"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let broken = format!("{}/broken/list.shtml", server.uri());
    let good = mount_site(&server, "a", 1).await;
    mount_document(&server, "a", 1, 1).await;

    let mut coordinator = Coordinator::new(
        create_test_config(1000),
        vec![broken, "http://127.0.0.1:1/list.shtml".to_string(), good],
        MemorySink::new(),
    )
    .unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.sites_failed, 2);
    assert_eq!(stats.sites_completed, 1);
    assert_eq!(coordinator.state().total_crawled(), 1);
    // the checkpoint carries the ordinal of the site that produced it
    assert_eq!(coordinator.sink().checkpoints, vec![(3, 1)]);
}

#[tokio::test]
async fn test_checkpoints_follow_site_order() {
    let server = MockServer::start().await;
    let first = mount_site(&server, "a", 2).await;
    let empty = mount_site(&server, "empty", 0).await;
    let third = mount_site(&server, "c", 1).await;
    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "a", 2, 1).await;
    mount_document(&server, "c", 1, 1).await;

    let mut coordinator = Coordinator::new(
        create_test_config(1000),
        vec![first, empty, third],
        MemorySink::new(),
    )
    .unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.sites_without_links, 1);
    assert_eq!(coordinator.sink().checkpoints, vec![(1, 2), (3, 3)]);

    let records = coordinator.state().records();
    assert!(records[0].url.ends_with("/a/doc1.shtml"));
    assert!(records[1].url.ends_with("/a/doc2.shtml"));
    assert!(records[2].url.ends_with("/c/doc1.shtml"));
}

#[tokio::test]
async fn test_no_records_skips_final_save() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "a", 1).await;
    Mock::given(method("GET"))
        .and(path("/a/doc1.shtml"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut coordinator =
        Coordinator::new(create_test_config(1000), vec![site], MemorySink::new()).unwrap();
    coordinator.run().await.unwrap();

    assert!(coordinator.sink().checkpoints.is_empty());
    assert!(coordinator.sink().final_records.is_none());
}

#[tokio::test]
async fn test_links_per_site_limit() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "a", 4).await;
    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "a", 2, 1).await;
    mount_document(&server, "a", 3, 0).await;
    mount_document(&server, "a", 4, 0).await;

    let mut config = create_test_config(1000);
    config.crawler.max_links_per_site = Some(2);
    let mut coordinator = Coordinator::new(config, vec![site], MemorySink::new()).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.candidates_discovered, 4);
    assert_eq!(stats.records, 2);

    server.verify().await;
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

#[tokio::test]
async fn test_multi_site_run_writes_files() {
    let server = MockServer::start().await;
    let first = mount_site(&server, "a", 1).await;
    let second = mount_site(&server, "b", 1).await;
    mount_document(&server, "a", 1, 1).await;
    mount_document(&server, "b", 1, 1).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(1000);
    config.output.directory = dir.path().to_string_lossy().to_string();

    let stats = run_crawl(config, vec![first, second]).await.unwrap();
    assert_eq!(stats.records, 2);

    let checkpoint = fs::read_to_string(dir.path().join("progress_after_website_2.json")).unwrap();
    let saved: Vec<PolicyRecord> = serde_json::from_str(&checkpoint).unwrap();
    assert_eq!(saved.len(), 2);
    assert!(dir.path().join("progress_after_website_1.json").exists());

    let json_files = files_with_prefix(dir.path(), "policies_all_websites_");
    assert_eq!(json_files.len(), 1);
    let final_json = fs::read_to_string(dir.path().join(&json_files[0])).unwrap();
    assert_eq!(serde_json::from_str::<Vec<PolicyRecord>>(&final_json).unwrap(), saved);

    let csv_files = files_with_prefix(dir.path(), "policies_summary_");
    let csv = fs::read_to_string(dir.path().join(&csv_files[0])).unwrap();
    assert!(csv.starts_with("\u{feff}标题,链接,发布日期,来源,网站,内容长度,爬取时间"));
    assert_eq!(csv.lines().count(), 3);

    let txt_files = files_with_prefix(dir.path(), "policy_contents_");
    let txt = fs::read_to_string(dir.path().join(&txt_files[0])).unwrap();
    assert!(txt.contains("【第2条】关于第1号卫生健康政策的通知"));
}

#[tokio::test]
async fn test_single_site_run_uses_fixed_names() {
    let server = MockServer::start().await;
    let site = mount_site(&server, "nhc", 2).await;
    mount_document(&server, "nhc", 1, 1).await;
    mount_document(&server, "nhc", 2, 1).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(1000);
    config.output.directory = dir.path().to_string_lossy().to_string();
    assert_eq!(config.output.mode, OutputMode::MultiSite);

    let stats = run_single_site(config, site).await.unwrap();
    assert_eq!(stats.records, 2);

    assert!(dir.path().join("policies_with_content.json").exists());
    let csv = fs::read_to_string(dir.path().join("policies_summary.csv")).unwrap();
    assert!(csv.starts_with("\u{feff}标题,链接,发布日期,来源,内容长度,爬取时间"));
    let txt = fs::read_to_string(dir.path().join("policy_contents.txt")).unwrap();
    assert!(txt.starts_with("【标题】关于第1号卫生健康政策的通知\n"));
    assert!(files_with_prefix(dir.path(), "policies_all_websites_").is_empty());
}
