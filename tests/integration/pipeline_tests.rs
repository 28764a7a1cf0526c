use crate::common::{
    count_records, create_test_config, mount_detail, mount_index, mount_named_detail,
};
use ssr_scraper::crawler::{Fetcher, PagePipeline};
use ssr_scraper::output::{load_record, JsonPersister};
use ssr_scraper::ScrapeError;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline_for(server: &MockServer, dir: &TempDir, isolate: bool) -> PagePipeline {
    let mut config = create_test_config(&server.uri(), dir.path().to_str().unwrap(), 1);
    config.scraper.isolate_item_failures = isolate;
    JsonPersister::new(dir.path()).ensure_root().unwrap();
    PagePipeline::from_config(&config).expect("Failed to build pipeline")
}

#[tokio::test]
async fn test_page_records_written_to_disk() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2, 3]).await;
    for id in [1, 2, 3] {
        mount_detail(&server, id).await;
    }

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_for(&server, &dir, false);

    let outcome = pipeline.run_page(1).await.expect("Page failed");

    assert_eq!(outcome.links_found, 3);
    assert_eq!(outcome.saved, 3);
    assert_eq!(count_records(dir.path()), 3);

    let record = load_record(&dir.path().join("Movie 2.json")).expect("Record missing");
    assert_eq!(record.cover.as_deref(), Some("https://p0.example.com/movie/2.jpg"));
    assert_eq!(record.name.as_deref(), Some("Movie 2"));
    assert_eq!(record.categories, vec!["剧情", "爱情"]);
    assert_eq!(record.published_at.as_deref(), Some("1993-07-03"));
    assert_eq!(record.drama.as_deref(), Some("Synopsis of Movie 2."));
    assert_eq!(record.score.as_deref(), Some("9.2"));
}

#[tokio::test]
async fn test_detail_timeout_skips_item() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2, 3]).await;
    mount_detail(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/detail/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<h2>Too slow</h2>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_detail(&server, 3).await;

    let dir = TempDir::new().unwrap();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let pipeline = PagePipeline::new(
        Url::parse(&server.uri()).unwrap(),
        Fetcher::with_client(client),
        JsonPersister::new(dir.path()),
        false,
    );

    let outcome = pipeline.run_page(1).await.expect("Page failed");

    assert_eq!(outcome.links_found, 3);
    assert_eq!(outcome.saved, 2);
    assert_eq!(outcome.fetch_failures, 1);
    assert!(dir.path().join("Movie 1.json").exists());
    assert!(!dir.path().join("Too slow.json").exists());
    assert!(dir.path().join("Movie 3.json").exists());
}

#[tokio::test]
async fn test_missing_index_page_scrapes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_for(&server, &dir, false);

    let outcome = pipeline.run_page(1).await.expect("Page failed");

    assert!(!outcome.index_fetched);
    assert_eq!(outcome.fetch_failures, 1);
    assert_eq!(count_records(dir.path()), 0);
}

#[tokio::test]
async fn test_same_name_overwrites() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2]).await;
    mount_named_detail(&server, 1, "Psycho").await;
    mount_named_detail(&server, 2, "Psycho").await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_for(&server, &dir, false);

    let outcome = pipeline.run_page(1).await.expect("Page failed");

    assert_eq!(outcome.saved, 2);
    assert_eq!(count_records(dir.path()), 1);

    // the later item wins
    let record = load_record(&dir.path().join("Psycho.json")).unwrap();
    assert_eq!(record.cover.as_deref(), Some("https://p0.example.com/movie/2.jpg"));
}

#[tokio::test]
async fn test_write_failure_aborts_rest_of_page() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2, 3]).await;
    mount_detail(&server, 1).await;
    // longer than any filesystem allows for a single path component
    mount_named_detail(&server, 2, &"x".repeat(300)).await;
    mount_detail(&server, 3).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_for(&server, &dir, false);

    let result = pipeline.run_page(1).await;

    match result {
        Err(ScrapeError::PageAborted { page, saved, .. }) => {
            assert_eq!(page, 1);
            assert_eq!(saved, 1);
        }
        other => panic!("expected an aborted page, got {:?}", other),
    }
    assert!(dir.path().join("Movie 1.json").exists());
    assert!(!dir.path().join("Movie 3.json").exists());
}

#[tokio::test]
async fn test_isolated_write_failure_continues_page() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2, 3]).await;
    mount_detail(&server, 1).await;
    mount_named_detail(&server, 2, &"x".repeat(300)).await;
    mount_detail(&server, 3).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_for(&server, &dir, true);

    let outcome = pipeline.run_page(1).await.expect("Page failed");

    assert_eq!(outcome.saved, 2);
    assert_eq!(outcome.persist_failures, 1);
    assert!(dir.path().join("Movie 3.json").exists());
}
