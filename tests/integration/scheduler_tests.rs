use crate::common::{
    count_records, create_test_config, mount_detail, mount_index, mount_named_detail, mount_site,
};
use ssr_scraper::crawler::{scrape, PageScheduler};
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_three_pages_produce_nine_records() {
    let server = MockServer::start().await;
    mount_site(&server, 3, 3).await;

    for workers in [1, 2, 3, 8] {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&server.uri(), dir.path().to_str().unwrap(), workers);

        let summary = PageScheduler::new(config)
            .run_all(1..=3)
            .await
            .expect("Scrape failed");

        assert_eq!(
            count_records(dir.path()),
            9,
            "Expected 9 records with {} workers",
            workers
        );
        assert!(summary.is_clean());
        assert_eq!(summary.total_saved(), 9);
        assert_eq!(summary.workers, workers.min(3));
        let pages: Vec<u32> = summary.pages.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }
}

#[tokio::test]
async fn test_scrape_uses_configured_page_count() {
    let server = MockServer::start().await;
    mount_site(&server, 2, 4).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path().to_str().unwrap(), 2);
    config.scraper.total_pages = 2;

    let summary = scrape(config).await.expect("Scrape failed");

    assert_eq!(summary.pages_requested, 2);
    assert_eq!(count_records(dir.path()), 8);
}

#[tokio::test]
async fn test_results_dir_created() {
    let server = MockServer::start().await;
    mount_site(&server, 1, 2).await;

    let dir = TempDir::new().unwrap();
    let results = dir.path().join("nested").join("results");
    let config = create_test_config(&server.uri(), results.to_str().unwrap(), 1);

    PageScheduler::new(config)
        .run_all(1..=1)
        .await
        .expect("Scrape failed");

    assert_eq!(count_records(&results), 2);
}

#[tokio::test]
async fn test_aborted_page_does_not_affect_others() {
    let server = MockServer::start().await;
    mount_index(&server, 1, &[1, 2]).await;
    mount_detail(&server, 1).await;
    mount_detail(&server, 2).await;
    mount_index(&server, 2, &[3, 4, 5]).await;
    mount_detail(&server, 3).await;
    mount_named_detail(&server, 4, &"y".repeat(300)).await;
    mount_detail(&server, 5).await;
    mount_index(&server, 3, &[6]).await;
    mount_detail(&server, 6).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path().to_str().unwrap(), 3);

    let summary = PageScheduler::new(config)
        .run_all(1..=3)
        .await
        .expect("Scrape failed");

    assert_eq!(summary.pages.len(), 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].page, 2);
    assert_eq!(summary.failures[0].saved, 1);
    assert!(!summary.is_clean());

    // pages 1 and 3 complete, page 2 stops after its first item
    assert_eq!(count_records(dir.path()), 4);
    assert_eq!(summary.total_saved(), 4);
    assert!(!dir.path().join("Movie 5.json").exists());
}

#[tokio::test]
async fn test_missing_page_reported() {
    let server = MockServer::start().await;
    mount_site(&server, 2, 2).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path().to_str().unwrap(), 2);

    let summary = PageScheduler::new(config)
        .run_all(1..=3)
        .await
        .expect("Scrape failed");

    assert_eq!(summary.pages.len(), 3);
    let missing = summary.pages.iter().find(|p| p.page == 3).unwrap();
    assert!(!missing.index_fetched);
    assert_eq!(summary.total_fetch_failures(), 1);
    assert_eq!(count_records(dir.path()), 4);
}
