use super::*;

#[traced_test]
#[tokio::test]
async fn test_refresh_week_of_computer_vision() -> TestResult<()> {
  let harness = create_default_harness().await;

  let stored = harness.summarist.ingestor.refresh(&SearchQuery::new("cs.CV", 10, 7)).await?;
  let ids: Vec<&str> = stored.iter().map(|p| p.arxiv_id.as_str()).collect();
  assert_eq!(ids, ["2401.00003", "2401.00002", "2401.00001"]);
  assert!(stored.windows(2).all(|pair| pair[0].published > pair[1].published));

  let queries = harness.index.queries.lock().unwrap().clone();
  assert_eq!(queries.len(), 1);
  assert_eq!(queries[0].category(), "cs.CV");
  assert_eq!(queries[0].days(), 7);
  assert_eq!(queries[0].max_results(), 10);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_refresh_is_idempotent() -> TestResult<()> {
  let harness = create_default_harness().await;
  let query = SearchQuery::new("cs.CV", 10, 7);

  let first = harness.summarist.ingestor.refresh(&query).await?;
  let second = harness.summarist.ingestor.refresh(&query).await?;
  assert_eq!(first, second);

  let listed = harness.summarist.library.list_papers(&reader(), None, None, 0, 100).await?;
  assert_eq!(listed.len(), 3);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_refresh_keeps_stored_rows() -> TestResult<()> {
  let mut original = create_test_paper("2401.00001", "cs.CV", 1);
  original.title = "Original title".into();
  let mut revised = original.clone();
  revised.title = "Revised title".into();

  let first = create_test_harness(
    FakeIndex::with_papers(vec![original]),
    CountingModel::replying(GOOD_REPLY),
    Config::default(),
  )
  .await;
  let path = first.db_path();
  first.summarist.ingestor.refresh(&SearchQuery::default()).await?;
  drop(first.summarist);

  let second = Summarist::builder()
    .with_config(Config::default().with_database_path(&path))
    .with_index(Arc::new(FakeIndex::with_papers(vec![revised])))
    .with_model(Arc::new(CountingModel::replying(GOOD_REPLY)))
    .build()
    .await?;
  let stored = second.ingestor.refresh(&SearchQuery::default()).await?;
  assert_eq!(stored[0].title, "Original title");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_refresh_tags_subtopic() -> TestResult<()> {
  let harness = create_default_harness().await;
  let query = SearchQuery::new("cs.CV", 10, 7).with_subtopic("detection");
  harness.summarist.ingestor.refresh(&query).await?;

  let tagged =
    harness.summarist.library.list_papers(&reader(), None, Some("detection"), 0, 10).await?;
  assert_eq!(tagged.len(), 3);
  let untagged =
    harness.summarist.library.list_papers(&reader(), None, Some("segmentation"), 0, 10).await?;
  assert!(untagged.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_refresh_propagates_index_failure() -> TestResult<()> {
  let harness = create_test_harness(
    FakeIndex::failing(),
    CountingModel::replying(GOOD_REPLY),
    Config::default(),
  )
  .await;
  let err = harness.summarist.ingestor.refresh(&SearchQuery::default()).await.unwrap_err();
  assert!(err.is_upstream());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_search_does_not_store() -> TestResult<()> {
  let harness = create_default_harness().await;
  let views = harness.summarist.ingestor.search(&SearchQuery::new("cs.RO", 10, 7)).await?;
  assert_eq!(views.len(), 1);
  assert_eq!(views[0].authors, ["Ada Lovelace", "Alan Turing"]);
  assert!(views[0].summary.is_none());

  let listed = harness.summarist.library.list_papers(&reader(), None, None, 0, 10).await?;
  assert!(listed.is_empty());
  assert_eq!(harness.model.calls(), 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_search_attaches_cached_summary() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let summary =
    harness.summarist.summaries.get_summary("2401.00004", &reader(), Some("sk-test")).await?;

  let views = harness.summarist.ingestor.search(&SearchQuery::new("cs.RO", 10, 7)).await?;
  assert_eq!(views[0].summary.as_ref(), Some(&summary));
  assert_eq!(harness.model.calls(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_search_zero_results() -> TestResult<()> {
  let harness = create_default_harness().await;
  let views = harness.summarist.ingestor.search(&SearchQuery::new("cs.CV", 0, 7)).await?;
  assert!(views.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_fetch_stores_paper_once() -> TestResult<()> {
  let harness = create_default_harness().await;

  let paper = harness.summarist.ingestor.fetch("https://arxiv.org/abs/2401.00005v2").await?;
  assert_eq!(paper.arxiv_id, "2401.00005");
  let again = harness.summarist.ingestor.fetch("2401.00005").await?;
  assert_eq!(paper, again);
  assert_eq!(harness.index.lookups.load(std::sync::atomic::Ordering::SeqCst), 1);

  assert_eq!(harness.summarist.library.get_paper("2401.00005").await?, paper);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_fetch_unknown_and_invalid() -> TestResult<()> {
  let harness = create_default_harness().await;
  assert!(matches!(
    harness.summarist.ingestor.fetch("2401.99999").await,
    Err(SummaristError::NotFound)
  ));
  assert!(matches!(
    harness.summarist.ingestor.fetch("not an id").await,
    Err(SummaristError::NotFound)
  ));
  assert_eq!(harness.index.lookups.load(std::sync::atomic::Ordering::SeqCst), 1);
  Ok(())
}
