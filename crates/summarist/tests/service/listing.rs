use super::*;

fn ids(papers: &[Paper]) -> Vec<&str> { papers.iter().map(|p| p.arxiv_id.as_str()).collect() }

#[traced_test]
#[tokio::test]
async fn test_list_by_category_newest_first() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;

  let papers = harness.summarist.library.list_papers(&reader(), Some("cs.CV"), None, 0, 10).await?;
  assert_eq!(ids(&papers), ["2401.00003", "2401.00002", "2401.00001"]);
  assert!(papers.iter().all(|p| p.category == "cs.CV"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_exact_category_match() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;

  for category in ["cs", "cs.C", "CS.CV", "cs.CV "] {
    let papers =
      harness.summarist.library.list_papers(&reader(), Some(category), None, 0, 10).await?;
    // Surrounding whitespace is trimmed, everything else must match exactly.
    if category.trim() == "cs.CV" {
      assert_eq!(papers.len(), 3);
    } else {
      assert!(papers.is_empty(), "{category} matched {:?}", ids(&papers));
    }
  }
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_pagination() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let library = &harness.summarist.library;

  let all = library.list_papers(&reader(), None, None, 0, 10).await?;
  assert_eq!(ids(&all), ["2401.00005", "2401.00004", "2401.00003", "2401.00002", "2401.00001"]);

  let page = library.list_papers(&reader(), None, None, 1, 2).await?;
  assert_eq!(ids(&page), ["2401.00004", "2401.00003"]);

  assert!(library.list_papers(&reader(), None, None, 5, 10).await?.is_empty());
  assert!(library.list_papers(&reader(), None, None, 0, 0).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_same_day_ties_break_by_id() -> TestResult<()> {
  let papers = vec![
    create_test_paper("2401.00020", "cs.LG", 9),
    create_test_paper("2401.00010", "cs.LG", 9),
    create_test_paper("2401.00030", "cs.LG", 9),
  ];
  let harness = create_test_harness(
    FakeIndex::with_papers(papers),
    CountingModel::replying(GOOD_REPLY),
    Config::default(),
  )
  .await;
  harness.summarist.ingestor.refresh(&SearchQuery::new("cs.LG", 10, 7)).await?;

  let listed = harness.summarist.library.list_papers(&reader(), Some("cs.LG"), None, 0, 10).await?;
  assert_eq!(ids(&listed), ["2401.00010", "2401.00020", "2401.00030"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_category_and_subtopic() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  harness
    .summarist
    .ingestor
    .refresh(&SearchQuery::new("cs.RO", 10, 7).with_subtopic("grasping"))
    .await?;

  let library = &harness.summarist.library;
  let papers = library.list_papers(&reader(), Some("cs.RO"), Some("grasping"), 0, 10).await?;
  assert_eq!(ids(&papers), ["2401.00004"]);
  assert!(library.list_papers(&reader(), Some("cs.CV"), Some("grasping"), 0, 10).await?.is_empty());
  assert!(library.list_papers(&reader(), Some("cs.RO"), Some("grasp"), 0, 10).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_falls_back_to_preferences() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;

  let user = User::new("reader")
    .with_preference(Preference::category("cs.RO"))
    .with_preference(Preference::category("cs.AI"));
  let papers = harness.summarist.library.list_papers(&user, None, None, 0, 10).await?;
  assert_eq!(ids(&papers), ["2401.00005", "2401.00004"]);

  // An explicit category overrides the preferences.
  let papers = harness.summarist.library.list_papers(&user, Some("cs.CV"), Some(" "), 0, 1).await?;
  assert_eq!(ids(&papers), ["2401.00003"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_list_never_calls_index() -> TestResult<()> {
  let harness = create_test_harness(
    FakeIndex::failing(),
    CountingModel::replying(GOOD_REPLY),
    Config::default(),
  )
  .await;
  let papers = harness.summarist.library.list_papers(&reader(), Some("cs.CV"), None, 0, 10).await?;
  assert!(papers.is_empty());
  assert!(harness.index.queries.lock().unwrap().is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_get_paper() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;

  let paper = harness.summarist.library.get_paper("2401.00004v1").await;
  assert_eq!(paper?.category, "cs.RO");
  assert!(matches!(
    harness.summarist.library.get_paper("2401.09999").await,
    Err(SummaristError::NotFound)
  ));
  Ok(())
}
