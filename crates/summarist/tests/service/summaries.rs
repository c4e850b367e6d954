use summarist::service::NO_CREDENTIAL;

use super::*;

async fn stocked_with(model: CountingModel, config: Config) -> Harness {
  let harness = create_test_harness(
    FakeIndex::with_papers(vec![
      create_test_paper("2401.00002", "cs.CV", 2),
      create_test_paper("2401.00001", "cs.CV", 1),
    ]),
    model,
    config,
  )
  .await;
  stock_store(&harness).await;
  harness
}

#[traced_test]
#[tokio::test]
async fn test_summary_of_unknown_paper() -> TestResult<()> {
  let harness = create_default_harness().await;
  let result =
    harness.summarist.summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await;
  assert!(matches!(result, Err(SummaristError::NotFound)));
  assert_eq!(harness.model.calls(), 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_summary_generated_once() -> TestResult<()> {
  let harness = stocked_with(CountingModel::replying(GOOD_REPLY), Config::default()).await;
  let summaries = &harness.summarist.summaries;

  let first = summaries.get_summary("2401.00002", &reader(), Some("sk-test")).await?;
  assert_eq!(first.observation, "Detectors miss small objects.");
  assert_eq!(first.main_idea, "Fuse high-resolution feature maps.");

  // Cached summaries need no credential.
  let second = summaries.get_summary("2401.00002v1", &reader(), None).await?;
  assert_eq!(first, second);
  assert_eq!(harness.model.calls(), 1);
  assert_eq!(harness.summary_rows(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_concurrent_first_requests_store_one_summary() -> TestResult<()> {
  let harness = stocked_with(
    CountingModel::replying(GOOD_REPLY).with_delay(Duration::from_millis(100)),
    Config::default(),
  )
  .await;
  let summaries = &harness.summarist.summaries;
  let user = reader();

  let (a, b) = futures::join!(
    summaries.get_summary("2401.00001", &user, Some("sk-test")),
    summaries.get_summary("2401.00001", &user, Some("sk-test")),
  );
  assert_eq!(a?, b?);
  assert_eq!(harness.summary_rows(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_concurrent_requests_on_separate_tasks() -> TestResult<()> {
  let harness = stocked_with(
    CountingModel::replying(GOOD_REPLY).with_delay(Duration::from_millis(50)),
    Config::default(),
  )
  .await;

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let summaries = harness.summarist.summaries.clone();
      tokio::spawn(async move {
        summaries.get_summary("2401.00002", &reader(), Some("sk-test")).await
      })
    })
    .collect();

  let mut results = Vec::new();
  for handle in handles {
    results.push(handle.await??);
  }
  assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
  assert_eq!(harness.summary_rows(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_missing_credential_serves_placeholder() -> TestResult<()> {
  let harness = stocked_with(CountingModel::replying(GOOD_REPLY), Config::default()).await;
  let summaries = &harness.summarist.summaries;
  for credential in [None, Some(""), Some("   ")] {
    let summary = summaries.get_summary("2401.00001", &reader(), credential).await?;
    assert_eq!(summary.observation, "Summary generation failed");
    assert!(summary.challenge.contains(NO_CREDENTIAL));
  }
  assert_eq!(harness.model.calls(), 0);
  assert_eq!(harness.summary_rows(), 0);
  assert!(harness.summarist.engagement.list_history(&reader(), 0, 10).await?.is_empty());

  // Nothing was cached, so a later request with a key still generates.
  let summary = summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await?;
  assert_eq!(summary.observation, "Detectors miss small objects.");
  assert_eq!(harness.summary_rows(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_configured_credential_is_default() -> TestResult<()> {
  let harness =
    stocked_with(CountingModel::replying(GOOD_REPLY), Config::default().with_api_key("sk-config"))
      .await;
  let summary = harness.summarist.summaries.get_summary("2401.00001", &reader(), None).await?;
  assert_eq!(summary.objective, "Improve recall on small objects.");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_tier_gating() -> TestResult<()> {
  let mut config = Config::default();
  config.access.minimum_tier = Some(Tier::Premium);
  let harness = stocked_with(CountingModel::replying(GOOD_REPLY), config).await;
  let summaries = &harness.summarist.summaries;

  let free = reader();
  let result = summaries.get_summary("2401.00001", &free, Some("sk-test")).await;
  assert!(matches!(result, Err(SummaristError::AccessDenied(_))));
  assert_eq!(harness.model.calls(), 0);

  // Unknown papers are reported before the tier is checked.
  let result = summaries.get_summary("2401.09999", &free, Some("sk-test")).await;
  assert!(matches!(result, Err(SummaristError::NotFound)));

  let premium = User::new("patron").with_tier(Tier::Premium);
  assert!(summaries.get_summary("2401.00001", &premium, Some("sk-test")).await.is_ok());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_failed_generation_is_cached_once() -> TestResult<()> {
  let harness = stocked_with(CountingModel::failing("model offline"), Config::default()).await;
  let summaries = &harness.summarist.summaries;

  let first = summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await?;
  assert_eq!(first.observation, "Summary generation failed");
  assert!(first.challenge.contains("model offline"));
  assert_eq!(harness.summary_rows(), 1);

  let second = summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await?;
  assert_eq!(first, second);
  assert_eq!(harness.model.calls(), 1);

  let history = harness.summarist.engagement.list_history(&reader(), 0, 10).await?;
  assert_eq!(history.len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_unlabelled_reply_is_cached_once() -> TestResult<()> {
  let harness =
    stocked_with(CountingModel::replying("Sorry, I can't summarize that."), Config::default())
      .await;
  let summaries = &harness.summarist.summaries;

  let first = summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await?;
  assert_eq!(first.observation, "Summary could not be parsed");
  assert!(!first.challenge.is_empty());

  // Served from the cache, so no credential is needed.
  let second = summaries.get_summary("2401.00001", &reader(), None).await?;
  assert_eq!(first, second);
  assert_eq!(harness.model.calls(), 1);
  assert_eq!(harness.summary_rows(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_served_summary_records_read() -> TestResult<()> {
  let harness = stocked_with(CountingModel::replying(GOOD_REPLY), Config::default()).await;
  harness.summarist.summaries.get_summary("2401.00001", &reader(), Some("sk-test")).await?;
  harness.summarist.summaries.get_summary("2401.00002", &reader(), Some("sk-test")).await?;

  let history = harness.summarist.engagement.list_history(&reader(), 0, 10).await?;
  let ids: Vec<&str> = history.iter().map(|entry| entry.paper.arxiv_id.as_str()).collect();
  assert_eq!(ids, ["2401.00002", "2401.00001"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_generated_summary_fetches_paper() -> TestResult<()> {
  let harness = create_default_harness().await;
  let summaries = &harness.summarist.summaries;

  let summary = summaries.generated_summary("2401.00004", Some("sk-test")).await?;
  assert_eq!(summary.challenge, "Features vanish at low resolution.");
  assert_eq!(harness.summarist.library.get_paper("2401.00004").await?.category, "cs.RO");
  assert_eq!(harness.summary_rows(), 1);

  // The stored paper and summary are reused.
  let again = summaries.generated_summary("2401.00004", Some("sk-test")).await?;
  assert_eq!(summary, again);
  assert_eq!(harness.model.calls(), 1);
  assert_eq!(harness.index.lookups.load(std::sync::atomic::Ordering::SeqCst), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_generated_summary_requires_credential() -> TestResult<()> {
  let harness = create_default_harness().await;
  let summaries = &harness.summarist.summaries;

  let result = summaries.generated_summary("2401.00004", None).await;
  assert!(matches!(result, Err(SummaristError::Unauthorized)));
  assert_eq!(harness.index.lookups.load(std::sync::atomic::Ordering::SeqCst), 0);

  let result = summaries.generated_summary("2401.09999", Some("sk-test")).await;
  assert!(matches!(result, Err(SummaristError::NotFound)));
  Ok(())
}
