use chrono::Duration as TimeDelta;
use summarist::database::{DatabaseInstruction, Track};

use super::*;

#[traced_test]
#[tokio::test]
async fn test_bookmarks_newest_first() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let engagement = &harness.summarist.engagement;
  let user = reader();

  assert!(engagement.bookmark(&user, "2401.00001").await?);
  assert!(engagement.bookmark(&user, "2401.00004").await?);
  assert!(engagement.bookmark(&user, "2401.00002v1").await?);

  let bookmarks = engagement.list_bookmarks(&user, 0, 10).await?;
  let ids: Vec<&str> = bookmarks.iter().map(|entry| entry.paper.arxiv_id.as_str()).collect();
  assert_eq!(ids, ["2401.00002", "2401.00004", "2401.00001"]);

  let page = engagement.list_bookmarks(&user, 1, 1).await?;
  assert_eq!(page[0].paper.arxiv_id, "2401.00004");

  assert!(engagement.list_bookmarks(&User::new("someone else"), 0, 10).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_bookmark_twice_keeps_one() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let engagement = &harness.summarist.engagement;
  let user = reader();

  assert!(engagement.bookmark(&user, "2401.00003").await?);
  assert!(!engagement.bookmark(&user, "2401.00003").await?);
  assert_eq!(engagement.list_bookmarks(&user, 0, 10).await?.len(), 1);

  assert!(engagement.remove_bookmark(&user, "2401.00003").await?);
  assert!(!engagement.remove_bookmark(&user, "2401.00003").await?);
  assert!(engagement.list_bookmarks(&user, 0, 10).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_history_lists_latest_read() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let user = reader();
  let start = published(20);

  for (offset, id) in [(0, "2401.00001"), (1, "2401.00002"), (2, "2401.00001")] {
    Track::read(&user.id, id)
      .at(start + TimeDelta::minutes(offset))
      .execute(&harness.summarist.database)
      .await?;
  }

  let history = harness.summarist.engagement.list_history(&user, 0, 10).await?;
  let ids: Vec<&str> = history.iter().map(|entry| entry.paper.arxiv_id.as_str()).collect();
  assert_eq!(ids, ["2401.00001", "2401.00002"]);
  assert_eq!(history[0].at, start + TimeDelta::minutes(2));

  let page = harness.summarist.engagement.list_history(&user, 1, 5).await?;
  assert_eq!(page.len(), 1);
  assert_eq!(page[0].paper.arxiv_id, "2401.00002");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_record_read() -> TestResult<()> {
  let harness = create_default_harness().await;
  stock_store(&harness).await;
  let engagement = &harness.summarist.engagement;

  engagement.record_read(&reader(), "2401.00005").await?;
  engagement.record_read(&reader(), "2401.00005").await?;
  let history = engagement.list_history(&reader(), 0, 10).await?;
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].paper.category, "cs.AI");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_engagement_with_unknown_paper() -> TestResult<()> {
  let harness = create_default_harness().await;
  let engagement = &harness.summarist.engagement;
  assert!(matches!(
    engagement.bookmark(&reader(), "2401.00001").await,
    Err(SummaristError::NotFound)
  ));
  assert!(matches!(
    engagement.record_read(&reader(), "2401.00001").await,
    Err(SummaristError::NotFound)
  ));
  Ok(())
}
