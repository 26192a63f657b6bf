use anyhow::Result;
use sea_orm::EntityTrait;

use super::memory_db;
use crate::lti_link;

#[tokio::test]
async fn test_create_link_without_settings() -> Result<()> {
    let db = memory_db().await?;
    let link = lti_link::create(&db, 42, "resource-link-42", Some("Week 1 quiz")).await?;
    assert_eq!(link.link_id, 42);
    assert!(link.settings.is_none());

    // Row exists, settings column is NULL
    assert_eq!(lti_link::find_settings(&db, 42).await?, Some(None));
    Ok(())
}

#[tokio::test]
async fn test_find_settings_missing_link() -> Result<()> {
    let db = memory_db().await?;
    assert_eq!(lti_link::find_settings(&db, 7).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_update_settings_roundtrip() -> Result<()> {
    let db = memory_db().await?;
    lti_link::create(&db, 1, "rl-1", None).await?;

    let rows = lti_link::update_settings(&db, 1, r#"{"a":"1","b":2}"#).await?;
    assert_eq!(rows, 1);
    assert_eq!(
        lti_link::find_settings(&db, 1).await?,
        Some(Some(r#"{"a":"1","b":2}"#.to_string()))
    );

    let found = lti_link::Entity::find_by_id(1).one(&db).await?.unwrap();
    assert_eq!(found.link_key, "rl-1");
    Ok(())
}

#[tokio::test]
async fn test_update_settings_unknown_link_matches_nothing() -> Result<()> {
    let db = memory_db().await?;
    lti_link::create(&db, 1, "rl-1", None).await?;
    let rows = lti_link::update_settings(&db, 2, "{}").await?;
    assert_eq!(rows, 0);
    assert_eq!(lti_link::find_settings(&db, 1).await?, Some(None));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_link_key_rejected() -> Result<()> {
    let db = memory_db().await?;
    lti_link::create(&db, 1, "same", None).await?;
    assert!(lti_link::create(&db, 2, "same", None).await.is_err());
    assert!(lti_link::create(&db, 3, "  ", None).await.is_err());
    Ok(())
}
