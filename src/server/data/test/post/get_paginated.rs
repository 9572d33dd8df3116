use super::*;
use chrono::{Duration, Utc};

/// Tests listing posts newest first with a total count.
///
/// Expected: Ok with posts ordered by created_at descending, deleted posts excluded
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let now = Utc::now();
    let old = factory::post::PostFactory::new(db, author.id)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    let new = factory::post::PostFactory::new(db, author.id)
        .created_at(now)
        .build()
        .await?;
    factory::post::PostFactory::new(db, author.id)
        .status("deleted")
        .build()
        .await?;

    let repo = PostRepository::new(db);
    let (posts, total) = repo.get_paginated(&PostFilter::default(), 0, 10).await?;

    assert_eq!(total, 2);
    assert_eq!(
        posts.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![new.id, old.id]
    );

    Ok(())
}

/// Tests combining category, author and search filters.
///
/// Expected: Ok with only the post matching every filter
#[tokio::test]
async fn applies_filters() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;

    let wanted = factory::post::PostFactory::new(db, author.id)
        .title("Rust meetup")
        .category("events")
        .build()
        .await?;
    factory::post::PostFactory::new(db, author.id)
        .title("Rust meetup recap")
        .category("news")
        .build()
        .await?;
    factory::post::PostFactory::new(db, other.id)
        .title("Rust meetup")
        .category("events")
        .build()
        .await?;
    factory::post::PostFactory::new(db, author.id)
        .title("Gardening")
        .category("events")
        .build()
        .await?;

    let filter = PostFilter {
        category: Some("events".to_string()),
        author_id: Some(author.id),
        search: Some("rust".to_string()),
        ..Default::default()
    };

    let repo = PostRepository::new(db);
    let (posts, total) = repo.get_paginated(&filter, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(posts[0].id, wanted.id);

    Ok(())
}

/// Tests requesting a page past the end.
///
/// Expected: Ok with empty page but correct total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    factory::post::create_post(db, author.id).await?;

    let repo = PostRepository::new(db);
    let (posts, total) = repo.get_paginated(&PostFilter::default(), 5, 10).await?;

    assert!(posts.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
