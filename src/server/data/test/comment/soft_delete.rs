use super::*;

/// Tests soft deleting a comment and adjusting counters.
///
/// Expected: Ok(true), comment hidden, like counter saturates at zero
#[tokio::test]
async fn deletes_and_hides_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let repo = CommentRepository::new(db);
    repo.increment_counter(comment.id, CommentCounter::Like, 1).await?;
    repo.increment_counter(comment.id, CommentCounter::Like, -3).await?;
    assert_eq!(repo.get_by_id(comment.id).await?.unwrap().like_count, 0);

    assert!(repo.soft_delete(comment.id).await?);
    assert!(repo.get_by_id(comment.id).await?.is_none());
    assert!(!repo.soft_delete(comment.id).await?);

    let (comments, total) = repo.get_by_author_paginated(author.id, 0, 10).await?;
    assert!(comments.is_empty());
    assert_eq!(total, 0);

    Ok(())
}
