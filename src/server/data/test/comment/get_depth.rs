use super::*;

/// Tests depth computation along a reply chain.
///
/// Expected: Ok(Some(n)) for the comment at index n
#[tokio::test]
async fn counts_ancestors() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let chain = factory::helpers::create_reply_chain(db, post.id, author.id, 3).await?;

    let repo = CommentRepository::new(db);
    for (depth, comment) in chain.iter().enumerate() {
        assert_eq!(repo.get_depth(comment.id).await?, Some(depth as u32));
    }

    Ok(())
}

/// Tests depth of a missing comment.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommentRepository::new(db);
    assert_eq!(repo.get_depth(404).await?, None);

    Ok(())
}
