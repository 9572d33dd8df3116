use super::*;

/// Tests fetching a nested reply tree.
///
/// Verifies that replies are nested under their parents down to the requested depth.
///
/// Expected: Ok with a chain of 3 nested replies and the 4th level cut off
#[tokio::test]
async fn nests_replies_up_to_max_depth() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let chain = factory::helpers::create_reply_chain(db, post.id, author.id, 4).await?;

    let repo = CommentRepository::new(db);
    let tree = repo.get_reply_tree(chain[0].id, 3).await?;

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].comment.id, chain[1].id);
    assert_eq!(tree[0].replies[0].comment.id, chain[2].id);
    assert_eq!(tree[0].replies[0].replies[0].comment.id, chain[3].id);
    assert!(tree[0].replies[0].replies[0].replies.is_empty());

    Ok(())
}

/// Tests sibling ordering and deleted replies.
///
/// Expected: Ok with active siblings oldest first
#[tokio::test]
async fn orders_siblings_and_skips_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let root = factory::comment::create_comment(db, post.id, author.id).await?;
    let a = factory::comment::CommentFactory::new(db, post.id, author.id)
        .parent(Some(root.id))
        .build()
        .await?;
    factory::comment::CommentFactory::new(db, post.id, author.id)
        .parent(Some(root.id))
        .status("deleted")
        .build()
        .await?;
    let c = factory::comment::CommentFactory::new(db, post.id, author.id)
        .parent(Some(root.id))
        .build()
        .await?;

    let repo = CommentRepository::new(db);
    let tree = repo.get_reply_tree(root.id, 3).await?;
    let direct = repo.get_replies(root.id).await?;

    assert_eq!(
        tree.iter().map(|n| n.comment.id).collect::<Vec<_>>(),
        vec![a.id, c.id]
    );
    assert_eq!(direct.len(), 2);
    assert!(repo.get_reply_tree(root.id, 0).await?.is_empty());

    Ok(())
}
