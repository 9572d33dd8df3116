use super::*;

/// Tests creating a reply with a subtype.
///
/// Verifies that the parent link and subtype metadata are stored.
///
/// Expected: Ok with parent_comment_id and subtype set
#[tokio::test]
async fn stores_parent_and_subtype() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let root = factory::comment::create_comment(db, post.id, author.id).await?;

    let repo = CommentRepository::new(db);
    let reply = repo
        .create(CreateCommentParams {
            post_id: post.id,
            author_id: author.id,
            parent_comment_id: Some(root.id),
            content: "Is this still available?".to_string(),
            subtype: Some(CommentSubtype::Inquiry),
        })
        .await?;

    assert_eq!(reply.parent_comment_id, Some(root.id));
    assert_eq!(reply.subtype(), Some(CommentSubtype::Inquiry));
    assert_eq!(repo.count_by_post(post.id).await?, 2);
    assert_eq!(repo.count_by_author(author.id).await?, 2);

    Ok(())
}
