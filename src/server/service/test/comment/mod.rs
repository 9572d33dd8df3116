use test_utils::factory;

use super::{builder, user};
use crate::server::{
    data::post::PostRepository,
    error::{auth::AuthError, AppError},
    model::{
        comment::{CommentSubtype, CreateCommentParams},
        reaction::ReactionKind,
    },
    service::comment::{CommentService, DEFAULT_MAX_DEPTH},
};

mod create;
mod delete;
mod list_for_post;
mod react;

fn params(post_id: i32, parent_comment_id: Option<i32>) -> CreateCommentParams {
    CreateCommentParams {
        post_id,
        author_id: 0,
        parent_comment_id,
        content: "Is this still available?".to_string(),
        subtype: None,
    }
}
