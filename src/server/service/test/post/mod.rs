use test_utils::factory;

use super::{builder, user};
use crate::server::{
    error::{auth::AuthError, AppError},
    model::{
        post::{ContentStatus, CreatePostParams, PostFilter, UpdatePostParams},
        reaction::ReactionKind,
    },
    service::post::PostService,
};

mod create;
mod delete;
mod react;
mod update;

fn params(title: &str) -> CreatePostParams {
    CreatePostParams {
        author_id: 0,
        title: title.to_string(),
        content: "Looking for a plumber in the north district".to_string(),
        service_type: "request".to_string(),
        category: "home".to_string(),
        metadata: serde_json::Value::Null,
    }
}
