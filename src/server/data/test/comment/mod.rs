use crate::server::{
    data::comment::CommentRepository,
    model::comment::{CommentCounter, CommentSubtype, CreateCommentParams, InquiryScope},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_depth;
mod get_reply_tree;
mod soft_delete;
mod update_content;
