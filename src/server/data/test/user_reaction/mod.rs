use crate::server::{
    data::user_reaction::UserReactionRepository,
    model::reaction::{ReactionFlag, ReactionFlags, ReactionTarget, TargetType},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_target_ids_by_flag;
mod upsert;
