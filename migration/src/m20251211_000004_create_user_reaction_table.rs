use sea_orm_migration::{prelude::*, schema::*};

use super::m20251210_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserReaction::Table)
                    .if_not_exists()
                    .col(pk_auto(UserReaction::Id))
                    .col(integer(UserReaction::UserId))
                    .col(string_len(UserReaction::TargetType, 16))
                    .col(integer(UserReaction::TargetId))
                    .col(boolean(UserReaction::Liked).default(false))
                    .col(boolean(UserReaction::Disliked).default(false))
                    .col(boolean(UserReaction::Bookmarked).default(false))
                    .col(
                        timestamp_with_time_zone(UserReaction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(UserReaction::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_reaction_user_id")
                            .from(UserReaction::Table, UserReaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_reaction_user_target")
                    .table(UserReaction::Table)
                    .col(UserReaction::UserId)
                    .col(UserReaction::TargetType)
                    .col(UserReaction::TargetId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserReaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserReaction {
    Table,
    Id,
    UserId,
    TargetType,
    TargetId,
    Liked,
    Disliked,
    Bookmarked,
    CreatedAt,
    UpdatedAt,
}
