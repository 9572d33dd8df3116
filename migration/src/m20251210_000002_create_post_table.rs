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
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_auto(Post::Id))
                    .col(string(Post::Title))
                    .col(text(Post::Content))
                    .col(string_uniq(Post::Slug))
                    .col(integer(Post::AuthorId))
                    .col(string(Post::ServiceType))
                    .col(string(Post::Category))
                    .col(json(Post::Metadata))
                    .col(big_integer(Post::ViewCount).default(0))
                    .col(big_integer(Post::LikeCount).default(0))
                    .col(big_integer(Post::DislikeCount).default(0))
                    .col(big_integer(Post::CommentCount).default(0))
                    .col(big_integer(Post::BookmarkCount).default(0))
                    .col(string_len(Post::Status, 16).default("active"))
                    .col(
                        timestamp_with_time_zone(Post::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Post::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author_id")
                            .from(Post::Table, Post::AuthorId)
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
                    .name("idx_post_status_created_at")
                    .table(Post::Table)
                    .col(Post::Status)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    Title,
    Content,
    Slug,
    AuthorId,
    ServiceType,
    Category,
    Metadata,
    ViewCount,
    LikeCount,
    DislikeCount,
    CommentCount,
    BookmarkCount,
    Status,
    CreatedAt,
    UpdatedAt,
}
