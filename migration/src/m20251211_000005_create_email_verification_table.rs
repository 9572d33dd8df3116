use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailVerification::Table)
                    .if_not_exists()
                    .col(pk_auto(EmailVerification::Id))
                    .col(string_uniq(EmailVerification::Email))
                    .col(string_len(EmailVerification::Code, 6))
                    .col(timestamp_with_time_zone(EmailVerification::ExpiresAt))
                    .col(integer(EmailVerification::Attempts).default(0))
                    .col(boolean(EmailVerification::Verified).default(false))
                    .col(
                        timestamp_with_time_zone(EmailVerification::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailVerification {
    Table,
    Id,
    Email,
    Code,
    ExpiresAt,
    Attempts,
    Verified,
    CreatedAt,
}
