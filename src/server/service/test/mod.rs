use test_utils::builder::TestBuilder;

use crate::server::model::user::User;

mod comment;
mod email_verification;
mod post;
mod user;

/// Inserts a user through the factory and converts it to the domain model.
async fn user(db: &sea_orm::DatabaseConnection, admin: bool) -> Result<User, sea_orm::DbErr> {
    let entity = test_utils::factory::user::UserFactory::new(db)
        .admin(admin)
        .build()
        .await?;
    Ok(User::from_entity(entity))
}

fn builder() -> TestBuilder {
    TestBuilder::new().with_all_tables()
}
