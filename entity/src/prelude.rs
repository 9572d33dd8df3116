pub use super::comment::Entity as Comment;
pub use super::email_verification::Entity as EmailVerification;
pub use super::post::Entity as Post;
pub use super::user::Entity as User;
pub use super::user_reaction::Entity as UserReaction;
