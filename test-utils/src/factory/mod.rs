//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let post = factory::post::create_post(&db, user.id).await?;
//!
//! let (author, post) = factory::helpers::create_post_with_author(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .handle("moderator")
//!     .admin(true)
//!     .build()
//!     .await?;
//!
//! let reply = factory::comment::CommentFactory::new(&db, post.id, user.id)
//!     .parent(Some(root.id))
//!     .build()
//!     .await?;
//! ```

pub mod comment;
pub mod email_verification;
pub mod helpers;
pub mod post;
pub mod user;
pub mod user_reaction;

pub use comment::create_comment;
pub use email_verification::create_email_verification;
pub use post::create_post;
pub use user::create_user;
pub use user_reaction::create_user_reaction;
