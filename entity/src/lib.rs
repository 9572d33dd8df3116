//! SeaORM entity definitions for the townhall database schema.
//!
//! Column layout mirrors the migrations in the `migration` crate. Status and
//! reaction target columns are stored as plain strings; the server converts
//! them into typed domain enums at the repository boundary.

pub mod prelude;

pub mod comment;
pub mod email_verification;
pub mod post;
pub mod user;
pub mod user_reaction;
