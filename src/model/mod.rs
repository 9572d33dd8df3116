//! API data transfer objects.
//!
//! These types form the JSON contract of the HTTP API. Server-side domain models convert
//! into them at the controller boundary via `into_dto()`.

pub mod activity;
pub mod api;
pub mod comment;
pub mod monitoring;
pub mod post;
pub mod user;
