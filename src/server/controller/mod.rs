pub mod activity;
pub mod admin;
pub mod auth;
pub mod comment;
pub mod health;
pub mod monitoring;
pub mod post;
