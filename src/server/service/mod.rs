//! Business logic between controllers and repositories.
//!
//! Database-backed services borrow the connection per request (`XService::new(&db)`).
//! `AlertingService` and `UptimeMonitoringService` hold in-memory state shared through
//! `AppState`.

pub mod activity;
pub mod alerting;
pub mod auth;
pub mod comment;
pub mod email;
pub mod email_verification;
pub mod monitoring;
pub mod notification;
pub mod post;
pub mod uptime;
pub mod user;

#[cfg(test)]
mod test;
