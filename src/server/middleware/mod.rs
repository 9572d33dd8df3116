//! Request processing middleware and authentication helpers.

pub mod auth;
pub mod performance;
pub mod session;
