//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod activity;
pub mod alert;
pub mod comment;
pub mod email_verification;
pub mod monitoring;
pub mod pagination;
pub mod post;
pub mod reaction;
pub mod uptime;
pub mod user;
