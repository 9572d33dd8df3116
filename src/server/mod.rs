//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: API endpoints, business logic, data access
//! and the monitoring subsystem. The backend uses Axum as the web framework and SeaORM
//! over SQLite for persistence.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Authentication guards, sessions and request timing
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Logging** (`logging`) - Tracing subscriber and Discord forwarding of error events
//! - **State** (`state`) - Shared application state (DB, HTTP client, monitoring services)
//! - **Startup** (`startup`) - Initialization of database, sessions, email and notifiers
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs for uptime checks and verification cleanup
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request; auth routes pass the rate limiter first
//! 2. **Middleware** times the request and loads the session
//! 3. **Controller** validates access, converts DTOs to params, calls service
//! 4. **Service** executes business logic, orchestrates data operations
//! 5. **Data** queries database, converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
