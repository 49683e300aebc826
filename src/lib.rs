//! # EcoSort Service
//!
//! Backend for a waste-segregation rewards app: users photograph waste, an
//! object-detection endpoint (with a synthetic fallback) classifies it, and
//! the service scores the declared category against the prediction and keeps
//! a per-user point ledger driving levels, leaderboards and rewards.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Services orchestrating classification, scoring and the ledger
//! - **infrastructure**: Persistence (SeaORM/SQLite), the detection backend, in-memory storage
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, MemoryStore, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::{create_api_router, AppState};
