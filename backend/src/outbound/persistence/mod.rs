//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL
//! via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain documents. Business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to each port's error
//!   enum; rows that fail domain validation surface as query errors.
//!
//! # Example
//!
//! ```ignore
//! use jam_backend::outbound::persistence::{DbPool, DieselProjectRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jam")).await?;
//! let projects = DieselProjectRepository::new(pool);
//! ```

mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_like_repository;
mod diesel_project_repository;
mod diesel_user_profile_repository;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use pool::{DbPool, MIGRATIONS, PoolConfig, PoolError, run_migrations};
