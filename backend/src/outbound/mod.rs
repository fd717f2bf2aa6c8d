//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: an in-process document store implementing the same ports
//! - **identity**: token verification against the identity provider
//! - **email**: transactional email delivery
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod email;
pub mod identity;
pub mod memory;
pub mod persistence;
