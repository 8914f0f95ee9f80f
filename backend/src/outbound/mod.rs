//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: classifiers turning MySQL and Postgres driver failures
//!   into domain errors.
//!
//! Adapters are thin translators between driver representations and domain
//! types. They contain no business logic.

pub mod persistence;
