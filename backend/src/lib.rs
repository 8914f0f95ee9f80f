//! Domain error catalog with database classifiers and HTTP status mapping.
//!
//! Layout follows the hexagonal split used across our services:
//!
//! - [`domain`]: the error catalog and the ports classifiers implement.
//! - [`outbound::persistence`]: MySQL and Postgres failure classifiers.
//! - [`inbound::http`]: the status table and JSON error responses.
//! - [`settings`] and [`pipeline`]: configuration and startup wiring.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod pipeline;
pub mod settings;

pub use pipeline::ErrorPipeline;
