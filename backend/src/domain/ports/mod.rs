//! Domain ports defining the edges of the hexagon.
//!
//! Outbound persistence adapters implement [`DbErrorMapper`] so repositories
//! hand callers a [`DomainError`](super::DomainError) instead of a driver
//! error. Deployment code disambiguates generic uniqueness failures through an
//! [`OverrideTable`].

mod db_error_mapper;
mod override_table;

pub use self::db_error_mapper::DbErrorMapper;
pub use self::override_table::OverrideTable;
