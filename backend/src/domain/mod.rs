//! Domain vocabulary and ports.
//!
//! Purpose: define the closed catalog of caller-facing errors and the ports
//! persistence adapters implement to translate driver failures into it. Keep
//! this module free of transport and driver types.
//!
//! Public surface:
//! - `DomainError`: the `(code, message)` pair, re-exported from `error`.
//! - `ErrorGroup` / `CatalogEntry`: taxonomy of the catalog.
//! - `ports`: `DbErrorMapper` and `OverrideTable`.

pub mod error;
pub mod ports;

pub use self::error::{CatalogEntry, DomainError, ErrorGroup, catalog, lookup};
