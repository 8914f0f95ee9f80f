//! Inbound adapters that translate domain outcomes for external callers while
//! keeping framework details at the edge.
//!
//! HTTP status resolution and response emission live under [`http`].

pub mod http;
