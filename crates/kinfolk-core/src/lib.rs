//! kinfolk-core library.
//!
//! Pure computations over an immutable [`family::Family`] snapshot: the
//! relationship graph, generation numbers, kinship titles, search, and
//! data diagnostics. Nothing here owns state between calls.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for loading; query operations never
//!   fail and return empty results instead.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod family;
pub mod graph;
pub mod kinship;
pub mod model;
pub mod roster;
pub mod search;

pub use error::ErrorCode;
pub use family::{Family, FamilyError};
pub use kinship::{Kinship, KinshipResolver, Locale, classify, resolve_title};
