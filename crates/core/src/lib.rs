//! `stillhouse-core`: shared building blocks for the distillery engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the error model, non-fatal warnings, revision tracking, engine
//! constants and the unit conversions every other crate builds on.

pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod revision;
pub mod units;
pub mod warning;

pub use config::EngineConfig;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BatchId, BulkSpiritId, EntryId, FinishedGoodId, LedgerItemId};
pub use revision::ExpectedRevision;
pub use warning::{Outcome, Warning};
