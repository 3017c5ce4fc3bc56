#![deny(missing_docs)]

//! # gigvault-core — Foundational Types for the Gigvault Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier and
//!    quantity is a distinct type. You cannot pass an [`Amount`] where an
//!    [`AccountId`] is expected, and an `Amount` is non-zero by construction.
//!
//! 2. **Validation at construction time.** Invalid values are rejected with
//!    a [`ValidationError`] when the value is built, not when it is used.
//!
//! 3. **UTC-only time.** All timestamps flow through [`Timestamp`], which
//!    serializes to a second-precision ISO 8601 string with a `Z` suffix.

pub mod amount;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::Amount;
pub use error::ValidationError;
pub use identity::AccountId;
pub use temporal::Timestamp;
