#![deny(missing_docs)]

//! # vrs-core — Foundational Types for the Vehicle Registration Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `thiserror`,
//! and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`VehicleId`] where a
//!    [`TransferRequestId`] is expected.
//!
//! 2. **Sequential ledger identifiers.** Vehicle, transfer-request, and
//!    recovery-request identifiers are 1-based sequential counters assigned
//!    by the ledger, matching the single global order of operations.
//!
//! 3. **Integer amounts only.** [`Amount`] is a non-negative integer in the
//!    smallest currency unit with checked arithmetic. No floats anywhere.
//!
//! 4. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`
//!    — no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod amount;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::Amount;
pub use error::ValidationError;
pub use identity::{
    AccountAddress, Cnic, RecoveryRequestId, TransferRequestId, UserId, VehicleId, VehicleNo,
};
pub use temporal::Timestamp;
