#![deny(missing_docs)]

//! # vrs-registry — Authoritative Registries
//!
//! The record stores the transfer ledger consumes:
//!
//! - **Accounts** ([`account`]): user-account lifecycle from registration
//!   through government approval or decline.
//!
//! - **Vehicles** ([`vehicle`]): vehicle records with registration approval,
//!   the stolen flag, and append-only ownership and stolen history.
//!
//! - **Recovery** ([`recovery`]): the stolen-vehicle recovery sub-flow —
//!   same request → authority-decision shape as ownership transfers, but
//!   with no escrow.
//!
//! - **Stores** ([`store`]): in-memory repositories with sequential,
//!   ledger-ordered identifier assignment and uniqueness indexes.
//!
//! Record methods enforce per-record state transitions. Caller-role checks
//! and cross-record preconditions are the transfer ledger's responsibility:
//! it is the single transactional boundary for every mutating operation.

pub mod account;
pub mod error;
pub mod recovery;
pub mod store;
pub mod vehicle;

// Re-export primary types.
pub use account::{AccountStatus, UserAccount};
pub use error::RegistryError;
pub use recovery::{RecoveryRequest, RecoveryStatus};
pub use store::{AccountRegistry, RecoveryLedger, VehicleRegistry};
pub use vehicle::{OwnershipEntry, StolenEntry, VehicleRecord};
