#![deny(missing_docs)]

//! # vrs-transfer — Ownership Transfer & Escrow State Machine
//!
//! The core of the stack: a multi-party protocol coordinating a current
//! owner, a prospective owner, and the single government approval authority
//! around a vehicle record, with funds held in escrow pending approval.
//!
//! - **Requests** ([`request`]): the per-request state machine —
//!   `CREATED → ACCEPTED → COMPLETED`, with decline possible from either
//!   non-terminal state.
//!
//! - **Escrow** ([`escrow`]): funds held per request with an append-only
//!   transaction log. Funds leave escrow only via release (approve) or
//!   refund (decline).
//!
//! - **Events** ([`event`]): deterministic, exactly-once events per
//!   transition, consumed by the external notification/projection layer.
//!
//! - **Ledger** ([`ledger`]): the aggregate that serializes every mutating
//!   operation, evaluates the role guard uniformly, and re-validates all
//!   preconditions at write time.
//!
//! ## Security Invariant
//!
//! Completed requests are immutable terminal state and reject every further
//! operation. Approval applies its three effects — ownership move, escrow
//! release, terminal completion — atomically: preconditions are validated
//! in full before any state is touched.

pub mod error;
pub mod escrow;
pub mod event;
pub mod ledger;
pub mod request;

// Re-export primary types.
pub use error::{ErrorKind, TransferError};
pub use escrow::{EscrowEntry, EscrowLedger, EscrowTransaction};
pub use event::LedgerEvent;
pub use ledger::{Ledger, Role};
pub use request::{TransferRequest, TransferState};
