//! # vrs-cli — CLI Tool for the Vehicle Registration Stack
//!
//! Provides the `vrs` command-line interface over a JSON ledger snapshot
//! file. Every mutating command loads the snapshot, applies one ledger
//! operation, and writes the snapshot back; the snapshot file is the single
//! serialization point for local use.
//!
//! ## Subcommands
//!
//! - `vrs init` — Create a new ledger snapshot governed by an authority.
//! - `vrs registry` — User/vehicle registration, approval, stolen reporting,
//!   and the recovery sub-flow.
//! - `vrs transfer` — The ownership-transfer escrow lifecycle.
//! - `vrs show` — Read-only queries: records, histories, balances, events.
//!
//! ```bash
//! vrs init --authority 0x00..90
//! vrs registry register-user --wallet 0x00..a1 --name "Ayesha Khan" \
//!     --email ayesha@example.com --cnic 12345-6789012-3
//! vrs transfer request --vehicle-no ABC-123 --new-owner 0x00..b2 \
//!     --amount 100 --caller 0x00..a1
//! ```

pub mod registry;
pub mod show;
pub mod snapshot;
pub mod transfer;

use anyhow::{Context, Result};

use vrs_core::AccountAddress;

/// Parse a caller/recipient address argument.
pub fn parse_address(value: &str) -> Result<AccountAddress> {
    AccountAddress::new(value).with_context(|| format!("invalid account address: {value}"))
}
