//! # Escrow Ledger
//!
//! Funds held per transfer request, in custody of the ledger rather than of
//! either party. Funds enter at accept-and-pay and leave only through two
//! transitions: release to the seller (approve) or refund to the buyer
//! (decline). Every movement is appended to a transaction log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, Amount, Timestamp, TransferRequestId};

use crate::error::TransferError;

/// The kind of an escrow movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowEntry {
    /// Funds deposited by the prospective owner at accept-and-pay.
    Deposit,
    /// Funds released to the seller on approval.
    Release,
    /// Funds refunded to the buyer on decline.
    Refund,
}

impl std::fmt::Display for EscrowEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Release => "release",
            Self::Refund => "refund",
        };
        write!(f, "{s}")
    }
}

/// A recorded escrow movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowTransaction {
    /// The request the movement belongs to.
    pub request_id: TransferRequestId,
    /// The kind of movement.
    pub entry: EscrowEntry,
    /// The amount moved.
    pub amount: Amount,
    /// The counterparty: depositor for deposits, payee for release/refund.
    pub counterparty: AccountAddress,
    /// When the movement occurred.
    pub at: Timestamp,
}

/// Ledger of escrowed funds keyed by transfer request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscrowLedger {
    held: BTreeMap<TransferRequestId, Amount>,
    transactions: Vec<EscrowTransaction>,
}

impl EscrowLedger {
    /// Create an empty escrow ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Funds currently held for a request.
    pub fn held(&self, request_id: TransferRequestId) -> Amount {
        self.held.get(&request_id).copied().unwrap_or(Amount::ZERO)
    }

    /// The full movement log, oldest first.
    pub fn transactions(&self) -> &[EscrowTransaction] {
        &self.transactions
    }

    /// Take custody of a payment for a request.
    ///
    /// A zero deposit is recorded like any other: the movement log is the
    /// audit trail for zero-amount (gift) transfers too.
    pub fn deposit(
        &mut self,
        request_id: TransferRequestId,
        amount: Amount,
        depositor: AccountAddress,
    ) {
        *self.held.entry(request_id).or_insert(Amount::ZERO) = amount;
        self.transactions.push(EscrowTransaction {
            request_id,
            entry: EscrowEntry::Deposit,
            amount,
            counterparty: depositor,
            at: Timestamp::now(),
        });
    }

    /// Release the full held amount to the seller. Empties the escrow for
    /// the request and returns the released amount.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::EscrowMissing`] if no deposit was recorded
    /// for the request.
    pub fn release(
        &mut self,
        request_id: TransferRequestId,
        payee: AccountAddress,
    ) -> Result<Amount, TransferError> {
        self.drain(request_id, EscrowEntry::Release, payee)
    }

    /// Refund the full held amount to the buyer. Empties the escrow for the
    /// request and returns the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::EscrowMissing`] if no deposit was recorded
    /// for the request.
    pub fn refund(
        &mut self,
        request_id: TransferRequestId,
        payee: AccountAddress,
    ) -> Result<Amount, TransferError> {
        self.drain(request_id, EscrowEntry::Refund, payee)
    }

    fn drain(
        &mut self,
        request_id: TransferRequestId,
        entry: EscrowEntry,
        payee: AccountAddress,
    ) -> Result<Amount, TransferError> {
        let amount = self
            .held
            .remove(&request_id)
            .ok_or_else(|| TransferError::EscrowMissing {
                request_id,
                operation: entry.to_string(),
            })?;
        self.transactions.push(EscrowTransaction {
            request_id,
            entry,
            amount,
            counterparty: payee,
            at: Timestamp::now(),
        });
        Ok(amount)
    }
}
