//! # Transfer Request State Machine
//!
//! The per-request lifecycle:
//!
//! ```text
//! CREATED --accept+pay--> ACCEPTED --approve--> COMPLETED(success)
//! CREATED --decline--> COMPLETED(declined, no funds moved)
//! ACCEPTED --decline--> COMPLETED(declined, refunded)
//! ```
//!
//! No transition exists out of COMPLETED. CREATED and ACCEPTED are the only
//! non-terminal states.
//!
//! ## Security Invariant
//!
//! Every mutating method checks `completed` first: a completed request is
//! immutable terminal state regardless of which operation is attempted.

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, Amount, Timestamp, TransferRequestId, VehicleId};

use crate::error::TransferError;

/// The observable state of a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferState {
    /// Requested by the current owner; awaiting the prospective owner.
    Created,
    /// Accepted and paid by the prospective owner; awaiting the authority.
    Accepted,
    /// Resolved — approved or declined. Terminal state.
    Completed,
}

impl TransferState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Accepted => "ACCEPTED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for TransferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ownership-transfer request.
///
/// ## Invariants
///
/// - `approved ⇒ completed` — approval is the action that completes the
///   transfer atomically.
/// - `escrowed_amount > 0 ⇒ new_owner_accepted`.
/// - `current_owner ≠ new_owner` always (enforced at creation).
/// - Once `completed`, the request is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Sequential request identifier.
    pub request_id: TransferRequestId,
    /// The vehicle being transferred.
    pub vehicle_id: VehicleId,
    /// The owner at creation time.
    pub current_owner: AccountAddress,
    /// The prospective owner.
    pub new_owner: AccountAddress,
    /// The agreed price in smallest currency units.
    pub transfer_amount: Amount,
    /// Whether the prospective owner has accepted and paid.
    pub new_owner_accepted: bool,
    /// Funds currently escrowed against this request.
    pub escrowed_amount: Amount,
    /// Whether the authority approved the transfer.
    pub approved: bool,
    /// Whether the request has reached terminal state.
    pub completed: bool,
    /// Reason given when declined.
    pub decline_reason: Option<String>,
    /// When the request was created.
    pub created_at: Timestamp,
    /// When the authority resolved the request.
    pub resolved_at: Option<Timestamp>,
}

impl TransferRequest {
    /// Create a new request in the CREATED state.
    ///
    /// Cross-record preconditions (ownership, vehicle eligibility, recipient
    /// approval, open-request uniqueness) are the ledger's responsibility;
    /// this constructor only records the captured facts.
    pub fn new(
        request_id: TransferRequestId,
        vehicle_id: VehicleId,
        current_owner: AccountAddress,
        new_owner: AccountAddress,
        transfer_amount: Amount,
    ) -> Self {
        Self {
            request_id,
            vehicle_id,
            current_owner,
            new_owner,
            transfer_amount,
            new_owner_accepted: false,
            escrowed_amount: Amount::ZERO,
            approved: false,
            completed: false,
            decline_reason: None,
            created_at: Timestamp::now(),
            resolved_at: None,
        }
    }

    /// The current observable state.
    pub fn state(&self) -> TransferState {
        if self.completed {
            TransferState::Completed
        } else if self.new_owner_accepted {
            TransferState::Accepted
        } else {
            TransferState::Created
        }
    }

    /// Whether the request is open (not completed).
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Record the prospective owner's acceptance and payment.
    ///
    /// Transitions CREATED → ACCEPTED. The payment must exactly equal the
    /// agreed transfer amount — no over- or under-payment is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::RequestCompleted`] on a terminal request,
    /// [`TransferError::AlreadyAccepted`] on a double-accept, and
    /// [`TransferError::AmountMismatch`] if the payment differs from the
    /// agreed amount.
    pub fn accept(&mut self, payment: Amount) -> Result<(), TransferError> {
        self.ensure_open()?;
        if self.new_owner_accepted {
            return Err(TransferError::AlreadyAccepted(self.request_id));
        }
        if payment != self.transfer_amount {
            return Err(TransferError::AmountMismatch {
                request_id: self.request_id,
                expected: self.transfer_amount,
                payment,
            });
        }
        self.new_owner_accepted = true;
        self.escrowed_amount = payment;
        Ok(())
    }

    /// Record the authority's approval.
    ///
    /// Transitions ACCEPTED → COMPLETED(success). The escrowed amount is
    /// zeroed here; the ledger releases the funds to the seller in the same
    /// atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::RequestCompleted`] on a terminal request and
    /// [`TransferError::NotAccepted`] if the prospective owner has not
    /// accepted.
    pub fn approve(&mut self) -> Result<(), TransferError> {
        self.ensure_open()?;
        if !self.new_owner_accepted {
            return Err(TransferError::NotAccepted(self.request_id));
        }
        self.escrowed_amount = Amount::ZERO;
        self.approved = true;
        self.completed = true;
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }

    /// Record the authority's decline.
    ///
    /// Transitions CREATED or ACCEPTED → COMPLETED(declined). Any escrowed
    /// amount is zeroed here; the ledger refunds the prospective owner in
    /// the same atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::RequestCompleted`] on a terminal request.
    pub fn decline(&mut self, reason: String) -> Result<(), TransferError> {
        self.ensure_open()?;
        self.escrowed_amount = Amount::ZERO;
        self.approved = false;
        self.completed = true;
        self.decline_reason = Some(reason);
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TransferError> {
        if self.completed {
            return Err(TransferError::RequestCompleted(self.request_id));
        }
        Ok(())
    }
}
