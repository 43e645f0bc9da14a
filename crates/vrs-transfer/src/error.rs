//! # Transfer Error Types
//!
//! Structured error hierarchy for the transfer subsystem. Every variant
//! carries diagnostic context and classifies into exactly one [`ErrorKind`],
//! which the dashboard uses to pick a user-facing message category. All
//! failures are rejected synchronously at the point of mutation with no
//! partial effects.

use thiserror::Error;

use vrs_core::{AccountAddress, Amount, TransferRequestId, VehicleId, VehicleNo};

/// Classification of a transfer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller does not hold the role the operation requires.
    Authorization,
    /// The operation is invalid for the request's current state.
    State,
    /// Bad recipient, bad amount, or ineligible vehicle.
    Validation,
    /// The operation collides with an existing open request.
    Conflict,
}

/// Errors arising from transfer-ledger operations.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Caller is not the current owner of the vehicle.
    #[error("caller {caller} is not the current owner of vehicle {vehicle_id}")]
    NotOwner {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// The calling address.
        caller: AccountAddress,
    },

    /// Caller is not the prospective owner named on the request.
    #[error("caller {caller} is not the recipient of transfer request {request_id}")]
    NotRecipient {
        /// The request involved.
        request_id: TransferRequestId,
        /// The calling address.
        caller: AccountAddress,
    },

    /// Caller is not the government approval authority.
    #[error("caller {caller} is not the approval authority (operation: {operation})")]
    Unauthorized {
        /// The calling address.
        caller: AccountAddress,
        /// The attempted operation.
        operation: String,
    },

    /// The vehicle may not participate in a transfer (unapproved
    /// registration or reported stolen). Checked at creation AND re-checked
    /// at accept/approve time: a request created before a stolen report is
    /// void once the vehicle is flagged.
    #[error("vehicle {vehicle_id} is not eligible for transfer: {reason}")]
    VehicleNotEligible {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// Why the vehicle is ineligible.
        reason: String,
    },

    /// The named recipient cannot receive the transfer.
    #[error("recipient {recipient} is invalid: {reason}")]
    InvalidRecipient {
        /// The recipient address.
        recipient: AccountAddress,
        /// Why the recipient was rejected.
        reason: String,
    },

    /// Payment does not exactly match the agreed transfer amount.
    #[error(
        "payment {payment} does not match transfer amount {expected} for request {request_id}"
    )]
    AmountMismatch {
        /// The request involved.
        request_id: TransferRequestId,
        /// The agreed transfer amount.
        expected: Amount,
        /// The payment offered.
        payment: Amount,
    },

    /// No vehicle carries the given registration number.
    #[error("unknown vehicle number {0}")]
    UnknownVehicle(VehicleNo),

    /// No transfer request exists with the given identifier.
    #[error("unknown transfer request {0}")]
    UnknownRequest(TransferRequestId),

    /// The vehicle already has an open (not completed) transfer request.
    #[error("vehicle {vehicle_id} already has open transfer request {open_request}")]
    DuplicateRequest {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// The open request blocking a new one.
        open_request: TransferRequestId,
    },

    /// The request has already been accepted by the prospective owner.
    #[error("transfer request {0} has already been accepted")]
    AlreadyAccepted(TransferRequestId),

    /// The request has not yet been accepted, so it cannot be approved.
    #[error("transfer request {0} has not been accepted by the prospective owner")]
    NotAccepted(TransferRequestId),

    /// The request is completed terminal state and rejects all operations.
    #[error("transfer request {0} is already completed")]
    RequestCompleted(TransferRequestId),

    /// A transfer request references a vehicle id absent from the registry.
    /// Indicates a corrupted or hand-edited ledger snapshot rather than a
    /// caller mistake.
    #[error("transfer request {request_id} references unknown vehicle {vehicle_id}")]
    MissingVehicleRecord {
        /// The request involved.
        request_id: TransferRequestId,
        /// The dangling vehicle reference.
        vehicle_id: VehicleId,
    },

    /// Escrow record missing for an operation that requires one. Indicates
    /// a ledger invariant violation rather than a caller mistake.
    #[error("no escrow held for request {request_id} (operation: {operation})")]
    EscrowMissing {
        /// The request involved.
        request_id: TransferRequestId,
        /// The attempted escrow operation.
        operation: String,
    },

    /// Settlement balance arithmetic overflowed.
    #[error("settlement balance overflow for {address}")]
    BalanceOverflow {
        /// The address whose balance could not be credited.
        address: AccountAddress,
    },
}

impl TransferError {
    /// The failure classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } | Self::NotRecipient { .. } | Self::Unauthorized { .. } => {
                ErrorKind::Authorization
            }
            Self::AlreadyAccepted(_)
            | Self::NotAccepted(_)
            | Self::RequestCompleted(_)
            | Self::MissingVehicleRecord { .. }
            | Self::EscrowMissing { .. }
            | Self::BalanceOverflow { .. } => ErrorKind::State,
            Self::VehicleNotEligible { .. }
            | Self::InvalidRecipient { .. }
            | Self::AmountMismatch { .. }
            | Self::UnknownVehicle(_)
            | Self::UnknownRequest(_) => ErrorKind::Validation,
            Self::DuplicateRequest { .. } => ErrorKind::Conflict,
        }
    }
}
