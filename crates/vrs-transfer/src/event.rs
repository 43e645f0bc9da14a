//! # Ledger Events
//!
//! One event per successful state transition, appended to the ledger's event
//! log in operation order. The external notification/projection layer drains
//! the log to mirror on-chain state into its secondary store and email the
//! involved parties. The ledger's only obligation is to emit each event
//! deterministically and exactly once per transition — failed operations
//! emit nothing.

use serde::{Deserialize, Serialize};

use vrs_core::{
    AccountAddress, Amount, RecoveryRequestId, TransferRequestId, UserId, VehicleId,
};

/// An observable ledger state transition.
///
/// Externally tagged in JSON: each event is an object with a single
/// snake_case key naming the transition, e.g.
/// `{"ownership_transfer_accepted": {"request_id": 1, "escrowed": 100}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A user account was registered.
    UserRegistered {
        /// The new account's identifier.
        user_id: UserId,
        /// The new account's wallet.
        wallet: AccountAddress,
    },
    /// A user account was approved by the authority.
    UserApproved {
        /// The approved account's wallet.
        wallet: AccountAddress,
    },
    /// A user account was declined by the authority.
    UserDeclined {
        /// The declined account's wallet.
        wallet: AccountAddress,
        /// The reason given.
        reason: String,
    },
    /// A vehicle was registered.
    VehicleRegistered {
        /// The new vehicle's identifier.
        vehicle_id: VehicleId,
        /// The registering owner.
        owner: AccountAddress,
    },
    /// A vehicle registration was approved by the authority.
    VehicleApproved {
        /// The approved vehicle.
        vehicle_id: VehicleId,
    },
    /// A vehicle registration was declined by the authority.
    VehicleDeclined {
        /// The declined vehicle.
        vehicle_id: VehicleId,
        /// The reason given.
        reason: String,
    },
    /// A vehicle was reported stolen by its owner.
    VehicleReportedStolen {
        /// The stolen vehicle.
        vehicle_id: VehicleId,
        /// The reporting owner.
        owner: AccountAddress,
    },
    /// A recovery request was filed for a stolen vehicle.
    RecoveryRequested {
        /// The new request's identifier.
        request_id: RecoveryRequestId,
        /// The stolen vehicle.
        vehicle_id: VehicleId,
    },
    /// A recovery request was approved; the stolen flag is cleared.
    VehicleRecovered {
        /// The resolved request.
        request_id: RecoveryRequestId,
        /// The recovered vehicle.
        vehicle_id: VehicleId,
    },
    /// A recovery request was declined; the stolen flag stands.
    RecoveryDeclined {
        /// The resolved request.
        request_id: RecoveryRequestId,
        /// The still-stolen vehicle.
        vehicle_id: VehicleId,
        /// The reason given.
        reason: String,
    },
    /// An ownership transfer was requested by the current owner.
    OwnershipTransferRequested {
        /// The new request's identifier.
        request_id: TransferRequestId,
        /// The vehicle being transferred.
        vehicle_id: VehicleId,
        /// The prospective owner.
        new_owner: AccountAddress,
        /// The agreed price.
        amount: Amount,
    },
    /// The prospective owner accepted and paid into escrow.
    OwnershipTransferAccepted {
        /// The accepted request.
        request_id: TransferRequestId,
        /// The amount now held in escrow.
        escrowed: Amount,
    },
    /// The authority approved the transfer; escrow released to the seller.
    OwnershipTransferApproved {
        /// The approved request.
        request_id: TransferRequestId,
        /// The amount released to the seller.
        released: Amount,
    },
    /// The authority declined the transfer; any escrow refunded.
    OwnershipTransferDeclined {
        /// The declined request.
        request_id: TransferRequestId,
        /// The amount refunded to the prospective owner.
        refunded: Amount,
        /// The reason given.
        reason: String,
    },
    /// Ownership moved on the vehicle record. Emitted with approval,
    /// carrying both parties for the projection layer's history view.
    OwnershipTransferred {
        /// The vehicle that changed hands.
        vehicle_id: VehicleId,
        /// The previous owner.
        previous_owner: AccountAddress,
        /// The new owner.
        new_owner: AccountAddress,
    },
}
