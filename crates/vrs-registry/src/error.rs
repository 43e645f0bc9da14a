//! # Registry Error Types
//!
//! Structured error hierarchy for registry operations. Every variant carries
//! diagnostic context: the record involved, the operation that failed, and
//! the state at the time of failure.

use thiserror::Error;

use vrs_core::{AccountAddress, Cnic, RecoveryRequestId, VehicleId, VehicleNo};

/// Classification of a registry failure, used by the dashboard to pick a
/// user-facing message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryErrorKind {
    /// The caller does not hold the role the operation requires.
    Authorization,
    /// The operation is not valid for the record's current state.
    State,
    /// A referenced record does not exist or an input is ineligible.
    Validation,
    /// The operation collides with an existing record.
    Conflict,
}

/// Errors arising from registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Caller is not the government approval authority.
    #[error("caller {caller} is not the approval authority (operation: {operation})")]
    Unauthorized {
        /// The calling address.
        caller: AccountAddress,
        /// The attempted operation.
        operation: String,
    },

    /// Caller is not the current owner of the vehicle.
    #[error("caller {caller} is not the current owner of vehicle {vehicle_id}")]
    NotOwner {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// The calling address.
        caller: AccountAddress,
    },

    /// No vehicle exists with the given identifier.
    #[error("unknown vehicle id {0}")]
    UnknownVehicle(VehicleId),

    /// No vehicle exists with the given registration number.
    #[error("unknown vehicle number {0}")]
    UnknownVehicleNo(VehicleNo),

    /// No user account exists for the given wallet address.
    #[error("unknown user wallet {0}")]
    UnknownUser(AccountAddress),

    /// No recovery request exists with the given identifier.
    #[error("unknown recovery request {0}")]
    UnknownRecoveryRequest(RecoveryRequestId),

    /// A vehicle with this registration number already exists.
    #[error("vehicle number {0} is already registered")]
    DuplicateVehicleNo(VehicleNo),

    /// A user account with this wallet address already exists.
    #[error("wallet {0} is already registered")]
    DuplicateWallet(AccountAddress),

    /// A user account with this CNIC already exists.
    #[error("CNIC {0} is already registered")]
    DuplicateCnic(Cnic),

    /// A pending recovery request already exists for the vehicle.
    #[error("vehicle {vehicle_id} already has a pending recovery request {request_id}")]
    DuplicateRecoveryRequest {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// The already-pending request.
        request_id: RecoveryRequestId,
    },

    /// Account is not in the status the operation requires.
    #[error("account {wallet} cannot perform {operation} in status {status}")]
    InvalidAccountStatus {
        /// The account's wallet address.
        wallet: AccountAddress,
        /// The attempted operation.
        operation: String,
        /// The current account status.
        status: String,
    },

    /// Vehicle is not in the state the operation requires (e.g. reporting a
    /// vehicle stolen twice, or recovering one that is not stolen).
    #[error("vehicle {vehicle_id} cannot perform {operation}: {reason}")]
    InvalidVehicleState {
        /// The vehicle involved.
        vehicle_id: VehicleId,
        /// The attempted operation.
        operation: String,
        /// Why the operation was rejected.
        reason: String,
    },

    /// Recovery request has already been approved or declined.
    #[error("recovery request {request_id} is already resolved ({status})")]
    RecoveryAlreadyResolved {
        /// The request involved.
        request_id: RecoveryRequestId,
        /// The resolved status.
        status: String,
    },
}

impl RegistryError {
    /// The failure classification for this error.
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::NotOwner { .. } => RegistryErrorKind::Authorization,
            Self::InvalidAccountStatus { .. }
            | Self::InvalidVehicleState { .. }
            | Self::RecoveryAlreadyResolved { .. } => RegistryErrorKind::State,
            Self::UnknownVehicle(_)
            | Self::UnknownVehicleNo(_)
            | Self::UnknownUser(_)
            | Self::UnknownRecoveryRequest(_) => RegistryErrorKind::Validation,
            Self::DuplicateVehicleNo(_)
            | Self::DuplicateWallet(_)
            | Self::DuplicateCnic(_)
            | Self::DuplicateRecoveryRequest { .. } => RegistryErrorKind::Conflict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("0x{:040x}", n)).unwrap()
    }

    #[test]
    fn unauthorized_display_and_kind() {
        let err = RegistryError::Unauthorized {
            caller: addr(1),
            operation: "approve_vehicle".to_string(),
        };
        assert!(format!("{err}").contains("approve_vehicle"));
        assert_eq!(err.kind(), RegistryErrorKind::Authorization);
    }

    #[test]
    fn not_owner_kind_is_authorization() {
        let err = RegistryError::NotOwner {
            vehicle_id: VehicleId::FIRST,
            caller: addr(2),
        };
        assert_eq!(err.kind(), RegistryErrorKind::Authorization);
    }

    #[test]
    fn duplicate_variants_are_conflicts() {
        let err = RegistryError::DuplicateVehicleNo(VehicleNo::new("ABC-123").unwrap());
        assert_eq!(err.kind(), RegistryErrorKind::Conflict);
        let err = RegistryError::DuplicateWallet(addr(3));
        assert_eq!(err.kind(), RegistryErrorKind::Conflict);
    }

    #[test]
    fn unknown_variants_are_validation() {
        let err = RegistryError::UnknownVehicle(VehicleId::FIRST);
        assert_eq!(err.kind(), RegistryErrorKind::Validation);
        assert!(format!("{err}").contains("unknown vehicle"));
    }

    #[test]
    fn state_variants_are_state() {
        let err = RegistryError::InvalidVehicleState {
            vehicle_id: VehicleId::FIRST,
            operation: "report_stolen".to_string(),
            reason: "already stolen".to_string(),
        };
        assert_eq!(err.kind(), RegistryErrorKind::State);
        assert!(format!("{err}").contains("already stolen"));
    }
}
