//! # Vehicle Records
//!
//! The authoritative vehicle record: registration approval, the stolen flag,
//! and append-only ownership and stolen history. Ownership changes only
//! through an approved transfer; the stolen flag only through an owner's
//! report and the authority-approved recovery sub-flow.

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, Timestamp, VehicleId, VehicleNo};

use crate::error::RegistryError;

/// One entry in a vehicle's ownership history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipEntry {
    /// The owner during this period.
    pub owner: AccountAddress,
    /// When this owner acquired the vehicle.
    pub since: Timestamp,
}

/// One stolen-report entry in a vehicle's stolen history.
///
/// `recovered_at` is `None` while the report is open; recovery approval
/// closes the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StolenEntry {
    /// When the vehicle was reported stolen.
    pub reported_at: Timestamp,
    /// When the vehicle was recovered, if it has been.
    pub recovered_at: Option<Timestamp>,
}

/// An authoritative vehicle record.
///
/// ## Invariants
///
/// - `id` and `vehicle_no` are immutable after registration.
/// - `current_owner` changes only via [`transfer_owner`](Self::transfer_owner),
///   which appends to the ownership history.
/// - `is_stolen` is set by [`report_stolen`](Self::report_stolen) and cleared
///   only by [`recover`](Self::recover).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Sequential vehicle identifier.
    pub id: VehicleId,
    /// Registration plate number. Unique, immutable.
    pub vehicle_no: VehicleNo,
    /// Manufacturer name.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub model_year: u16,
    /// The current owner's wallet address.
    pub current_owner: AccountAddress,
    /// Whether the registration has been approved by the government.
    pub approved: bool,
    /// Reason given if the registration was declined.
    pub decline_reason: Option<String>,
    /// Whether the vehicle is currently reported stolen.
    pub is_stolen: bool,
    /// When the vehicle was registered.
    pub registered_at: Timestamp,
    /// Append-only ownership history, oldest first.
    pub ownership_history: Vec<OwnershipEntry>,
    /// Append-only stolen-report history, oldest first.
    pub stolen_history: Vec<StolenEntry>,
}

impl VehicleRecord {
    /// Create a new unapproved vehicle record owned by `owner`.
    ///
    /// The ownership history starts with the registering owner.
    pub fn new(
        id: VehicleId,
        vehicle_no: VehicleNo,
        make: String,
        model: String,
        model_year: u16,
        owner: AccountAddress,
    ) -> Self {
        let registered_at = Timestamp::now();
        Self {
            id,
            vehicle_no,
            make,
            model,
            model_year,
            current_owner: owner.clone(),
            approved: false,
            decline_reason: None,
            is_stolen: false,
            registered_at: registered_at.clone(),
            ownership_history: vec![OwnershipEntry {
                owner,
                since: registered_at,
            }],
            stolen_history: Vec::new(),
        }
    }

    /// Whether the vehicle may participate in an ownership transfer:
    /// approved by the government and not reported stolen.
    pub fn is_transfer_eligible(&self) -> bool {
        self.approved && !self.is_stolen
    }

    /// Approve the registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidVehicleState`] if already approved
    /// or previously declined.
    pub fn approve(&mut self) -> Result<(), RegistryError> {
        if self.approved {
            return Err(self.invalid_state("approve", "already approved"));
        }
        if self.decline_reason.is_some() {
            return Err(self.invalid_state("approve", "registration was declined"));
        }
        self.approved = true;
        Ok(())
    }

    /// Decline the registration with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidVehicleState`] if already approved
    /// or already declined.
    pub fn decline(&mut self, reason: String) -> Result<(), RegistryError> {
        if self.approved {
            return Err(self.invalid_state("decline", "already approved"));
        }
        if self.decline_reason.is_some() {
            return Err(self.invalid_state("decline", "already declined"));
        }
        self.decline_reason = Some(reason);
        Ok(())
    }

    /// Flag the vehicle as stolen and open a stolen-history entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidVehicleState`] if the vehicle is
    /// already flagged stolen or its registration is not approved.
    pub fn report_stolen(&mut self) -> Result<(), RegistryError> {
        if !self.approved {
            return Err(self.invalid_state("report_stolen", "registration not approved"));
        }
        if self.is_stolen {
            return Err(self.invalid_state("report_stolen", "already reported stolen"));
        }
        self.is_stolen = true;
        self.stolen_history.push(StolenEntry {
            reported_at: Timestamp::now(),
            recovered_at: None,
        });
        Ok(())
    }

    /// Clear the stolen flag and close the open stolen-history entry.
    ///
    /// Called only from an authority-approved recovery request.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidVehicleState`] if the vehicle is not
    /// currently flagged stolen.
    pub fn recover(&mut self) -> Result<(), RegistryError> {
        if !self.is_stolen {
            return Err(self.invalid_state("recover", "not reported stolen"));
        }
        self.is_stolen = false;
        if let Some(entry) = self
            .stolen_history
            .iter_mut()
            .rev()
            .find(|e| e.recovered_at.is_none())
        {
            entry.recovered_at = Some(Timestamp::now());
        }
        Ok(())
    }

    /// Move ownership to `new_owner`, appending to the ownership history.
    ///
    /// Called only from an approved ownership transfer; all transfer
    /// preconditions are validated by the ledger before this point.
    pub fn transfer_owner(&mut self, new_owner: AccountAddress) {
        self.current_owner = new_owner.clone();
        self.ownership_history.push(OwnershipEntry {
            owner: new_owner,
            since: Timestamp::now(),
        });
    }

    fn invalid_state(&self, operation: &str, reason: &str) -> RegistryError {
        RegistryError::InvalidVehicleState {
            vehicle_id: self.id,
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}
