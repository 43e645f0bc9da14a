//! # Registry Stores
//!
//! In-memory repositories for accounts, vehicles, and recovery requests.
//! Identifiers are sequential and 1-based, assigned in insertion order —
//! the single global order the surrounding ledger relies on. Uniqueness
//! (wallet, CNIC, registration plate) is enforced at insertion.
//!
//! Stores are pure repositories: they enforce record uniqueness and expose
//! lookups, while caller-role checks and cross-record preconditions belong
//! to the transfer ledger.

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, Cnic, RecoveryRequestId, UserId, VehicleId, VehicleNo};

use crate::account::UserAccount;
use crate::error::RegistryError;
use crate::recovery::RecoveryRequest;
use crate::vehicle::VehicleRecord;

/// Repository of registered user accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRegistry {
    accounts: Vec<UserAccount>,
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account in `Pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateWallet`] or
    /// [`RegistryError::DuplicateCnic`] if either identity is already
    /// registered.
    pub fn register(
        &mut self,
        wallet: AccountAddress,
        name: String,
        email: String,
        cnic: Cnic,
    ) -> Result<UserId, RegistryError> {
        if self.by_wallet(&wallet).is_some() {
            return Err(RegistryError::DuplicateWallet(wallet));
        }
        if self.accounts.iter().any(|a| a.cnic == cnic) {
            return Err(RegistryError::DuplicateCnic(cnic));
        }
        let id = self.accounts.last().map_or(UserId::FIRST, |a| a.id.next());
        self.accounts
            .push(UserAccount::new(id, wallet, name, email, cnic));
        Ok(id)
    }

    /// Look up an account by wallet address.
    pub fn by_wallet(&self, wallet: &AccountAddress) -> Option<&UserAccount> {
        self.accounts.iter().find(|a| &a.wallet == wallet)
    }

    /// Mutable lookup by wallet address.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownUser`] if no account exists.
    pub fn by_wallet_mut(
        &mut self,
        wallet: &AccountAddress,
    ) -> Result<&mut UserAccount, RegistryError> {
        self.accounts
            .iter_mut()
            .find(|a| &a.wallet == wallet)
            .ok_or_else(|| RegistryError::UnknownUser(wallet.clone()))
    }

    /// Whether a wallet belongs to a registered, government-approved account.
    pub fn is_approved(&self, wallet: &AccountAddress) -> bool {
        self.by_wallet(wallet).is_some_and(|a| a.is_approved())
    }

    /// Number of registered accounts.
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Iterate all accounts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &UserAccount> {
        self.accounts.iter()
    }
}

/// Repository of vehicle records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleRegistry {
    vehicles: Vec<VehicleRecord>,
}

impl VehicleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, unapproved vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateVehicleNo`] if the plate is taken.
    pub fn register(
        &mut self,
        vehicle_no: VehicleNo,
        make: String,
        model: String,
        model_year: u16,
        owner: AccountAddress,
    ) -> Result<VehicleId, RegistryError> {
        if self.by_number(&vehicle_no).is_some() {
            return Err(RegistryError::DuplicateVehicleNo(vehicle_no));
        }
        let id = self
            .vehicles
            .last()
            .map_or(VehicleId::FIRST, |v| v.id.next());
        self.vehicles.push(VehicleRecord::new(
            id, vehicle_no, make, model, model_year, owner,
        ));
        Ok(id)
    }

    /// Look up a vehicle by identifier.
    pub fn by_id(&self, id: VehicleId) -> Option<&VehicleRecord> {
        self.vehicles.get(id.value() as usize - 1)
    }

    /// Mutable lookup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownVehicle`] if no record exists.
    pub fn by_id_mut(&mut self, id: VehicleId) -> Result<&mut VehicleRecord, RegistryError> {
        self.vehicles
            .get_mut(id.value() as usize - 1)
            .ok_or(RegistryError::UnknownVehicle(id))
    }

    /// Look up a vehicle by registration plate.
    pub fn by_number(&self, vehicle_no: &VehicleNo) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| &v.vehicle_no == vehicle_no)
    }

    /// Whether any vehicle carries this registration plate.
    pub fn exists(&self, vehicle_no: &VehicleNo) -> bool {
        self.by_number(vehicle_no).is_some()
    }

    /// Number of registered vehicles.
    pub fn count(&self) -> usize {
        self.vehicles.len()
    }

    /// Iterate all vehicles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.vehicles.iter()
    }

    /// Identifiers of all vehicles currently flagged stolen.
    pub fn stolen_vehicles(&self) -> Vec<VehicleId> {
        self.vehicles
            .iter()
            .filter(|v| v.is_stolen)
            .map(|v| v.id)
            .collect()
    }
}

/// Append-only ledger of recovery requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoveryLedger {
    requests: Vec<RecoveryRequest>,
}

impl RecoveryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a new pending recovery request.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRecoveryRequest`] if the vehicle
    /// already has a pending request.
    pub fn file(
        &mut self,
        vehicle_id: VehicleId,
        requested_by: AccountAddress,
        document_uri: String,
    ) -> Result<RecoveryRequestId, RegistryError> {
        if let Some(pending) = self.pending_for_vehicle(vehicle_id) {
            return Err(RegistryError::DuplicateRecoveryRequest {
                vehicle_id,
                request_id: pending.id,
            });
        }
        let id = self
            .requests
            .last()
            .map_or(RecoveryRequestId::FIRST, |r| r.id.next());
        self.requests
            .push(RecoveryRequest::new(id, vehicle_id, requested_by, document_uri));
        Ok(id)
    }

    /// Look up a request by identifier.
    pub fn by_id(&self, id: RecoveryRequestId) -> Option<&RecoveryRequest> {
        self.requests.get(id.value() as usize - 1)
    }

    /// Mutable lookup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownRecoveryRequest`] if no request
    /// exists.
    pub fn by_id_mut(
        &mut self,
        id: RecoveryRequestId,
    ) -> Result<&mut RecoveryRequest, RegistryError> {
        self.requests
            .get_mut(id.value() as usize - 1)
            .ok_or(RegistryError::UnknownRecoveryRequest(id))
    }

    /// The pending request for a vehicle, if one exists.
    pub fn pending_for_vehicle(&self, vehicle_id: VehicleId) -> Option<&RecoveryRequest> {
        self.requests
            .iter()
            .find(|r| r.vehicle_id == vehicle_id && r.is_pending())
    }

    /// Number of filed requests.
    pub fn count(&self) -> usize {
        self.requests.len()
    }

    /// Iterate all requests in filing order.
    pub fn iter(&self) -> impl Iterator<Item = &RecoveryRequest> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("0x{:040x}", n)).unwrap()
    }

    fn cnic(tail: u8) -> Cnic {
        Cnic::new(format!("12345678901{:02}", tail)).unwrap()
    }

    // -- AccountRegistry --

    #[test]
    fn register_assigns_sequential_ids() {
        let mut registry = AccountRegistry::new();
        let first = registry
            .register(addr(1), "A".to_string(), "a@x.pk".to_string(), cnic(1))
            .unwrap();
        let second = registry
            .register(addr(2), "B".to_string(), "b@x.pk".to_string(), cnic(2))
            .unwrap();
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn duplicate_wallet_rejected() {
        let mut registry = AccountRegistry::new();
        registry
            .register(addr(1), "A".to_string(), "a@x.pk".to_string(), cnic(1))
            .unwrap();
        let result = registry.register(addr(1), "B".to_string(), "b@x.pk".to_string(), cnic(2));
        assert!(matches!(result, Err(RegistryError::DuplicateWallet(_))));
    }

    #[test]
    fn duplicate_cnic_rejected() {
        let mut registry = AccountRegistry::new();
        registry
            .register(addr(1), "A".to_string(), "a@x.pk".to_string(), cnic(1))
            .unwrap();
        let result = registry.register(addr(2), "B".to_string(), "b@x.pk".to_string(), cnic(1));
        assert!(matches!(result, Err(RegistryError::DuplicateCnic(_))));
    }

    #[test]
    fn is_approved_requires_approval() {
        let mut registry = AccountRegistry::new();
        registry
            .register(addr(1), "A".to_string(), "a@x.pk".to_string(), cnic(1))
            .unwrap();
        assert!(!registry.is_approved(&addr(1)));
        registry.by_wallet_mut(&addr(1)).unwrap().approve().unwrap();
        assert!(registry.is_approved(&addr(1)));
        assert!(!registry.is_approved(&addr(9))); // unregistered
    }

    // -- VehicleRegistry --

    fn plate(n: u16) -> VehicleNo {
        VehicleNo::new(format!("XAA-{n:03}")).unwrap()
    }

    #[test]
    fn vehicle_lookup_by_id_and_number() {
        let mut registry = VehicleRegistry::new();
        let id = registry
            .register(plate(1), "Toyota".to_string(), "Yaris".to_string(), 2022, addr(1))
            .unwrap();
        assert_eq!(registry.by_id(id).unwrap().vehicle_no, plate(1));
        assert_eq!(registry.by_number(&plate(1)).unwrap().id, id);
        assert!(registry.exists(&plate(1)));
        assert!(!registry.exists(&plate(2)));
    }

    #[test]
    fn duplicate_plate_rejected() {
        let mut registry = VehicleRegistry::new();
        registry
            .register(plate(1), "Toyota".to_string(), "Yaris".to_string(), 2022, addr(1))
            .unwrap();
        let result =
            registry.register(plate(1), "Honda".to_string(), "City".to_string(), 2023, addr(2));
        assert!(matches!(result, Err(RegistryError::DuplicateVehicleNo(_))));
    }

    #[test]
    fn unknown_vehicle_lookup_fails() {
        let mut registry = VehicleRegistry::new();
        let missing = VehicleId::new(42).unwrap();
        assert!(registry.by_id(missing).is_none());
        assert!(matches!(
            registry.by_id_mut(missing),
            Err(RegistryError::UnknownVehicle(_))
        ));
    }

    #[test]
    fn stolen_vehicles_listing() {
        let mut registry = VehicleRegistry::new();
        let a = registry
            .register(plate(1), "Toyota".to_string(), "Yaris".to_string(), 2022, addr(1))
            .unwrap();
        let b = registry
            .register(plate(2), "Honda".to_string(), "City".to_string(), 2023, addr(1))
            .unwrap();
        for id in [a, b] {
            registry.by_id_mut(id).unwrap().approve().unwrap();
        }
        registry.by_id_mut(b).unwrap().report_stolen().unwrap();
        assert_eq!(registry.stolen_vehicles(), vec![b]);
    }

    // -- RecoveryLedger --

    #[test]
    fn one_pending_recovery_per_vehicle() {
        let mut ledger = RecoveryLedger::new();
        let vehicle = VehicleId::FIRST;
        ledger
            .file(vehicle, addr(1), "ipfs://doc1".to_string())
            .unwrap();
        let result = ledger.file(vehicle, addr(1), "ipfs://doc2".to_string());
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRecoveryRequest { .. })
        ));
    }

    #[test]
    fn resolved_request_allows_refiling() {
        let mut ledger = RecoveryLedger::new();
        let vehicle = VehicleId::FIRST;
        let first = ledger
            .file(vehicle, addr(1), "ipfs://doc1".to_string())
            .unwrap();
        ledger
            .by_id_mut(first)
            .unwrap()
            .decline("insufficient evidence".to_string())
            .unwrap();
        assert!(ledger.pending_for_vehicle(vehicle).is_none());
        let second = ledger
            .file(vehicle, addr(1), "ipfs://doc2".to_string())
            .unwrap();
        assert_eq!(second.value(), 2);
    }
}
