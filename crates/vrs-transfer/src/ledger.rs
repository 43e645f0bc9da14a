//! # The Ledger
//!
//! The single transactional boundary for every mutating operation: registry
//! lifecycle, stolen reporting, the recovery sub-flow, and the ownership
//! transfer machine. Operations are serialized through `&mut self` — one
//! global order, the ledger's native serialization is the sole
//! concurrency-control mechanism.
//!
//! ## Security Invariant
//!
//! Every operation validates all preconditions against current state before
//! touching anything (read-then-validate-at-write: a stale read by the
//! caller is never trusted). If any precondition fails, no partial state
//! change is visible. Approval applies ownership move, escrow release, and
//! terminal completion as one atomic step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vrs_core::{
    AccountAddress, Amount, Cnic, RecoveryRequestId, TransferRequestId, UserId, VehicleId,
    VehicleNo,
};
use vrs_registry::{
    AccountRegistry, RecoveryLedger, RegistryError, VehicleRecord, VehicleRegistry,
};

use crate::error::TransferError;
use crate::escrow::EscrowLedger;
use crate::event::LedgerEvent;
use crate::request::TransferRequest;

/// The role a caller must hold for a mutating transfer operation.
///
/// Evaluated uniformly before any state is touched.
#[derive(Debug, Clone, Copy)]
pub enum Role<'a> {
    /// The current owner of the subject vehicle.
    Owner(&'a VehicleRecord),
    /// The prospective owner named on the subject request.
    ProspectiveOwner(&'a TransferRequest),
    /// The single government approval authority.
    Authority,
}

/// The vehicle-registration ledger.
///
/// Composes the registries, the transfer-request ledger, the escrow ledger,
/// credit-only settlement balances, and the event log. Serializable as a
/// whole for snapshot persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    authority: AccountAddress,
    accounts: AccountRegistry,
    vehicles: VehicleRegistry,
    recoveries: RecoveryLedger,
    transfers: Vec<TransferRequest>,
    escrow: EscrowLedger,
    balances: BTreeMap<AccountAddress, Amount>,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create an empty ledger governed by the given approval authority.
    pub fn new(authority: AccountAddress) -> Self {
        Self {
            authority,
            accounts: AccountRegistry::new(),
            vehicles: VehicleRegistry::new(),
            recoveries: RecoveryLedger::new(),
            transfers: Vec::new(),
            escrow: EscrowLedger::new(),
            balances: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    // ── Role guard ─────────────────────────────────────────────────────

    /// Evaluate the role guard for a mutating operation.
    ///
    /// # Errors
    ///
    /// Returns the role-specific authorization error: [`TransferError::NotOwner`],
    /// [`TransferError::NotRecipient`], or [`TransferError::Unauthorized`].
    fn guard(
        &self,
        role: Role<'_>,
        caller: &AccountAddress,
        operation: &str,
    ) -> Result<(), TransferError> {
        match role {
            Role::Owner(vehicle) => {
                if &vehicle.current_owner != caller {
                    return Err(TransferError::NotOwner {
                        vehicle_id: vehicle.id,
                        caller: caller.clone(),
                    });
                }
            }
            Role::ProspectiveOwner(request) => {
                if &request.new_owner != caller {
                    return Err(TransferError::NotRecipient {
                        request_id: request.request_id,
                        caller: caller.clone(),
                    });
                }
            }
            Role::Authority => {
                if caller != &self.authority {
                    return Err(TransferError::Unauthorized {
                        caller: caller.clone(),
                        operation: operation.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Authority guard for registry operations.
    fn guard_registry_authority(
        &self,
        caller: &AccountAddress,
        operation: &str,
    ) -> Result<(), RegistryError> {
        if caller != &self.authority {
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    // ── Account registry operations ────────────────────────────────────

    /// Register a new user account in `Pending` status.
    ///
    /// # Errors
    ///
    /// Returns a duplicate-wallet or duplicate-CNIC conflict.
    pub fn register_user(
        &mut self,
        wallet: AccountAddress,
        name: String,
        email: String,
        cnic: Cnic,
    ) -> Result<UserId, RegistryError> {
        let user_id = self.accounts.register(wallet.clone(), name, email, cnic)?;
        self.events.push(LedgerEvent::UserRegistered { user_id, wallet });
        Ok(user_id)
    }

    /// Approve a user account. Authority only.
    pub fn approve_user(
        &mut self,
        wallet: &AccountAddress,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "approve_user")?;
        self.accounts.by_wallet_mut(wallet)?.approve()?;
        self.events.push(LedgerEvent::UserApproved {
            wallet: wallet.clone(),
        });
        Ok(())
    }

    /// Decline a user account with a reason. Authority only.
    pub fn decline_user(
        &mut self,
        wallet: &AccountAddress,
        reason: String,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "decline_user")?;
        self.accounts.by_wallet_mut(wallet)?.decline(reason.clone())?;
        self.events.push(LedgerEvent::UserDeclined {
            wallet: wallet.clone(),
            reason,
        });
        Ok(())
    }

    // ── Vehicle registry operations ────────────────────────────────────

    /// Register a new, unapproved vehicle owned by `owner`.
    ///
    /// # Errors
    ///
    /// The owner must be a registered, government-approved account; the
    /// plate must be unused.
    pub fn register_vehicle(
        &mut self,
        vehicle_no: VehicleNo,
        make: String,
        model: String,
        model_year: u16,
        owner: AccountAddress,
    ) -> Result<VehicleId, RegistryError> {
        let account = self
            .accounts
            .by_wallet(&owner)
            .ok_or_else(|| RegistryError::UnknownUser(owner.clone()))?;
        if !account.is_approved() {
            return Err(RegistryError::InvalidAccountStatus {
                wallet: owner.clone(),
                operation: "register_vehicle".to_string(),
                status: account.status.as_str().to_string(),
            });
        }
        let vehicle_id = self
            .vehicles
            .register(vehicle_no, make, model, model_year, owner.clone())?;
        self.events
            .push(LedgerEvent::VehicleRegistered { vehicle_id, owner });
        Ok(vehicle_id)
    }

    /// Approve a vehicle registration. Authority only.
    pub fn approve_vehicle(
        &mut self,
        vehicle_id: VehicleId,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "approve_vehicle")?;
        self.vehicles.by_id_mut(vehicle_id)?.approve()?;
        self.events.push(LedgerEvent::VehicleApproved { vehicle_id });
        Ok(())
    }

    /// Decline a vehicle registration with a reason. Authority only.
    pub fn decline_vehicle(
        &mut self,
        vehicle_id: VehicleId,
        reason: String,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "decline_vehicle")?;
        self.vehicles.by_id_mut(vehicle_id)?.decline(reason.clone())?;
        self.events
            .push(LedgerEvent::VehicleDeclined { vehicle_id, reason });
        Ok(())
    }

    /// Report a vehicle stolen. Only the current owner may flag.
    ///
    /// Once stolen, no transfer request may be created or accepted for the
    /// vehicle, and any unaccepted open request is void at accept time.
    pub fn report_stolen(
        &mut self,
        vehicle_id: VehicleId,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        let vehicle = self
            .vehicles
            .by_id(vehicle_id)
            .ok_or(RegistryError::UnknownVehicle(vehicle_id))?;
        if &vehicle.current_owner != caller {
            return Err(RegistryError::NotOwner {
                vehicle_id,
                caller: caller.clone(),
            });
        }
        self.vehicles.by_id_mut(vehicle_id)?.report_stolen()?;
        tracing::warn!(%vehicle_id, owner = %caller, "vehicle reported stolen");
        self.events.push(LedgerEvent::VehicleReportedStolen {
            vehicle_id,
            owner: caller.clone(),
        });
        Ok(())
    }

    // ── Recovery sub-flow ──────────────────────────────────────────────

    /// File a recovery request for a stolen vehicle. Only the current owner
    /// may file, and only one pending request may exist per vehicle.
    pub fn request_vehicle_recovery(
        &mut self,
        vehicle_id: VehicleId,
        document_uri: String,
        caller: &AccountAddress,
    ) -> Result<RecoveryRequestId, RegistryError> {
        let vehicle = self
            .vehicles
            .by_id(vehicle_id)
            .ok_or(RegistryError::UnknownVehicle(vehicle_id))?;
        if &vehicle.current_owner != caller {
            return Err(RegistryError::NotOwner {
                vehicle_id,
                caller: caller.clone(),
            });
        }
        if !vehicle.is_stolen {
            return Err(RegistryError::InvalidVehicleState {
                vehicle_id,
                operation: "request_recovery".to_string(),
                reason: "not reported stolen".to_string(),
            });
        }
        let request_id = self
            .recoveries
            .file(vehicle_id, caller.clone(), document_uri)?;
        self.events.push(LedgerEvent::RecoveryRequested {
            request_id,
            vehicle_id,
        });
        Ok(request_id)
    }

    /// Approve a recovery request, clearing the vehicle's stolen flag.
    /// Authority only. Both effects are applied atomically.
    pub fn approve_recovery_request(
        &mut self,
        request_id: RecoveryRequestId,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "approve_recovery_request")?;
        let request = self
            .recoveries
            .by_id(request_id)
            .ok_or(RegistryError::UnknownRecoveryRequest(request_id))?;
        if !request.is_pending() {
            return Err(RegistryError::RecoveryAlreadyResolved {
                request_id,
                status: request.status.as_str().to_string(),
            });
        }
        let vehicle_id = request.vehicle_id;
        let vehicle = self
            .vehicles
            .by_id(vehicle_id)
            .ok_or(RegistryError::UnknownVehicle(vehicle_id))?;
        if !vehicle.is_stolen {
            return Err(RegistryError::InvalidVehicleState {
                vehicle_id,
                operation: "approve_recovery_request".to_string(),
                reason: "not reported stolen".to_string(),
            });
        }

        // All preconditions hold; apply both effects.
        self.recoveries.by_id_mut(request_id)?.approve()?;
        self.vehicles.by_id_mut(vehicle_id)?.recover()?;
        tracing::debug!(%request_id, %vehicle_id, "recovery request approved");
        self.events.push(LedgerEvent::VehicleRecovered {
            request_id,
            vehicle_id,
        });
        Ok(())
    }

    /// Decline a recovery request with a reason. Authority only. The stolen
    /// flag stands.
    pub fn decline_recovery_request(
        &mut self,
        request_id: RecoveryRequestId,
        reason: String,
        caller: &AccountAddress,
    ) -> Result<(), RegistryError> {
        self.guard_registry_authority(caller, "decline_recovery_request")?;
        let request = self.recoveries.by_id_mut(request_id)?;
        let vehicle_id = request.vehicle_id;
        request.decline(reason.clone())?;
        self.events.push(LedgerEvent::RecoveryDeclined {
            request_id,
            vehicle_id,
            reason,
        });
        Ok(())
    }

    // ── Ownership transfer operations ──────────────────────────────────

    /// Create an ownership-transfer request.
    ///
    /// # Errors
    ///
    /// - [`TransferError::UnknownVehicle`] — no vehicle carries the plate.
    /// - [`TransferError::NotOwner`] — caller does not own the vehicle.
    /// - [`TransferError::VehicleNotEligible`] — unapproved or stolen.
    /// - [`TransferError::DuplicateRequest`] — an open request exists.
    /// - [`TransferError::InvalidRecipient`] — self-transfer, unregistered,
    ///   or not government-approved.
    pub fn request_ownership_transfer(
        &mut self,
        vehicle_no: &VehicleNo,
        new_owner: AccountAddress,
        amount: Amount,
        caller: &AccountAddress,
    ) -> Result<TransferRequestId, TransferError> {
        let vehicle = self
            .vehicles
            .by_number(vehicle_no)
            .ok_or_else(|| TransferError::UnknownVehicle(vehicle_no.clone()))?;
        self.guard(Role::Owner(vehicle), caller, "request_ownership_transfer")?;
        Self::check_vehicle_eligible(vehicle)?;
        let vehicle_id = vehicle.id;
        if let Some(open) = self.open_request_for_vehicle(vehicle_id) {
            return Err(TransferError::DuplicateRequest {
                vehicle_id,
                open_request: open.request_id,
            });
        }
        if &new_owner == caller {
            return Err(TransferError::InvalidRecipient {
                recipient: new_owner,
                reason: "cannot transfer a vehicle to yourself".to_string(),
            });
        }
        match self.accounts.by_wallet(&new_owner) {
            None => {
                return Err(TransferError::InvalidRecipient {
                    recipient: new_owner,
                    reason: "recipient is not registered".to_string(),
                });
            }
            Some(account) if !account.is_approved() => {
                return Err(TransferError::InvalidRecipient {
                    recipient: new_owner,
                    reason: "recipient is not government-approved".to_string(),
                });
            }
            Some(_) => {}
        }

        let request_id = self
            .transfers
            .last()
            .map_or(TransferRequestId::FIRST, |r| r.request_id.next());
        self.transfers.push(TransferRequest::new(
            request_id,
            vehicle_id,
            caller.clone(),
            new_owner.clone(),
            amount,
        ));
        tracing::debug!(%request_id, %vehicle_id, %amount, "ownership transfer requested");
        self.events.push(LedgerEvent::OwnershipTransferRequested {
            request_id,
            vehicle_id,
            new_owner,
            amount,
        });
        Ok(request_id)
    }

    /// Accept a transfer and pay the agreed amount into escrow.
    ///
    /// Vehicle eligibility is re-checked here at write time: a request
    /// created before a stolen report is void at accept.
    ///
    /// # Errors
    ///
    /// - [`TransferError::UnknownRequest`] — no such request.
    /// - [`TransferError::NotRecipient`] — caller is not the prospective owner.
    /// - [`TransferError::RequestCompleted`] — terminal request.
    /// - [`TransferError::AlreadyAccepted`] — double accept.
    /// - [`TransferError::AmountMismatch`] — payment differs from the agreed
    ///   amount.
    /// - [`TransferError::VehicleNotEligible`] — the vehicle became stolen
    ///   since the request was created.
    pub fn accept_transfer_and_pay(
        &mut self,
        request_id: TransferRequestId,
        payment: Amount,
        caller: &AccountAddress,
    ) -> Result<(), TransferError> {
        let request = self.transfer_request_ref(request_id)?;
        self.guard(
            Role::ProspectiveOwner(request),
            caller,
            "accept_transfer_and_pay",
        )?;
        let vehicle = self.vehicles.by_id(request.vehicle_id).ok_or(
            TransferError::MissingVehicleRecord {
                request_id,
                vehicle_id: request.vehicle_id,
            },
        )?;
        if !vehicle.is_transfer_eligible() {
            tracing::warn!(
                %request_id,
                vehicle_id = %vehicle.id,
                "accept rejected: vehicle no longer eligible"
            );
            return Err(Self::ineligible(vehicle));
        }

        let request = self.transfer_request_mut(request_id)?;
        request.accept(payment)?;
        self.escrow.deposit(request_id, payment, caller.clone());
        tracing::debug!(%request_id, %payment, "transfer accepted, funds escrowed");
        self.events.push(LedgerEvent::OwnershipTransferAccepted {
            request_id,
            escrowed: payment,
        });
        Ok(())
    }

    /// Approve an accepted transfer. Authority only.
    ///
    /// Atomically: ownership moves to the prospective owner, escrow is
    /// released to the original owner's settlement balance, and the request
    /// reaches terminal success.
    pub fn approve_ownership_transfer(
        &mut self,
        request_id: TransferRequestId,
        caller: &AccountAddress,
    ) -> Result<(), TransferError> {
        self.guard(Role::Authority, caller, "approve_ownership_transfer")?;
        let request = self.transfer_request_ref(request_id)?;
        if request.completed {
            return Err(TransferError::RequestCompleted(request_id));
        }
        if !request.new_owner_accepted {
            return Err(TransferError::NotAccepted(request_id));
        }
        let vehicle_id = request.vehicle_id;
        let seller = request.current_owner.clone();
        let buyer = request.new_owner.clone();
        let vehicle = self
            .vehicles
            .by_id(vehicle_id)
            .ok_or(TransferError::MissingVehicleRecord {
                request_id,
                vehicle_id,
            })?;
        if !vehicle.is_transfer_eligible() {
            tracing::warn!(%request_id, %vehicle_id, "approve rejected: vehicle no longer eligible");
            return Err(Self::ineligible(vehicle));
        }
        // Pre-validate the settlement credit so no mutation can fail midway.
        let released = self.escrow.held(request_id);
        let new_seller_balance = self
            .balance(&seller)
            .checked_add(released)
            .map_err(|_| TransferError::BalanceOverflow {
                address: seller.clone(),
            })?;

        // All preconditions hold; apply the three effects as one step.
        self.transfer_request_mut(request_id)?.approve()?;
        self.escrow.release(request_id, seller.clone())?;
        self.balances.insert(seller.clone(), new_seller_balance);
        self.vehicles
            .by_id_mut(vehicle_id)
            .map_err(|_| TransferError::MissingVehicleRecord {
                request_id,
                vehicle_id,
            })?
            .transfer_owner(buyer.clone());
        tracing::debug!(%request_id, %vehicle_id, %released, "ownership transfer approved");
        self.events.push(LedgerEvent::OwnershipTransferApproved {
            request_id,
            released,
        });
        self.events.push(LedgerEvent::OwnershipTransferred {
            vehicle_id,
            previous_owner: seller,
            new_owner: buyer,
        });
        Ok(())
    }

    /// Decline a transfer with a reason. Authority only.
    ///
    /// Any escrowed funds are refunded in full to the prospective owner's
    /// settlement balance. Ownership is unchanged.
    pub fn decline_ownership_transfer(
        &mut self,
        request_id: TransferRequestId,
        reason: String,
        caller: &AccountAddress,
    ) -> Result<(), TransferError> {
        self.guard(Role::Authority, caller, "decline_ownership_transfer")?;
        let request = self.transfer_request_ref(request_id)?;
        if request.completed {
            return Err(TransferError::RequestCompleted(request_id));
        }
        let buyer = request.new_owner.clone();
        let was_accepted = request.new_owner_accepted;
        // Pre-validate the refund credit so no mutation can fail midway.
        let refunded = if was_accepted {
            self.escrow.held(request_id)
        } else {
            Amount::ZERO
        };
        let new_buyer_balance = self
            .balance(&buyer)
            .checked_add(refunded)
            .map_err(|_| TransferError::BalanceOverflow {
                address: buyer.clone(),
            })?;

        self.transfer_request_mut(request_id)?.decline(reason.clone())?;
        if was_accepted {
            self.escrow.refund(request_id, buyer.clone())?;
            self.balances.insert(buyer.clone(), new_buyer_balance);
        }
        tracing::debug!(%request_id, %refunded, "ownership transfer declined");
        self.events.push(LedgerEvent::OwnershipTransferDeclined {
            request_id,
            refunded,
            reason,
        });
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// The approval authority's address.
    pub fn authority(&self) -> &AccountAddress {
        &self.authority
    }

    /// The account registry.
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// The vehicle registry.
    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    /// The recovery-request ledger.
    pub fn recoveries(&self) -> &RecoveryLedger {
        &self.recoveries
    }

    /// Look up a transfer request.
    pub fn transfer_request(&self, request_id: TransferRequestId) -> Option<&TransferRequest> {
        self.transfers.get(request_id.value() as usize - 1)
    }

    /// Number of transfer requests ever created.
    pub fn transfer_request_count(&self) -> usize {
        self.transfers.len()
    }

    /// Iterate all transfer requests in creation order.
    pub fn transfer_requests(&self) -> impl Iterator<Item = &TransferRequest> {
        self.transfers.iter()
    }

    /// The open (not completed) request for a vehicle, if one exists.
    pub fn open_request_for_vehicle(&self, vehicle_id: VehicleId) -> Option<&TransferRequest> {
        self.transfers
            .iter()
            .find(|r| r.vehicle_id == vehicle_id && r.is_open())
    }

    /// Funds currently escrowed against a request.
    pub fn escrowed(&self, request_id: TransferRequestId) -> Amount {
        self.escrow.held(request_id)
    }

    /// The escrow movement log, oldest first.
    pub fn escrow_transactions(&self) -> &[crate::escrow::EscrowTransaction] {
        self.escrow.transactions()
    }

    /// The settlement balance credited to an address.
    pub fn balance(&self, address: &AccountAddress) -> Amount {
        self.balances.get(address).copied().unwrap_or(Amount::ZERO)
    }

    /// The undrained event log, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain the event log for the notification/projection layer. Each
    /// event is delivered exactly once across successive drains.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internal helpers ───────────────────────────────────────────────

    fn transfer_request_ref(
        &self,
        request_id: TransferRequestId,
    ) -> Result<&TransferRequest, TransferError> {
        self.transfer_request(request_id)
            .ok_or(TransferError::UnknownRequest(request_id))
    }

    fn transfer_request_mut(
        &mut self,
        request_id: TransferRequestId,
    ) -> Result<&mut TransferRequest, TransferError> {
        self.transfers
            .get_mut(request_id.value() as usize - 1)
            .ok_or(TransferError::UnknownRequest(request_id))
    }

    fn check_vehicle_eligible(vehicle: &VehicleRecord) -> Result<(), TransferError> {
        if !vehicle.is_transfer_eligible() {
            return Err(Self::ineligible(vehicle));
        }
        Ok(())
    }

    fn ineligible(vehicle: &VehicleRecord) -> TransferError {
        let reason = if vehicle.is_stolen {
            "reported stolen"
        } else {
            "registration not approved"
        };
        TransferError::VehicleNotEligible {
            vehicle_id: vehicle.id,
            reason: reason.to_string(),
        }
    }
}
