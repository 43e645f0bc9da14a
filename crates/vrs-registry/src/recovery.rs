//! # Recovery Requests
//!
//! The stolen-vehicle recovery sub-flow: the current owner of a stolen
//! vehicle files a request carrying a supporting document reference, and the
//! approval authority either approves (clearing the stolen flag) or declines
//! with a reason. Same request → authority-decision shape as ownership
//! transfers, but no funds are involved.

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, RecoveryRequestId, Timestamp, VehicleId};

use crate::error::RegistryError;

/// The status of a recovery request.
///
/// Status machine: `Pending → [Approved | Declined]`. Both outcomes are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecoveryStatus {
    /// Filed, awaiting authority review.
    Pending,
    /// Approved; the vehicle's stolen flag was cleared. Terminal state.
    Approved,
    /// Declined; the stolen flag stands. Terminal state.
    Declined,
}

impl RecoveryStatus {
    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Declined)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
        }
    }
}

impl std::fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to clear a vehicle's stolen flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryRequest {
    /// Sequential request identifier.
    pub id: RecoveryRequestId,
    /// The stolen vehicle.
    pub vehicle_id: VehicleId,
    /// The owner who filed the request.
    pub requested_by: AccountAddress,
    /// Reference to the supporting recovery document (e.g. a pinned file URI).
    pub document_uri: String,
    /// Current request status.
    pub status: RecoveryStatus,
    /// Reason given when declined.
    pub decline_reason: Option<String>,
    /// When the request was filed.
    pub requested_at: Timestamp,
    /// When the authority resolved the request.
    pub resolved_at: Option<Timestamp>,
}

impl RecoveryRequest {
    /// Create a new pending recovery request.
    pub fn new(
        id: RecoveryRequestId,
        vehicle_id: VehicleId,
        requested_by: AccountAddress,
        document_uri: String,
    ) -> Self {
        Self {
            id,
            vehicle_id,
            requested_by,
            document_uri,
            status: RecoveryStatus::Pending,
            decline_reason: None,
            requested_at: Timestamp::now(),
            resolved_at: None,
        }
    }

    /// Whether the request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == RecoveryStatus::Pending
    }

    /// Approve the request.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RecoveryAlreadyResolved`] unless pending.
    pub fn approve(&mut self) -> Result<(), RegistryError> {
        self.ensure_pending()?;
        self.status = RecoveryStatus::Approved;
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }

    /// Decline the request with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RecoveryAlreadyResolved`] unless pending.
    pub fn decline(&mut self, reason: String) -> Result<(), RegistryError> {
        self.ensure_pending()?;
        self.status = RecoveryStatus::Declined;
        self.decline_reason = Some(reason);
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), RegistryError> {
        if self.status.is_terminal() {
            return Err(RegistryError::RecoveryAlreadyResolved {
                request_id: self.id,
                status: self.status.as_str().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_request() -> RecoveryRequest {
        RecoveryRequest::new(
            RecoveryRequestId::FIRST,
            VehicleId::FIRST,
            AccountAddress::new(format!("0x{:040x}", 0xa1)).unwrap(),
            "ipfs://bafy.../police-report.pdf".to_string(),
        )
    }

    #[test]
    fn new_request_is_pending() {
        let request = pending_request();
        assert!(request.is_pending());
        assert!(request.resolved_at.is_none());
    }

    #[test]
    fn approve_resolves() {
        let mut request = pending_request();
        request.approve().unwrap();
        assert_eq!(request.status, RecoveryStatus::Approved);
        assert!(request.resolved_at.is_some());
        assert!(!request.is_pending());
    }

    #[test]
    fn decline_records_reason() {
        let mut request = pending_request();
        request.decline("document illegible".to_string()).unwrap();
        assert_eq!(request.status, RecoveryStatus::Declined);
        assert_eq!(request.decline_reason.as_deref(), Some("document illegible"));
    }

    #[test]
    fn resolved_request_rejects_further_decisions() {
        let mut request = pending_request();
        request.approve().unwrap();
        assert!(request.approve().is_err());
        assert!(request.decline("late".to_string()).is_err());
    }

    #[test]
    fn status_strings() {
        assert_eq!(RecoveryStatus::Pending.as_str(), "PENDING");
        assert!(RecoveryStatus::Approved.is_terminal());
        assert!(RecoveryStatus::Declined.is_terminal());
        assert!(!RecoveryStatus::Pending.is_terminal());
    }
}
