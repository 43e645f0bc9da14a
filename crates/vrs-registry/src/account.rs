//! # User Account Lifecycle
//!
//! User accounts move `Pending → Approved` or `Pending → Declined` under the
//! government approval authority. Only approved accounts may own vehicles or
//! receive ownership transfers.

use serde::{Deserialize, Serialize};

use vrs_core::{AccountAddress, Cnic, Timestamp, UserId};

use crate::error::RegistryError;

/// The approval status of a user account.
///
/// Status machine: `Pending → [Approved | Declined]`. Both outcomes are
/// terminal; a declined account must re-register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Registered, awaiting government review.
    Pending,
    /// Approved by the government. Terminal state.
    Approved,
    /// Declined by the government. Terminal state.
    Declined,
}

impl AccountStatus {
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

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Sequential user identifier.
    pub id: UserId,
    /// The account's wallet address.
    pub wallet: AccountAddress,
    /// Full name.
    pub name: String,
    /// Contact email, consumed by the external notification layer.
    pub email: String,
    /// National identity number.
    pub cnic: Cnic,
    /// Current approval status.
    pub status: AccountStatus,
    /// Reason given when declined.
    pub decline_reason: Option<String>,
    /// When the account registered.
    pub registered_at: Timestamp,
}

impl UserAccount {
    /// Create a new account in `Pending` status.
    pub fn new(
        id: UserId,
        wallet: AccountAddress,
        name: String,
        email: String,
        cnic: Cnic,
    ) -> Self {
        Self {
            id,
            wallet,
            name,
            email,
            cnic,
            status: AccountStatus::Pending,
            decline_reason: None,
            registered_at: Timestamp::now(),
        }
    }

    /// Whether the account is government-approved.
    pub fn is_approved(&self) -> bool {
        self.status == AccountStatus::Approved
    }

    /// Approve the account.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidAccountStatus`] unless the account
    /// is `Pending`.
    pub fn approve(&mut self) -> Result<(), RegistryError> {
        if self.status != AccountStatus::Pending {
            return Err(RegistryError::InvalidAccountStatus {
                wallet: self.wallet.clone(),
                operation: "approve".to_string(),
                status: self.status.as_str().to_string(),
            });
        }
        self.status = AccountStatus::Approved;
        Ok(())
    }

    /// Decline the account with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidAccountStatus`] unless the account
    /// is `Pending`.
    pub fn decline(&mut self, reason: String) -> Result<(), RegistryError> {
        if self.status != AccountStatus::Pending {
            return Err(RegistryError::InvalidAccountStatus {
                wallet: self.wallet.clone(),
                operation: "decline".to_string(),
                status: self.status.as_str().to_string(),
            });
        }
        self.status = AccountStatus::Declined;
        self.decline_reason = Some(reason);
        Ok(())
    }
}
