//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the stack. Each
//! identifier is a distinct type — you cannot pass a [`VehicleId`] where a
//! [`TransferRequestId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`AccountAddress`], [`VehicleNo`], [`Cnic`])
//! validate format at construction time and store a canonical form.
//! Sequential identifiers ([`VehicleId`], [`UserId`], [`TransferRequestId`],
//! [`RecoveryRequestId`]) are 1-based counters assigned in ledger order.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Sequential ledger identifiers (1-based, assigned in ledger order)
// ---------------------------------------------------------------------------

macro_rules! sequential_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            /// The first identifier in ledger order.
            pub const FIRST: Self = Self(1);

            /// Create from a raw counter value.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::ZeroIdentifier`] for 0; ledger
            /// identifiers are 1-based.
            pub fn new(value: u64) -> Result<Self, ValidationError> {
                if value == 0 {
                    return Err(ValidationError::ZeroIdentifier);
                }
                Ok(Self(value))
            }

            /// The raw counter value.
            pub fn value(&self) -> u64 {
                self.0
            }

            /// The identifier following this one in ledger order.
            pub fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

sequential_id!(
    /// A unique identifier for a registered vehicle.
    VehicleId
);

sequential_id!(
    /// A unique identifier for a registered user account.
    UserId
);

sequential_id!(
    /// A unique identifier for an ownership-transfer request.
    TransferRequestId
);

sequential_id!(
    /// A unique identifier for a stolen-vehicle recovery request.
    RecoveryRequestId
);

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// An account address: `0x` followed by 40 hexadecimal digits.
///
/// Input is accepted in any case and canonicalized to lowercase, so two
/// addresses that differ only in case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create an account address, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] if the string is not
    /// `0x` followed by exactly 40 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let lower = raw.trim().to_lowercase();
        let hex = match lower.strip_prefix("0x") {
            Some(rest) => rest,
            None => return Err(ValidationError::InvalidAddress(raw)),
        };
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress(raw));
        }
        Ok(Self(lower))
    }

    /// Access the canonical lowercase address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vehicle registration plate number.
///
/// Format: one or more letters, a dash, one or more digits (e.g. `ABC-123`).
/// Input letters are canonicalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleNo(String);

impl VehicleNo {
    /// Create a vehicle number, validating the letters-dash-digits format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidVehicleNo`] if the format is
    /// invalid.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();
        let (letters, digits) = match upper.split_once('-') {
            Some(parts) => parts,
            None => return Err(ValidationError::InvalidVehicleNo(raw)),
        };
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidVehicleNo(raw));
        }
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidVehicleNo(raw));
        }
        Ok(Self(upper))
    }

    /// Access the canonical uppercase plate string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Computerized National Identity Card (CNIC) number.
///
/// The canonical storage format is 13 digits without dashes. The constructor
/// accepts both:
/// - `"1234567890123"` (13 digits)
/// - `"12345-6789012-3"` (formatted with dashes: 5-7-1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cnic(String);

impl Cnic {
    /// Create a CNIC from a string value, validating format.
    ///
    /// Stores in the canonical 13-digit format (dashes stripped).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCnic`] if the format is invalid.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits: String = raw.chars().filter(|c| *c != '-').collect();

        if digits.len() != 13 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCnic(raw));
        }

        // If dashes were present, validate the pattern is 5-7-1.
        if raw.contains('-') {
            let parts: Vec<&str> = raw.split('-').collect();
            if parts.len() != 3 || parts[0].len() != 5 || parts[1].len() != 7 || parts[2].len() != 1
            {
                return Err(ValidationError::InvalidCnic(raw));
            }
        }

        Ok(Self(digits))
    }

    /// Access the CNIC in canonical 13-digit format (no dashes).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the CNIC in formatted form: XXXXX-XXXXXXX-X.
    pub fn formatted(&self) -> String {
        format!("{}-{}-{}", &self.0[..5], &self.0[5..12], &self.0[12..])
    }
}

impl std::fmt::Display for Cnic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- Sequential identifiers --

    #[test]
    fn sequential_ids_are_one_based() {
        assert!(VehicleId::new(0).is_err());
        assert_eq!(VehicleId::new(1).unwrap(), VehicleId::FIRST);
        assert_eq!(TransferRequestId::FIRST.value(), 1);
    }

    #[test]
    fn sequential_id_next() {
        let id = TransferRequestId::FIRST;
        assert_eq!(id.next().value(), 2);
        assert_eq!(id.next().next().value(), 3);
    }

    #[test]
    fn sequential_id_display() {
        assert_eq!(format!("{}", RecoveryRequestId::new(7).unwrap()), "7");
    }

    // -- AccountAddress --

    #[test]
    fn address_valid() {
        let addr = AccountAddress::new("0xb9c5714089478a327f09197987f16f9e5d936e8a").unwrap();
        assert_eq!(addr.as_str(), "0xb9c5714089478a327f09197987f16f9e5d936e8a");
    }

    #[test]
    fn address_canonicalized_to_lowercase() {
        let upper = AccountAddress::new("0xB9C5714089478A327F09197987F16F9E5D936E8A").unwrap();
        let lower = AccountAddress::new("0xb9c5714089478a327f09197987f16f9e5d936e8a").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn address_rejects_invalid() {
        assert!(AccountAddress::new("").is_err());
        assert!(AccountAddress::new("b9c5714089478a327f09197987f16f9e5d936e8a").is_err()); // no 0x
        assert!(AccountAddress::new("0xb9c5").is_err()); // too short
        assert!(AccountAddress::new("0xZZc5714089478a327f09197987f16f9e5d936e8a").is_err());
    }

    // -- VehicleNo --

    #[test]
    fn vehicle_no_valid() {
        let no = VehicleNo::new("ABC-123").unwrap();
        assert_eq!(no.as_str(), "ABC-123");
    }

    #[test]
    fn vehicle_no_uppercased() {
        let no = VehicleNo::new("abc-123").unwrap();
        assert_eq!(no.as_str(), "ABC-123");
    }

    #[test]
    fn vehicle_no_rejects_invalid() {
        assert!(VehicleNo::new("").is_err());
        assert!(VehicleNo::new("ABC123").is_err()); // no dash
        assert!(VehicleNo::new("-123").is_err()); // empty letters
        assert!(VehicleNo::new("ABC-").is_err()); // empty digits
        assert!(VehicleNo::new("AB1-123").is_err()); // digit in letters
        assert!(VehicleNo::new("ABC-12x").is_err()); // letter in digits
    }

    // -- CNIC --

    #[test]
    fn cnic_valid_13_digits() {
        let cnic = Cnic::new("1234567890123").unwrap();
        assert_eq!(cnic.as_str(), "1234567890123");
    }

    #[test]
    fn cnic_valid_formatted() {
        let cnic = Cnic::new("12345-6789012-3").unwrap();
        assert_eq!(cnic.as_str(), "1234567890123"); // stored without dashes
        assert_eq!(cnic.formatted(), "12345-6789012-3");
    }

    #[test]
    fn cnic_rejects_invalid() {
        assert!(Cnic::new("").is_err());
        assert!(Cnic::new("123456789012").is_err()); // 12 digits
        assert!(Cnic::new("12345678901234").is_err()); // 14 digits
        assert!(Cnic::new("12345-678901-23").is_err()); // wrong dash pattern
        assert!(Cnic::new("1234a67890123").is_err()); // non-digit
    }

    // -- Property tests --

    proptest! {
        #[test]
        fn address_roundtrip_any_case(hex in "[0-9a-fA-F]{40}") {
            let addr = AccountAddress::new(format!("0x{hex}")).unwrap();
            prop_assert_eq!(addr.as_str(), format!("0x{}", hex.to_lowercase()));
        }

        #[test]
        fn vehicle_no_roundtrip(letters in "[A-Z]{1,4}", digits in "[0-9]{1,4}") {
            let no = VehicleNo::new(format!("{letters}-{digits}")).unwrap();
            prop_assert_eq!(no.as_str(), format!("{letters}-{digits}"));
        }

        #[test]
        fn cnic_dashed_and_plain_agree(digits in "[0-9]{13}") {
            let plain = Cnic::new(digits.clone()).unwrap();
            let dashed = Cnic::new(format!(
                "{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..]
            )).unwrap();
            prop_assert_eq!(plain, dashed);
        }
    }
}
