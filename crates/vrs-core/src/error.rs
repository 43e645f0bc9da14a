//! # Validation Errors
//!
//! Format failures for the domain-primitive newtypes. Each variant carries
//! the invalid input and the expected format so that operators can diagnose
//! misconfiguration without guesswork.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Account address is not `0x` followed by 40 hexadecimal digits.
    #[error("invalid account address: \"{0}\" (expected 0x followed by 40 hex digits)")]
    InvalidAddress(String),

    /// Registration plate does not match the LETTERS-DIGITS pattern.
    #[error("invalid vehicle number: \"{0}\" (expected letters-digits, e.g. ABC-123)")]
    InvalidVehicleNo(String),

    /// CNIC does not conform to the 13-digit national identity format.
    #[error("invalid CNIC format: \"{0}\" (expected 13 digits, optionally as XXXXX-XXXXXXX-X)")]
    InvalidCnic(String),

    /// Monetary amount string is not a non-negative integer in smallest
    /// currency units.
    #[error("invalid monetary amount: \"{0}\" (expected non-negative integer in smallest units)")]
    InvalidAmount(String),

    /// Amount arithmetic overflowed the representable range.
    #[error("amount arithmetic overflow: {lhs} + {rhs}")]
    AmountOverflow {
        /// Left operand of the failed addition.
        lhs: String,
        /// Right operand of the failed addition.
        rhs: String,
    },

    /// Ledger identifier is zero; ledger identifiers are 1-based.
    #[error("invalid ledger identifier: 0 (identifiers are 1-based)")]
    ZeroIdentifier,
}
