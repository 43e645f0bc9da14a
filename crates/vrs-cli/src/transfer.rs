//! # Transfer Subcommand
//!
//! The ownership-transfer escrow lifecycle against the ledger snapshot:
//! request by the current owner, accept-and-pay by the prospective owner,
//! and the authority's approve/decline decision.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use vrs_core::{Amount, TransferRequestId, VehicleNo};

use crate::{parse_address, snapshot};

/// Arguments for the `vrs transfer` subcommand.
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(subcommand)]
    pub command: TransferCommand,
}

/// Transfer subcommands.
#[derive(Subcommand, Debug)]
pub enum TransferCommand {
    /// Request an ownership transfer (current owner only).
    Request {
        /// Registration plate of the vehicle (e.g. ABC-123).
        #[arg(long)]
        vehicle_no: String,
        /// Prospective owner's wallet address.
        #[arg(long)]
        new_owner: String,
        /// Agreed price in smallest currency units (0 for a gift).
        #[arg(long)]
        amount: u128,
        /// Calling address (must be the current owner).
        #[arg(long)]
        caller: String,
    },

    /// Accept a transfer and pay the agreed amount into escrow
    /// (prospective owner only).
    Accept {
        /// Transfer request identifier.
        #[arg(long)]
        id: u64,
        /// Payment in smallest currency units; must equal the agreed amount.
        #[arg(long)]
        payment: u128,
        /// Calling address (must be the prospective owner).
        #[arg(long)]
        caller: String,
    },

    /// Approve an accepted transfer: ownership moves and escrow is released
    /// to the seller (authority only).
    Approve {
        /// Transfer request identifier.
        #[arg(long)]
        id: u64,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Decline a transfer: any escrowed funds are refunded to the
    /// prospective owner (authority only).
    Decline {
        /// Transfer request identifier.
        #[arg(long)]
        id: u64,
        /// Reason for declining.
        #[arg(long)]
        reason: String,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },
}

/// Execute the transfer subcommand against the ledger snapshot.
pub fn run_transfer(args: &TransferArgs, ledger_path: &Path) -> Result<u8> {
    let mut ledger = snapshot::load(ledger_path)?;

    match &args.command {
        TransferCommand::Request {
            vehicle_no,
            new_owner,
            amount,
            caller,
        } => {
            let vehicle_no = VehicleNo::new(vehicle_no.as_str()).context("invalid vehicle number")?;
            let request_id = ledger.request_ownership_transfer(
                &vehicle_no,
                parse_address(new_owner)?,
                Amount::new(*amount),
                &parse_address(caller)?,
            )?;
            snapshot::save(ledger_path, &ledger)?;
            println!(
                "OK: transfer request {request_id} created for {vehicle_no} (amount {amount})"
            );
        }

        TransferCommand::Accept {
            id,
            payment,
            caller,
        } => {
            let request_id = TransferRequestId::new(*id).context("invalid request id")?;
            ledger.accept_transfer_and_pay(
                request_id,
                Amount::new(*payment),
                &parse_address(caller)?,
            )?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: request {request_id} accepted; {payment} held in escrow");
        }

        TransferCommand::Approve { id, caller } => {
            let request_id = TransferRequestId::new(*id).context("invalid request id")?;
            ledger.approve_ownership_transfer(request_id, &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: request {request_id} approved; ownership transferred, escrow released");
        }

        TransferCommand::Decline { id, reason, caller } => {
            let request_id = TransferRequestId::new(*id).context("invalid request id")?;
            ledger.decline_ownership_transfer(
                request_id,
                reason.clone(),
                &parse_address(caller)?,
            )?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: request {request_id} declined: {reason}");
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{run_registry, RegistryArgs, RegistryCommand};
    use std::path::PathBuf;
    use vrs_core::AccountAddress;

    fn addr_string(n: u8) -> String {
        format!("0x{:040x}", n)
    }

    fn run(path: &Path, command: TransferCommand) -> Result<u8> {
        run_transfer(&TransferArgs { command }, path)
    }

    /// Snapshot with approved seller (0xa1) and buyer (0xb2) accounts and an
    /// approved vehicle ABC-123 owned by the seller.
    fn seeded_ledger(dir: &Path) -> PathBuf {
        let path = dir.join("ledger.json");
        let authority = AccountAddress::new(addr_string(0x90)).unwrap();
        snapshot::cmd_init(&path, &authority).unwrap();

        for (tail, cnic_tail) in [(0xa1u8, 1u8), (0xb2, 2)] {
            run_registry(
                &RegistryArgs {
                    command: RegistryCommand::RegisterUser {
                        wallet: addr_string(tail),
                        name: format!("User {tail}"),
                        email: format!("user{tail}@example.com"),
                        cnic: format!("12345678901{cnic_tail:02}"),
                    },
                },
                &path,
            )
            .unwrap();
            run_registry(
                &RegistryArgs {
                    command: RegistryCommand::ApproveUser {
                        wallet: addr_string(tail),
                        caller: addr_string(0x90),
                    },
                },
                &path,
            )
            .unwrap();
        }

        run_registry(
            &RegistryArgs {
                command: RegistryCommand::RegisterVehicle {
                    vehicle_no: "ABC-123".to_string(),
                    make: "Toyota".to_string(),
                    model: "Corolla".to_string(),
                    model_year: 2021,
                    owner: addr_string(0xa1),
                },
            },
            &path,
        )
        .unwrap();
        run_registry(
            &RegistryArgs {
                command: RegistryCommand::ApproveVehicle {
                    id: 1,
                    caller: addr_string(0x90),
                },
            },
            &path,
        )
        .unwrap();

        path
    }

    #[test]
    fn full_transfer_through_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());

        run(
            &path,
            TransferCommand::Request {
                vehicle_no: "ABC-123".to_string(),
                new_owner: addr_string(0xb2),
                amount: 100,
                caller: addr_string(0xa1),
            },
        )
        .unwrap();
        run(
            &path,
            TransferCommand::Accept {
                id: 1,
                payment: 100,
                caller: addr_string(0xb2),
            },
        )
        .unwrap();
        run(
            &path,
            TransferCommand::Approve {
                id: 1,
                caller: addr_string(0x90),
            },
        )
        .unwrap();

        let ledger = snapshot::load(&path).unwrap();
        let buyer = AccountAddress::new(addr_string(0xb2)).unwrap();
        let seller = AccountAddress::new(addr_string(0xa1)).unwrap();
        assert_eq!(
            ledger.vehicles().by_number(&VehicleNo::new("ABC-123").unwrap()).unwrap().current_owner,
            buyer
        );
        assert_eq!(ledger.balance(&seller), Amount::new(100));
    }

    #[test]
    fn wrong_payment_rejected_through_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());

        run(
            &path,
            TransferCommand::Request {
                vehicle_no: "ABC-123".to_string(),
                new_owner: addr_string(0xb2),
                amount: 100,
                caller: addr_string(0xa1),
            },
        )
        .unwrap();
        let result = run(
            &path,
            TransferCommand::Accept {
                id: 1,
                payment: 99,
                caller: addr_string(0xb2),
            },
        );
        assert!(result.is_err());

        let ledger = snapshot::load(&path).unwrap();
        assert_eq!(
            ledger.escrowed(TransferRequestId::new(1).unwrap()),
            Amount::ZERO
        );
    }

    #[test]
    fn decline_refunds_through_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());

        run(
            &path,
            TransferCommand::Request {
                vehicle_no: "ABC-123".to_string(),
                new_owner: addr_string(0xb2),
                amount: 100,
                caller: addr_string(0xa1),
            },
        )
        .unwrap();
        run(
            &path,
            TransferCommand::Accept {
                id: 1,
                payment: 100,
                caller: addr_string(0xb2),
            },
        )
        .unwrap();
        run(
            &path,
            TransferCommand::Decline {
                id: 1,
                reason: "documents unclear".to_string(),
                caller: addr_string(0x90),
            },
        )
        .unwrap();

        let ledger = snapshot::load(&path).unwrap();
        let buyer = AccountAddress::new(addr_string(0xb2)).unwrap();
        assert_eq!(ledger.balance(&buyer), Amount::new(100));
    }

    #[test]
    fn non_authority_approve_rejected_through_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());

        run(
            &path,
            TransferCommand::Request {
                vehicle_no: "ABC-123".to_string(),
                new_owner: addr_string(0xb2),
                amount: 100,
                caller: addr_string(0xa1),
            },
        )
        .unwrap();
        run(
            &path,
            TransferCommand::Accept {
                id: 1,
                payment: 100,
                caller: addr_string(0xb2),
            },
        )
        .unwrap();
        let result = run(
            &path,
            TransferCommand::Approve {
                id: 1,
                caller: addr_string(0xb2),
            },
        );
        assert!(result.is_err());
    }
}
