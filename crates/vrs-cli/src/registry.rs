//! # Registry Subcommand
//!
//! User and vehicle registration, government approval decisions, stolen
//! reporting, and the recovery sub-flow, all applied against the local
//! ledger snapshot.
//!
//! ## Subcommands
//!
//! - `register-user` / `approve-user` / `decline-user`
//! - `register-vehicle` / `approve-vehicle` / `decline-vehicle`
//! - `report-stolen` — Flag a vehicle stolen (current owner only).
//! - `request-recovery` — File a recovery request for a stolen vehicle.
//! - `approve-recovery` / `decline-recovery` — Authority decisions.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use vrs_core::{Cnic, RecoveryRequestId, VehicleId, VehicleNo};

use crate::{parse_address, snapshot};

/// Arguments for the `vrs registry` subcommand.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommand,
}

/// Registry subcommands.
#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Register a new user account (starts PENDING).
    RegisterUser {
        /// Wallet address of the new account.
        #[arg(long)]
        wallet: String,
        /// Full name.
        #[arg(long)]
        name: String,
        /// Contact email.
        #[arg(long)]
        email: String,
        /// CNIC, with or without dashes (e.g. 12345-6789012-3).
        #[arg(long)]
        cnic: String,
    },

    /// Approve a pending user account (authority only).
    ApproveUser {
        /// Wallet address of the account.
        #[arg(long)]
        wallet: String,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Decline a pending user account with a reason (authority only).
    DeclineUser {
        /// Wallet address of the account.
        #[arg(long)]
        wallet: String,
        /// Reason for declining.
        #[arg(long)]
        reason: String,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Register a new vehicle (starts unapproved).
    RegisterVehicle {
        /// Registration plate (e.g. ABC-123).
        #[arg(long)]
        vehicle_no: String,
        /// Manufacturer name.
        #[arg(long)]
        make: String,
        /// Model name.
        #[arg(long)]
        model: String,
        /// Model year.
        #[arg(long)]
        model_year: u16,
        /// Owner wallet address (must be an approved account).
        #[arg(long)]
        owner: String,
    },

    /// Approve a vehicle registration (authority only).
    ApproveVehicle {
        /// Vehicle identifier.
        #[arg(long)]
        id: u64,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Decline a vehicle registration with a reason (authority only).
    DeclineVehicle {
        /// Vehicle identifier.
        #[arg(long)]
        id: u64,
        /// Reason for declining.
        #[arg(long)]
        reason: String,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Report a vehicle stolen (current owner only).
    ReportStolen {
        /// Vehicle identifier.
        #[arg(long)]
        id: u64,
        /// Calling address (must be the current owner).
        #[arg(long)]
        caller: String,
    },

    /// File a recovery request for a stolen vehicle (current owner only).
    RequestRecovery {
        /// Vehicle identifier.
        #[arg(long)]
        id: u64,
        /// Supporting document reference (e.g. a pinned file URI).
        #[arg(long)]
        document: String,
        /// Calling address (must be the current owner).
        #[arg(long)]
        caller: String,
    },

    /// Approve a recovery request, clearing the stolen flag (authority only).
    ApproveRecovery {
        /// Recovery request identifier.
        #[arg(long)]
        id: u64,
        /// Calling address (must be the authority).
        #[arg(long)]
        caller: String,
    },

    /// Decline a recovery request with a reason (authority only).
    DeclineRecovery {
        /// Recovery request identifier.
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

/// Execute the registry subcommand against the ledger snapshot.
pub fn run_registry(args: &RegistryArgs, ledger_path: &Path) -> Result<u8> {
    let mut ledger = snapshot::load(ledger_path)?;

    match &args.command {
        RegistryCommand::RegisterUser {
            wallet,
            name,
            email,
            cnic,
        } => {
            let wallet = parse_address(wallet)?;
            let cnic = Cnic::new(cnic.as_str()).context("invalid CNIC")?;
            let user_id = ledger.register_user(wallet.clone(), name.clone(), email.clone(), cnic)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: registered user {user_id} ({wallet}), PENDING approval");
        }

        RegistryCommand::ApproveUser { wallet, caller } => {
            let wallet = parse_address(wallet)?;
            ledger.approve_user(&wallet, &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: approved user {wallet}");
        }

        RegistryCommand::DeclineUser {
            wallet,
            reason,
            caller,
        } => {
            let wallet = parse_address(wallet)?;
            ledger.decline_user(&wallet, reason.clone(), &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: declined user {wallet}: {reason}");
        }

        RegistryCommand::RegisterVehicle {
            vehicle_no,
            make,
            model,
            model_year,
            owner,
        } => {
            let vehicle_no = VehicleNo::new(vehicle_no.as_str()).context("invalid vehicle number")?;
            let owner = parse_address(owner)?;
            let vehicle_id = ledger.register_vehicle(
                vehicle_no.clone(),
                make.clone(),
                model.clone(),
                *model_year,
                owner,
            )?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: registered vehicle {vehicle_id} ({vehicle_no}), awaiting approval");
        }

        RegistryCommand::ApproveVehicle { id, caller } => {
            let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
            ledger.approve_vehicle(vehicle_id, &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: approved vehicle {vehicle_id}");
        }

        RegistryCommand::DeclineVehicle { id, reason, caller } => {
            let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
            ledger.decline_vehicle(vehicle_id, reason.clone(), &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: declined vehicle {vehicle_id}: {reason}");
        }

        RegistryCommand::ReportStolen { id, caller } => {
            let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
            ledger.report_stolen(vehicle_id, &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: vehicle {vehicle_id} reported stolen");
        }

        RegistryCommand::RequestRecovery {
            id,
            document,
            caller,
        } => {
            let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
            let request_id =
                ledger.request_vehicle_recovery(vehicle_id, document.clone(), &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: filed recovery request {request_id} for vehicle {vehicle_id}");
        }

        RegistryCommand::ApproveRecovery { id, caller } => {
            let request_id = RecoveryRequestId::new(*id).context("invalid recovery request id")?;
            ledger.approve_recovery_request(request_id, &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: approved recovery request {request_id}; stolen flag cleared");
        }

        RegistryCommand::DeclineRecovery { id, reason, caller } => {
            let request_id = RecoveryRequestId::new(*id).context("invalid recovery request id")?;
            ledger.decline_recovery_request(request_id, reason.clone(), &parse_address(caller)?)?;
            snapshot::save(ledger_path, &ledger)?;
            println!("OK: declined recovery request {request_id}: {reason}");
        }
    }

    Ok(0)
}
