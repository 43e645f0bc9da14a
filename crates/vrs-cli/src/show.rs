//! # Show Subcommand
//!
//! Read-only views over the ledger snapshot: vehicle and user records,
//! transfer requests, stolen listings, histories, settlement balances, and
//! the event log. Never writes the snapshot back.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use vrs_core::{TransferRequestId, VehicleId, VehicleNo};
use vrs_transfer::Ledger;

use crate::{parse_address, snapshot};

/// Arguments for the `vrs show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub command: ShowCommand,
}

/// Show subcommands.
#[derive(Subcommand, Debug)]
pub enum ShowCommand {
    /// Show a vehicle record by id or registration plate.
    Vehicle {
        /// Vehicle identifier.
        #[arg(long, conflicts_with = "vehicle_no")]
        id: Option<u64>,
        /// Registration plate (e.g. ABC-123).
        #[arg(long)]
        vehicle_no: Option<String>,
    },

    /// Show a user account by wallet address.
    User {
        /// Wallet address.
        #[arg(long)]
        wallet: String,
    },

    /// Show a transfer request.
    Request {
        /// Transfer request identifier.
        #[arg(long)]
        id: u64,
    },

    /// List all vehicles currently flagged stolen.
    Stolen,

    /// Show a vehicle's ownership and stolen history.
    History {
        /// Vehicle identifier.
        #[arg(long)]
        id: u64,
    },

    /// Show the settlement balance credited to an address.
    Balance {
        /// Wallet address.
        #[arg(long)]
        address: String,
    },

    /// Print the undrained event log, oldest first.
    Events,
}

/// Execute the show subcommand against the ledger snapshot.
pub fn run_show(args: &ShowArgs, ledger_path: &Path) -> Result<u8> {
    let ledger = snapshot::load(ledger_path)?;

    match &args.command {
        ShowCommand::Vehicle { id, vehicle_no } => {
            let vehicle = match (id, vehicle_no) {
                (Some(id), _) => {
                    let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
                    ledger
                        .vehicles()
                        .by_id(vehicle_id)
                        .ok_or_else(|| anyhow::anyhow!("unknown vehicle id {id}"))?
                }
                (None, Some(plate)) => {
                    let plate = VehicleNo::new(plate.as_str()).context("invalid vehicle number")?;
                    ledger
                        .vehicles()
                        .by_number(&plate)
                        .ok_or_else(|| anyhow::anyhow!("unknown vehicle number {plate}"))?
                }
                (None, None) => bail!("provide --id or --vehicle-no"),
            };
            println!("Vehicle: {} ({})", vehicle.id, vehicle.vehicle_no);
            println!("  Make/Model: {} {} ({})", vehicle.make, vehicle.model, vehicle.model_year);
            println!("  Owner: {}", vehicle.current_owner);
            println!("  Approved: {}", vehicle.approved);
            if let Some(reason) = &vehicle.decline_reason {
                println!("  Declined: {reason}");
            }
            println!("  Stolen: {}", vehicle.is_stolen);
            println!("  Registered: {}", vehicle.registered_at.to_canonical_string());
        }

        ShowCommand::User { wallet } => {
            let wallet = parse_address(wallet)?;
            let account = ledger
                .accounts()
                .by_wallet(&wallet)
                .ok_or_else(|| anyhow::anyhow!("unknown user wallet {wallet}"))?;
            println!("User: {} ({})", account.id, account.wallet);
            println!("  Name: {}", account.name);
            println!("  Email: {}", account.email);
            println!("  CNIC: {}", account.cnic);
            println!("  Status: {}", account.status);
            if let Some(reason) = &account.decline_reason {
                println!("  Declined: {reason}");
            }
        }

        ShowCommand::Request { id } => {
            let request_id = TransferRequestId::new(*id).context("invalid request id")?;
            let request = ledger
                .transfer_request(request_id)
                .ok_or_else(|| anyhow::anyhow!("unknown transfer request {id}"))?;
            println!("Transfer request: {}", request.request_id);
            println!("  State: {}", request.state());
            println!("  Vehicle: {}", request.vehicle_id);
            println!("  From: {}", request.current_owner);
            println!("  To: {}", request.new_owner);
            println!("  Amount: {}", request.transfer_amount);
            println!("  Escrowed: {}", ledger.escrowed(request_id));
            if let Some(reason) = &request.decline_reason {
                println!("  Declined: {reason}");
            }
        }

        ShowCommand::Stolen => {
            let stolen = ledger.vehicles().stolen_vehicles();
            if stolen.is_empty() {
                println!("No vehicles currently reported stolen.");
            } else {
                println!("Stolen vehicles ({}):", stolen.len());
                for id in stolen {
                    let vehicle = ledger.vehicles().by_id(id).ok_or_else(|| {
                        anyhow::anyhow!("stolen listing references unknown vehicle id {id}")
                    })?;
                    println!("  {}: {} ({})", id, vehicle.vehicle_no, vehicle.current_owner);
                }
            }
        }

        ShowCommand::History { id } => {
            let vehicle_id = VehicleId::new(*id).context("invalid vehicle id")?;
            let vehicle = ledger
                .vehicles()
                .by_id(vehicle_id)
                .ok_or_else(|| anyhow::anyhow!("unknown vehicle id {id}"))?;
            println!("Ownership history for {} ({}):", vehicle.id, vehicle.vehicle_no);
            for (i, entry) in vehicle.ownership_history.iter().enumerate() {
                println!("  [{i}] {} since {}", entry.owner, entry.since.to_canonical_string());
            }
            println!("Stolen history: {} report(s)", vehicle.stolen_history.len());
            for (i, entry) in vehicle.stolen_history.iter().enumerate() {
                match &entry.recovered_at {
                    Some(recovered) => println!(
                        "  [{i}] reported {} recovered {}",
                        entry.reported_at.to_canonical_string(),
                        recovered.to_canonical_string()
                    ),
                    None => println!(
                        "  [{i}] reported {} (open)",
                        entry.reported_at.to_canonical_string()
                    ),
                }
            }
        }

        ShowCommand::Balance { address } => {
            let address = parse_address(address)?;
            println!("{}: {}", address, ledger.balance(&address));
        }

        ShowCommand::Events => {
            print_events(&ledger);
        }
    }

    Ok(0)
}

fn print_events(ledger: &Ledger) {
    let events = ledger.events();
    if events.is_empty() {
        println!("No events.");
        return;
    }
    println!("Events ({}):", events.len());
    for (i, event) in events.iter().enumerate() {
        // The tagged JSON form is the canonical rendering.
        match serde_json::to_string(event) {
            Ok(json) => println!("  [{i}] {json}"),
            Err(_) => println!("  [{i}] {event:?}"),
        }
    }
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

    fn seeded_ledger(dir: &Path) -> PathBuf {
        let path = dir.join("ledger.json");
        let authority = AccountAddress::new(addr_string(0x90)).unwrap();
        snapshot::cmd_init(&path, &authority).unwrap();
        run_registry(
            &RegistryArgs {
                command: RegistryCommand::RegisterUser {
                    wallet: addr_string(0xa1),
                    name: "Ayesha Khan".to_string(),
                    email: "ayesha@example.com".to_string(),
                    cnic: "1234567890101".to_string(),
                },
            },
            &path,
        )
        .unwrap();
        run_registry(
            &RegistryArgs {
                command: RegistryCommand::ApproveUser {
                    wallet: addr_string(0xa1),
                    caller: addr_string(0x90),
                },
            },
            &path,
        )
        .unwrap();
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
        path
    }

    fn run(path: &Path, command: ShowCommand) -> Result<u8> {
        run_show(&ShowArgs { command }, path)
    }

    #[test]
    fn show_vehicle_by_id_and_plate() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        assert_eq!(
            run(&path, ShowCommand::Vehicle { id: Some(1), vehicle_no: None }).unwrap(),
            0
        );
        assert_eq!(
            run(
                &path,
                ShowCommand::Vehicle {
                    id: None,
                    vehicle_no: Some("ABC-123".to_string())
                }
            )
            .unwrap(),
            0
        );
    }

    #[test]
    fn show_vehicle_requires_selector() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        let err = run(&path, ShowCommand::Vehicle { id: None, vehicle_no: None }).unwrap_err();
        assert!(err.to_string().contains("--id or --vehicle-no"));
    }

    #[test]
    fn show_unknown_vehicle_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        assert!(run(&path, ShowCommand::Vehicle { id: Some(9), vehicle_no: None }).is_err());
    }

    #[test]
    fn show_user_and_balance() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        assert_eq!(
            run(&path, ShowCommand::User { wallet: addr_string(0xa1) }).unwrap(),
            0
        );
        assert_eq!(
            run(&path, ShowCommand::Balance { address: addr_string(0xa1) }).unwrap(),
            0
        );
    }

    #[test]
    fn show_stolen_and_history_and_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        assert_eq!(run(&path, ShowCommand::Stolen).unwrap(), 0);
        assert_eq!(run(&path, ShowCommand::History { id: 1 }).unwrap(), 0);
        assert_eq!(run(&path, ShowCommand::Events).unwrap(), 0);
    }

    #[test]
    fn show_unknown_request_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_ledger(dir.path());
        assert!(run(&path, ShowCommand::Request { id: 1 }).is_err());
    }
}
