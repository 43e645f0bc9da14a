//! # Ledger Snapshot Persistence
//!
//! The ledger is stored as a single pretty-printed JSON file. Commands load
//! it, apply one operation, and write it back whole — the file is small and
//! whole-file rewrite keeps the format trivially inspectable.

use std::path::Path;

use anyhow::{bail, Context, Result};

use vrs_core::AccountAddress;
use vrs_transfer::Ledger;

/// Create a new ledger snapshot file governed by `authority`.
///
/// Refuses to overwrite an existing snapshot.
pub fn cmd_init(path: &Path, authority: &AccountAddress) -> Result<u8> {
    if path.exists() {
        bail!("ledger snapshot already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let ledger = Ledger::new(authority.clone());
    save(path, &ledger)?;
    println!("OK: initialized ledger at {} (authority {authority})", path.display());
    Ok(0)
}

/// Load the ledger snapshot from disk.
pub fn load(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        bail!(
            "ledger snapshot not found: {} (run `vrs init` first)",
            path.display()
        );
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ledger = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse ledger snapshot {}", path.display()))?;
    Ok(ledger)
}

/// Write the ledger snapshot back to disk.
pub fn save(path: &Path, ledger: &Ledger) -> Result<u8> {
    let json = serde_json::to_string_pretty(ledger)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(0)
}
