//! Wallet Ledger demo binary.
//!
//! Seeds the catalog and a pair of wallets the way the service does at
//! startup, runs a transfer, and prints the resulting wire messages as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::process;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use wallet_ledger::{
    Amount, CurrencyCatalog, HoldingEntry, LedgerError, NewWallet, Result, StatusMessage,
    TransferMessage, WalletMessage, WalletStore,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        let status = StatusMessage::from(&e);
        eprintln!("Error {}: {}", status.code, status.message);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut catalog = CurrencyCatalog::new();
    let bitcoin = Uuid::new_v4();
    catalog.register(bitcoin, "Bitcoin", parse_amount("50000.0")?);
    catalog.register(Uuid::new_v4(), "Ethereum", parse_amount("3000.0")?);
    catalog.register(Uuid::new_v4(), "Litecoin", parse_amount("150.0")?);

    let store = WalletStore::new(Arc::new(catalog));

    let alice_wallet = Uuid::new_v4().to_string();
    store.create(&NewWallet {
        id: alice_wallet.clone(),
        owner_id: Uuid::new_v4().to_string(),
        owner_name: "Alice".to_string(),
        cash_balance: "1.5".to_string(),
        holdings: vec![HoldingEntry::new(bitcoin.to_string(), "0.0025")],
    })?;

    let bob_wallet = Uuid::new_v4().to_string();
    store.create(&NewWallet {
        id: bob_wallet.clone(),
        owner_id: Uuid::new_v4().to_string(),
        owner_name: "Bob".to_string(),
        cash_balance: "100.0".to_string(),
        holdings: vec![HoldingEntry::new(bitcoin.to_string(), "0.01197")],
    })?;

    let (from, to) = store.transfer(&alice_wallet, &bob_wallet, &bitcoin.to_string(), "0.0025")?;
    let transfer = TransferMessage {
        from_wallet: WalletMessage::from(&from),
        to_wallet: WalletMessage::from(&to),
    };

    let rendered = serde_json::to_string_pretty(&transfer)
        .unwrap_or_else(|e| format!("serialization failed: {e}"));
    println!("{rendered}");

    Ok(())
}

fn parse_amount(s: &str) -> Result<Amount> {
    Amount::from_str(s).map_err(|_| LedgerError::InvalidArgument(format!("bad amount '{s}'")))
}
