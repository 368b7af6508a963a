//! # Wallet Ledger
//!
//! A concurrent, in-memory ledger of cryptocurrency wallets: create wallets,
//! inspect balances, add and remove currency holdings, and transfer holdings
//! between wallets atomically.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: quantities use `rust_decimal` behind a
//!   scale-enforcing newtype
//! - **Fine-grained locking**: a concurrent map plus one mutex per wallet;
//!   operations on different wallets run in parallel
//! - **Fixed lock order**: two-wallet transfers acquire locks in ascending
//!   wallet-id order, so reciprocal transfers cannot deadlock
//! - **Strict invariants**: no duplicate or non-positive holdings ever
//!   persist; transfers are all-or-nothing
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use wallet_ledger::{Amount, CurrencyCatalog, NewWallet, WalletStore};
//!
//! let mut catalog = CurrencyCatalog::new();
//! let btc = Uuid::new_v4();
//! catalog.register(btc, "Bitcoin", Amount::from_str("50000.0").unwrap());
//!
//! let store = WalletStore::new(Arc::new(catalog));
//! let wallet = store
//!     .create(&NewWallet {
//!         id: Uuid::new_v4().to_string(),
//!         owner_id: Uuid::new_v4().to_string(),
//!         owner_name: "Alice".to_string(),
//!         cash_balance: "1.5".to_string(),
//!         holdings: vec![],
//!     })
//!     .unwrap();
//! assert_eq!(wallet.owner.name, "Alice");
//! ```

pub mod amount;
pub mod currency;
pub mod error;
pub mod request;
pub mod response;
pub mod store;
pub mod transfer;
pub mod wallet;

pub use amount::Amount;
pub use currency::{CurrencyCatalog, CurrencyId, CurrencyType};
pub use error::{ErrorKind, LedgerError, Result};
pub use request::{HoldingEntry, NewWallet};
pub use response::{StatusMessage, TransferMessage, WalletMessage};
pub use store::{HoldingsUpdate, WalletStore};
pub use wallet::{Holding, Owner, Wallet, WalletId};
