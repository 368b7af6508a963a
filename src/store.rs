//! Concurrent wallet store.
//!
//! The authoritative map of wallet id to wallet. Map membership is handled
//! by a concurrent map; every wallet sits behind its own mutex so that
//! operations touching different wallets proceed in parallel while
//! operations on the same wallet serialize.

use crate::amount::Amount;
use crate::currency::{CurrencyCatalog, CurrencyId, CurrencyType};
use crate::error::{LedgerError, Result};
use crate::request::{HoldingEntry, NewWallet};
use crate::wallet::{Owner, Wallet, WalletId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, warn};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of [`WalletStore::update_holdings`].
///
/// Batch additions apply partially by design; `skipped` makes that partial
/// application observable to the caller instead of invisible.
#[derive(Debug)]
pub struct HoldingsUpdate {
    /// Snapshot of the wallet after the batch was applied
    pub wallet: Wallet,

    /// Number of batch entries that were skipped as malformed or unknown
    pub skipped: usize,
}

/// The concurrent map of all wallets plus the currency catalog.
///
/// Constructed once at process start and shared by handle; there is no
/// ambient global, so tests can run isolated stores side by side.
///
/// # Locking
///
/// - Map insert/lookup/remove go through the concurrent map and never hold
///   a wallet lock.
/// - All wallet mutation happens under that wallet's mutex, held only for
///   the duration of one operation.
/// - Operations needing two wallets at once lock them in ascending id order
///   (see the transfer implementation).
pub struct WalletStore {
    catalog: Arc<CurrencyCatalog>,
    wallets: DashMap<WalletId, Arc<Mutex<Wallet>>>,
}

impl WalletStore {
    /// Creates a store over a populated currency catalog.
    pub fn new(catalog: Arc<CurrencyCatalog>) -> Self {
        WalletStore {
            catalog,
            wallets: DashMap::new(),
        }
    }

    /// Returns the currency catalog.
    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    /// All registered currency types in registration order.
    pub fn list_currency_types(&self) -> Vec<Arc<CurrencyType>> {
        self.catalog.list()
    }

    /// Number of wallets currently registered.
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Creates and registers a wallet.
    ///
    /// Validation is strict: malformed ids, an empty owner name, or an
    /// unparsable or negative initial quantity reject the whole request, and
    /// every initial holding must reference a cataloged currency. The wallet
    /// is inserted atomically; a concurrent reader either sees the complete
    /// wallet or none of it. Zero-quantity entries are accepted but not
    /// stored, and duplicate currency entries merge.
    pub fn create(&self, request: &NewWallet) -> Result<Wallet> {
        let id = parse_wallet_id(&request.id)?;
        let owner_id = Uuid::parse_str(request.owner_id.trim()).map_err(|_| {
            LedgerError::InvalidArgument(format!("malformed owner id '{}'", request.owner_id))
        })?;
        let owner_name = request.owner_name.trim();
        if owner_name.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "owner name must not be empty".to_string(),
            ));
        }
        let cash_balance = Amount::from_str(&request.cash_balance).map_err(|_| {
            LedgerError::InvalidArgument(format!(
                "malformed cash balance '{}'",
                request.cash_balance
            ))
        })?;

        let owner = Owner {
            id: owner_id,
            name: owner_name.to_string(),
        };
        let mut wallet = Wallet::new(id, owner, cash_balance);

        for entry in &request.holdings {
            let (currency_id, quantity) = entry.parse().ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "malformed holding entry '{}' / '{}'",
                    entry.currency_id, entry.amount
                ))
            })?;
            if quantity.is_negative() {
                return Err(LedgerError::InvalidArgument(format!(
                    "negative initial quantity {quantity} for currency {currency_id}"
                )));
            }
            let currency = self
                .catalog
                .get(currency_id)
                .ok_or(LedgerError::CurrencyNotFound(currency_id))?;
            if quantity.is_positive() {
                wallet.credit(&currency, quantity);
            }
        }

        match self.wallets.entry(id) {
            Entry::Occupied(_) => Err(LedgerError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                let snapshot = wallet.clone();
                slot.insert(Arc::new(Mutex::new(wallet)));
                debug!("created wallet {id} for owner '{}'", snapshot.owner.name);
                Ok(snapshot)
            }
        }
    }

    /// Returns a consistent snapshot of a wallet.
    pub fn get(&self, wallet_id: &str) -> Result<Wallet> {
        let id = parse_wallet_id(wallet_id)?;
        let wallet_ref = self.wallet_ref(id)?;
        let wallet = wallet_ref.lock();
        Ok(wallet.clone())
    }

    /// Removes a wallet.
    ///
    /// The id stops resolving immediately; an operation already holding the
    /// wallet's handle may still finish against the detached wallet.
    pub fn delete(&self, wallet_id: &str) -> Result<()> {
        let id = parse_wallet_id(wallet_id)?;
        match self.wallets.remove(&id) {
            Some(_) => {
                debug!("deleted wallet {id}");
                Ok(())
            }
            None => Err(LedgerError::WalletNotFound(id)),
        }
    }

    /// Applies a batch of holding additions, then removals, to one wallet.
    ///
    /// Additions are lenient: a malformed id or amount, a non-positive
    /// quantity, or an unknown currency skips that entry (logged at warn
    /// level and counted) rather than failing the batch. Removals drop the
    /// entire holding of the named currency, whatever its quantity; removing
    /// a currency the wallet does not hold is a no-op.
    ///
    /// Additions apply before removals, so a currency named in both lists
    /// ends up removed.
    pub fn update_holdings(
        &self,
        wallet_id: &str,
        to_add: &[HoldingEntry],
        to_remove: &[String],
    ) -> Result<HoldingsUpdate> {
        let id = parse_wallet_id(wallet_id)?;
        let wallet_ref = self.wallet_ref(id)?;
        let mut skipped = 0;

        let mut wallet = wallet_ref.lock();

        for entry in to_add {
            match entry.parse() {
                Some((currency_id, quantity)) if quantity.is_positive() => {
                    match self.catalog.get(currency_id) {
                        Some(currency) => wallet.credit(&currency, quantity),
                        None => {
                            warn!(
                                "wallet {id}: skipping addition of unregistered currency {currency_id}"
                            );
                            skipped += 1;
                        }
                    }
                }
                Some((currency_id, quantity)) => {
                    warn!(
                        "wallet {id}: skipping non-positive addition of {quantity} for currency {currency_id}"
                    );
                    skipped += 1;
                }
                None => {
                    warn!(
                        "wallet {id}: skipping malformed holding entry '{}' / '{}'",
                        entry.currency_id, entry.amount
                    );
                    skipped += 1;
                }
            }
        }

        for raw in to_remove {
            match Uuid::parse_str(raw.trim()) {
                Ok(currency_id) => {
                    if let Some(quantity) = wallet.withdraw_all(currency_id) {
                        debug!("wallet {id}: withdrew {quantity} of currency {currency_id}");
                    }
                }
                Err(_) => {
                    warn!("wallet {id}: skipping malformed currency id '{raw}' in removal list");
                    skipped += 1;
                }
            }
        }

        Ok(HoldingsUpdate {
            wallet: wallet.clone(),
            skipped,
        })
    }

    /// Resolves the shared handle for a wallet without locking it.
    pub(crate) fn wallet_ref(&self, id: WalletId) -> Result<Arc<Mutex<Wallet>>> {
        self.wallets
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(LedgerError::WalletNotFound(id))
    }
}

/// Parses a wallet id string, rejecting malformed input.
pub(crate) fn parse_wallet_id(raw: &str) -> Result<WalletId> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| LedgerError::InvalidArgument(format!("malformed wallet id '{raw}'")))
}

/// Parses a currency id string, rejecting malformed input.
pub(crate) fn parse_currency_id(raw: &str) -> Result<CurrencyId> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| LedgerError::InvalidArgument(format!("malformed currency id '{raw}'")))
}
