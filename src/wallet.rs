//! Wallet model and in-place balance operations.
//!
//! Invariant: a wallet never stores two holdings for the same currency type,
//! and never a holding with a non-positive quantity.

use crate::amount::Amount;
use crate::currency::{CurrencyId, CurrencyType};
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of a wallet.
pub type WalletId = Uuid;

/// The person a wallet belongs to.
#[derive(Debug, Clone)]
pub struct Owner {
    /// Unique owner identifier
    pub id: Uuid,

    /// Display name; required to be non-empty at wallet creation
    pub name: String,
}

/// A quantity of one currency type held inside a wallet.
///
/// The currency is a reference into the catalog, not a copy. Quantity is
/// strictly positive for as long as the holding is stored.
#[derive(Debug, Clone)]
pub struct Holding {
    /// Catalog entry this holding is denominated in
    pub currency: Arc<CurrencyType>,

    /// Strictly positive quantity held
    pub quantity: Amount,
}

/// A single wallet: identity, owner, cash balance, and currency holdings.
///
/// Wallets are mutated in place under the store's per-wallet lock; cloning
/// produces a consistent snapshot safe to hand across the RPC boundary.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// Caller-supplied unique identifier
    pub id: WalletId,

    /// Wallet owner
    pub owner: Owner,

    /// Cash balance in the ledger's pricing currency
    pub cash_balance: Amount,

    /// At most one holding per currency type, in acquisition order
    holdings: Vec<Holding>,
}

impl Wallet {
    /// Creates a wallet with no holdings.
    pub fn new(id: WalletId, owner: Owner, cash_balance: Amount) -> Self {
        Wallet {
            id,
            owner,
            cash_balance,
            holdings: Vec::new(),
        }
    }

    /// Returns the wallet's holdings in acquisition order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Quantity held of the given currency type, zero if absent.
    pub fn quantity_of(&self, currency_id: CurrencyId) -> Amount {
        self.holdings
            .iter()
            .find(|h| h.currency.id == currency_id)
            .map(|h| h.quantity)
            .unwrap_or(Amount::ZERO)
    }

    /// Credits `amount` of a currency, merging into an existing holding or
    /// appending a new one.
    ///
    /// Callers must pass a strictly positive amount; crediting zero or less
    /// would violate the no-non-positive-holding invariant.
    pub fn credit(&mut self, currency: &Arc<CurrencyType>, amount: Amount) {
        debug_assert!(amount.is_positive());
        match self.holdings.iter_mut().find(|h| h.currency.id == currency.id) {
            Some(holding) => holding.quantity += amount,
            None => self.holdings.push(Holding {
                currency: Arc::clone(currency),
                quantity: amount,
            }),
        }
    }

    /// Debits `amount` of the given currency type.
    ///
    /// Returns `false` (and leaves the wallet untouched) if the wallet holds
    /// less than `amount`. A debit that empties the holding removes it
    /// entirely rather than leaving a zero-quantity entry.
    pub fn debit(&mut self, currency_id: CurrencyId, amount: Amount) -> bool {
        let Some(idx) = self
            .holdings
            .iter()
            .position(|h| h.currency.id == currency_id)
        else {
            return false;
        };

        if self.holdings[idx].quantity < amount {
            return false;
        }

        self.holdings[idx].quantity -= amount;
        if !self.holdings[idx].quantity.is_positive() {
            self.holdings.remove(idx);
        }
        true
    }

    /// Removes the entire holding of a currency type, regardless of quantity.
    ///
    /// Returns the withdrawn quantity, or `None` if the currency was not held.
    pub fn withdraw_all(&mut self, currency_id: CurrencyId) -> Option<Amount> {
        let idx = self
            .holdings
            .iter()
            .position(|h| h.currency.id == currency_id)?;
        Some(self.holdings.remove(idx).quantity)
    }

    /// Verifies the holding invariants: all quantities positive, no duplicate
    /// currency types.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> bool {
        let all_positive = self.holdings.iter().all(|h| h.quantity.is_positive());
        let mut ids: Vec<_> = self.holdings.iter().map(|h| h.currency.id).collect();
        ids.sort();
        ids.dedup();
        all_positive && ids.len() == self.holdings.len()
    }
}
