//! Boundary request records.
//!
//! The RPC layer hands identifiers and amounts in as raw strings; these
//! records carry them into the store, which applies the parse-or-reject
//! policy appropriate to each operation.

use crate::amount::Amount;
use crate::currency::CurrencyId;
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;

/// One currency/amount pair as supplied at the boundary.
///
/// Used both for a new wallet's initial holdings (validated strictly) and for
/// `update_holdings` additions (malformed entries skipped, not fatal).
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingEntry {
    /// Currency type id, expected to be a UUID string
    pub currency_id: String,

    /// Decimal quantity string
    pub amount: String,
}

impl HoldingEntry {
    /// Convenience constructor for callers assembling requests by hand.
    pub fn new(currency_id: impl Into<String>, amount: impl Into<String>) -> Self {
        HoldingEntry {
            currency_id: currency_id.into(),
            amount: amount.into(),
        }
    }

    /// Parses the raw entry into a typed pair.
    ///
    /// Returns `None` if either field is malformed. Sign checks are the
    /// caller's concern; the two call sites treat negative quantities
    /// differently.
    pub fn parse(&self) -> Option<(CurrencyId, Amount)> {
        let currency_id = Uuid::parse_str(self.currency_id.trim()).ok()?;
        let amount = Amount::from_str(&self.amount).ok()?;
        Some((currency_id, amount))
    }
}

/// Everything needed to create a wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWallet {
    /// Caller-supplied wallet id, expected to be a UUID string
    pub id: String,

    /// Owner id, expected to be a UUID string
    pub owner_id: String,

    /// Owner display name; must be non-empty
    pub owner_name: String,

    /// Starting cash balance as a decimal string
    pub cash_balance: String,

    /// Initial currency holdings
    #[serde(default)]
    pub holdings: Vec<HoldingEntry>,
}
