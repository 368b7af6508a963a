//! Currency type registry.
//!
//! The catalog is populated once at startup and shared read-only afterwards,
//! so lookups need no synchronization.

use crate::amount::Amount;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of a tradable currency type.
pub type CurrencyId = Uuid;

/// A tradable currency type.
///
/// Immutable once registered. Holdings reference the catalog's entry via
/// `Arc`; the type is never copied per wallet.
#[derive(Debug, Serialize)]
pub struct CurrencyType {
    /// Unique currency identifier
    pub id: CurrencyId,

    /// Display name, e.g. "Bitcoin"
    pub name: String,

    /// Reference unit value in the ledger's pricing currency
    pub reference_value: Amount,
}

/// Registry of tradable currency types.
///
/// Built with [`CurrencyCatalog::register`] during initialization, then
/// frozen behind an `Arc` and handed to the store. [`CurrencyCatalog::list`]
/// preserves registration order.
#[derive(Debug, Default)]
pub struct CurrencyCatalog {
    by_id: HashMap<CurrencyId, Arc<CurrencyType>>,
    ordered: Vec<Arc<CurrencyType>>,
}

impl CurrencyCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        CurrencyCatalog::default()
    }

    /// Registers a currency type under a caller-supplied id.
    ///
    /// Intended for startup-time population only; the catalog is not shared
    /// with the store until registration is finished.
    pub fn register(&mut self, id: CurrencyId, name: &str, reference_value: Amount) -> Arc<CurrencyType> {
        debug_assert!(
            !self.by_id.contains_key(&id),
            "currency {id} registered twice"
        );
        let currency = Arc::new(CurrencyType {
            id,
            name: name.to_string(),
            reference_value,
        });
        self.by_id.insert(id, Arc::clone(&currency));
        self.ordered.push(Arc::clone(&currency));
        currency
    }

    /// Looks up a currency type by id.
    pub fn get(&self, id: CurrencyId) -> Option<Arc<CurrencyType>> {
        self.by_id.get(&id).map(Arc::clone)
    }

    /// Returns all registered currency types in registration order.
    pub fn list(&self) -> Vec<Arc<CurrencyType>> {
        self.ordered.clone()
    }

    /// Number of registered currency types.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if no currency type has been registered.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
