//! Two-wallet atomic transfer.
//!
//! Moving a holding between wallets needs exclusive access to both sides at
//! once. Two reciprocal transfers (A to B and B to A) would deadlock if each
//! locked its source first, so locks are always taken in ascending wallet-id
//! order, independent of which side is the source.

use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::store::{parse_currency_id, parse_wallet_id, WalletStore};
use crate::wallet::Wallet;
use log::debug;
use std::str::FromStr;

impl WalletStore {
    /// Moves `amount` of a currency from one wallet to another.
    ///
    /// The transfer is all-or-nothing: the debit and credit happen inside one
    /// critical section covering both wallets, so no observer ever sees a
    /// debited-but-not-credited state, and a failed precondition leaves both
    /// wallets untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for malformed ids, a non-positive or unparsable
    ///   amount, or a self-transfer
    /// - `WalletNotFound` if either wallet is unknown
    /// - `InsufficientBalance` if the source holds less than `amount` of the
    ///   currency (including not holding it at all)
    /// - `CatalogInconsistency` if the source holds the currency but the
    ///   catalog has no entry for it
    pub fn transfer(
        &self,
        from_wallet_id: &str,
        to_wallet_id: &str,
        currency_id: &str,
        amount: &str,
    ) -> Result<(Wallet, Wallet)> {
        let from_id = parse_wallet_id(from_wallet_id)?;
        let to_id = parse_wallet_id(to_wallet_id)?;
        if from_id == to_id {
            return Err(LedgerError::InvalidArgument(format!(
                "cannot transfer from wallet {from_id} to itself"
            )));
        }
        let currency_id = parse_currency_id(currency_id)?;
        let amount = Amount::from_str(amount).map_err(|_| {
            LedgerError::InvalidArgument(format!("malformed transfer amount '{amount}'"))
        })?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidArgument(format!(
                "transfer amount must be positive, got {amount}"
            )));
        }

        let from_ref = self.wallet_ref(from_id)?;
        let to_ref = self.wallet_ref(to_id)?;

        // Lock both wallets in ascending id order, whatever the transfer
        // direction, so reciprocal transfers cannot circular-wait.
        let (mut source_guard, mut dest_guard) = if from_id < to_id {
            let source = from_ref.lock();
            let dest = to_ref.lock();
            (source, dest)
        } else {
            let dest = to_ref.lock();
            let source = from_ref.lock();
            (source, dest)
        };
        let source = &mut *source_guard;
        let dest = &mut *dest_guard;

        // The balance seen before locking may be stale; re-check under both
        // locks before mutating anything.
        let held = source.quantity_of(currency_id);
        if held < amount {
            return Err(LedgerError::InsufficientBalance {
                wallet: from_id,
                currency: currency_id,
                held,
                requested: amount,
            });
        }

        // The source provably holds this currency, so the catalog must know
        // it; a miss here is store corruption, not a user error.
        let currency = self
            .catalog()
            .get(currency_id)
            .ok_or(LedgerError::CatalogInconsistency {
                wallet: from_id,
                currency: currency_id,
            })?;

        let debited = source.debit(currency_id, amount);
        debug_assert!(debited, "debit must succeed after balance re-check");
        dest.credit(&currency, amount);

        debug!(
            "transferred {amount} of {} from wallet {from_id} to wallet {to_id}",
            currency.name
        );

        Ok((source.clone(), dest.clone()))
    }
}
