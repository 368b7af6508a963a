//! Error types for the wallet ledger.

use crate::amount::Amount;
use crate::currency::CurrencyId;
use crate::wallet::WalletId;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by store and transfer operations.
///
/// Every variant carries enough context to build a useful boundary message;
/// [`LedgerError::kind`] collapses the variants into the coarse taxonomy an
/// RPC status mapping needs.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Malformed identifier, empty required field, bad amount, self-transfer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Wallet id collision on create
    #[error("wallet {0} already exists")]
    AlreadyExists(WalletId),

    /// Unknown wallet id
    #[error("wallet {0} not found")]
    WalletNotFound(WalletId),

    /// Referenced currency type is not registered in the catalog
    #[error("currency type {0} not found")]
    CurrencyNotFound(CurrencyId),

    /// Source wallet does not hold enough of the currency to transfer
    #[error("insufficient balance: wallet {wallet} holds {held} of currency {currency}, requested {requested}")]
    InsufficientBalance {
        wallet: WalletId,
        currency: CurrencyId,
        held: Amount,
        requested: Amount,
    },

    /// A wallet holds a currency the catalog no longer knows. This is store
    /// corruption, not a user error, and is reported distinctly from ordinary
    /// not-found cases so operators can spot data-integrity bugs.
    #[error("catalog inconsistency: wallet {wallet} holds unregistered currency {currency}")]
    CatalogInconsistency {
        wallet: WalletId,
        currency: CurrencyId,
    },
}

/// Coarse error classification matching the RPC boundary's status taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    FailedPrecondition,
    Internal,
}

impl LedgerError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            LedgerError::WalletNotFound(_) | LedgerError::CurrencyNotFound(_) => {
                ErrorKind::NotFound
            }
            LedgerError::InsufficientBalance { .. } => ErrorKind::FailedPrecondition,
            LedgerError::CatalogInconsistency { .. } => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_kind_classification() {
        let id = Uuid::new_v4();

        assert_eq!(
            LedgerError::InvalidArgument("bad id".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(LedgerError::AlreadyExists(id).kind(), ErrorKind::AlreadyExists);
        assert_eq!(LedgerError::WalletNotFound(id).kind(), ErrorKind::NotFound);
        assert_eq!(LedgerError::CurrencyNotFound(id).kind(), ErrorKind::NotFound);
        assert_eq!(
            LedgerError::InsufficientBalance {
                wallet: id,
                currency: id,
                held: Amount::ZERO,
                requested: Amount::ZERO,
            }
            .kind(),
            ErrorKind::FailedPrecondition
        );
        assert_eq!(
            LedgerError::CatalogInconsistency {
                wallet: id,
                currency: id
            }
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_inconsistency_message_is_distinguishable() {
        let id = Uuid::new_v4();
        let msg = LedgerError::CatalogInconsistency {
            wallet: id,
            currency: id,
        }
        .to_string();
        assert!(msg.contains("catalog inconsistency"));
    }
}
