//! Wire-facing message shapes.
//!
//! The RPC boundary serializes ids as strings and amounts as decimal
//! strings; these types carry snapshots out of the store in that shape.
//! Status codes follow the gRPC numbering the service's clients expect.

use crate::currency::CurrencyType;
use crate::error::{ErrorKind, LedgerError};
use crate::wallet::{Holding, Owner, Wallet};
use serde::{Deserialize, Serialize};

/// A currency type as seen on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyTypeMessage {
    pub id: String,
    pub name: String,
    pub reference_value: String,
}

/// A wallet owner as seen on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerMessage {
    pub id: String,
    pub name: String,
}

/// One holding inside a wallet message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingMessage {
    pub currency: CurrencyTypeMessage,
    pub quantity: String,
}

/// A full wallet snapshot as seen on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletMessage {
    pub id: String,
    pub owner: OwnerMessage,
    pub cash_balance: String,
    pub holdings: Vec<HoldingMessage>,
}

/// Both sides of a completed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferMessage {
    pub from_wallet: WalletMessage,
    pub to_wallet: WalletMessage,
}

/// Structured error as reported across the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    /// gRPC status code
    pub code: u32,
    pub message: String,
}

impl From<&CurrencyType> for CurrencyTypeMessage {
    fn from(currency: &CurrencyType) -> Self {
        CurrencyTypeMessage {
            id: currency.id.to_string(),
            name: currency.name.clone(),
            reference_value: currency.reference_value.to_string(),
        }
    }
}

impl From<&Owner> for OwnerMessage {
    fn from(owner: &Owner) -> Self {
        OwnerMessage {
            id: owner.id.to_string(),
            name: owner.name.clone(),
        }
    }
}

impl From<&Holding> for HoldingMessage {
    fn from(holding: &Holding) -> Self {
        HoldingMessage {
            currency: CurrencyTypeMessage::from(holding.currency.as_ref()),
            quantity: holding.quantity.to_string(),
        }
    }
}

impl From<&Wallet> for WalletMessage {
    fn from(wallet: &Wallet) -> Self {
        WalletMessage {
            id: wallet.id.to_string(),
            owner: OwnerMessage::from(&wallet.owner),
            cash_balance: wallet.cash_balance.to_string(),
            holdings: wallet.holdings().iter().map(HoldingMessage::from).collect(),
        }
    }
}

impl ErrorKind {
    /// gRPC status code for this error class.
    pub fn status_code(self) -> u32 {
        match self {
            ErrorKind::InvalidArgument => 3,
            ErrorKind::NotFound => 5,
            ErrorKind::AlreadyExists => 6,
            ErrorKind::FailedPrecondition => 9,
            ErrorKind::Internal => 13,
        }
    }
}

impl From<&LedgerError> for StatusMessage {
    fn from(error: &LedgerError) -> Self {
        StatusMessage {
            code: error.kind().status_code(),
            message: error.to_string(),
        }
    }
}
