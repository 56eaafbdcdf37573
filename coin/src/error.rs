use near_sdk::FunctionError;
use thiserror::Error as ThisError;

/// Every message here is load-bearing: callers (in particular the
/// `foundation` contract, reading these back out of a failed promise) match
/// on the text.
#[derive(Debug, ThisError, FunctionError)]
pub enum CoinError {
    #[error("incorrect amount")]
    IncorrectAmount,

    #[error("not enough coins")]
    NotEnoughCoins,

    #[error("no permissions")]
    NoPermissions,

    #[error("all money must be refunded")]
    BatchRefundIncomplete,

    #[error("invariant violated: expirable ledger is corrupt")]
    InvariantViolated,
}
