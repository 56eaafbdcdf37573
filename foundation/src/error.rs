use near_sdk::FunctionError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, FunctionError)]
pub enum FoundationError {
    #[error("Foundation does not exist")]
    NotFound,

    #[error("Foundation is closed")]
    AlreadyClosed,

    #[error("no permissions")]
    NoPermissions,

    #[error("incorrect amount")]
    IncorrectAmount,

    #[error("currency '{0}' is not accepted by this project")]
    UnsupportedCurrency(String),

    #[error("project can only be updated while in draft")]
    NotDraft,

    #[error("project can only be submitted for review while in draft")]
    NotDraftForReview,

    #[error("project can only be activated or rejected while in review")]
    NotInReview,

    #[error("project is not active")]
    NotActive,

    #[error("withdrawal not allowed")]
    WithdrawalNotAllowed,

    #[error("contract is not closed")]
    ContractNotClosed,

    #[error("not enough funds")]
    NotEnoughFunds,

    /// NEAR's `PromiseResult::Failed` carries no message, so a failed
    /// cross-contract leg surfaces this instead of the callee's original
    /// text (which Fabric's in-process chaincode invocation can recover
    /// but a NEAR `Promise` callback cannot).
    #[error("cross-contract call failed")]
    CrossContractCallFailed,
}
