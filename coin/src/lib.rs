mod contract;
mod error;
mod expirable;

pub use contract::{Contract, ContractExt, TransferRequest, UserBalance};
pub use error::CoinError;
pub use expirable::Deposit;
