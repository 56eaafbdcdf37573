mod contract;
mod error;
mod ext;
mod project;

pub use contract::{Contract, ContractExt, CreateFoundationRequest, Filter, UpdateFoundationRequest};
pub use error::FoundationError;
pub use ext::{CoinCrossContract, ext_coin};
pub use project::{Donation, DonorKey, Project, ProjectStatus, Withdrawal};
