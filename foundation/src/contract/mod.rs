mod allowance;
mod close;
mod create;
mod donate;
mod get;
mod lifecycle;
mod withdraw;

pub use self::{
    create::{CreateFoundationRequest, UpdateFoundationRequest},
    get::Filter,
};

use near_sdk::{
    BorshStorageKey, FunctionError, Gas, PanicOnDefault,
    borsh::BorshSerialize,
    env, near,
    store::IterableMap,
};

use crate::{error::FoundationError, project::Project};

/// Gas reserved for a callback that only reads one or two [`Project`]
/// fields back and writes a handful more. Cross-contract gas is handed out
/// with `with_unused_gas_weight(0)` throughout (mirroring the teacher's
/// `defuse` contract) so a caller's unused gas is never silently consumed
/// by a callback that doesn't need it.
pub(crate) const CALLBACK_GAS: Gas = Gas::from_tgas(10);
/// Gas attached to the outgoing `transfer`/`transfer_from` call itself.
pub(crate) const CROSS_CONTRACT_GAS: Gas = Gas::from_tgas(15);

#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "::near_sdk::borsh")]
enum Prefix {
    Projects,
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    projects: IterableMap<String, Project>,
}

#[near]
impl Contract {
    /// `InitLedger()`. Initializes an empty projects map. Unlike Coin's
    /// `InitLedger`, the source takes no arguments here either; `#[init]` +
    /// `PanicOnDefault` gives the same "must not overwrite an existing
    /// registry" guarantee without an explicit existence check.
    #[init]
    pub fn new() -> Self {
        Self {
            projects: IterableMap::new(Prefix::Projects),
        }
    }
}

impl Contract {
    /// A project id deterministic within this receipt's execution:
    /// `env::random_seed()` is the block producer's per-receipt seed, the
    /// same across every validator that re-executes it, unlike OS entropy.
    fn fresh_project_id(&self) -> String {
        let seed = env::random_seed();
        let mut bytes = [0u8; 16];
        let len = bytes.len().min(seed.len());
        bytes[..len].copy_from_slice(&seed[..len]);
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    fn project_or_panic(&self, project_id: &str) -> &Project {
        self.projects
            .get(project_id)
            .unwrap_or_else(|| FoundationError::NotFound.panic())
    }

    fn project_mut_or_panic(&mut self, project_id: &str) -> &mut Project {
        if !self.projects.contains_key(project_id) {
            FoundationError::NotFound.panic();
        }
        self.projects.get_mut(project_id).unwrap_or_else(|| unreachable!())
    }
}
