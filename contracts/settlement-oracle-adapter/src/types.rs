use soroban_sdk::{contracttype, Address, Vec};

/// One item of a (batched) finalize or reward claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementArgs {
    pub pool_id: u64,
    /// Tipping tokens to pay out to the reporter in the same call.
    pub tipping_tokens: Vec<Address>,
    /// Also pay out the reporter's settlement fee claim.
    pub claim_fee: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TipAmountsQuery {
    pub pool_id: u64,
    pub tipping_tokens: Vec<Address>,
}

/// `[start_index, end_index)` slice of a pool's tipping tokens. `end_index`
/// is clamped to the list length.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRange {
    pub pool_id: u64,
    pub start_index: u32,
    pub end_index: u32,
}

/// `[start_index, end_index)` slice of the pools a reporter finalized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReporterRange {
    pub reporter: Address,
    pub start_index: u32,
    pub end_index: u32,
}
