//! Interfaces of the two collaborators the adapter talks to.
//!
//! `contractclient` generates `SettlementProtocolClient` and
//! `DataNetworkClient` from these traits. Field names and types of the shared
//! structs must match the collaborator definitions exactly.

use soroban_sdk::{contractclient, contracttype, Address, Bytes, BytesN, Env};

/// Status of a pool's final reference value in the settlement protocol.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReferenceValueStatus {
    Open = 0,
    Submitted = 1,
    Challenged = 2,
    Confirmed = 3,
}

/// Pool fields the adapter needs from the settlement protocol.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParameters {
    pub expiry_time: u64,
    pub collateral_token: Address,
    pub collateral_token_decimals: u32,
    pub data_provider: Address,
    pub status_final_reference_value: ReferenceValueStatus,
    pub final_reference_value: i128,
    pub collateral_balance: i128,
}

/// Fees charged on a pool, as 18-decimal fractions of the collateral balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fees {
    pub protocol_fee: i128,
    pub settlement_fee: i128,
}

#[contractclient(name = "SettlementProtocolClient")]
pub trait SettlementProtocolInterface {
    fn get_pool_parameters(env: Env, pool_id: u64) -> PoolParameters;

    fn get_fees(env: Env, pool_id: u64) -> Fees;

    /// Records the final value. Only the pool's data provider may call this,
    /// once. With `allow_fee_claim` the settlement fee is credited to the data
    /// provider's fee claim.
    fn set_final_reference_value(env: Env, pool_id: u64, final_reference_value: i128, allow_fee_claim: bool);

    fn get_claim(env: Env, collateral_token: Address, recipient: Address) -> i128;

    /// Moves `amount` of `from`'s fee claim to `recipient`.
    fn transfer_fee_claim(env: Env, from: Address, recipient: Address, collateral_token: Address, amount: i128);

    /// Pays `recipient`'s whole fee claim out in collateral.
    fn claim_fee(env: Env, collateral_token: Address, recipient: Address);
}

#[contractclient(name = "DataNetworkClient")]
pub trait DataNetworkInterface {
    fn submit_value(env: Env, reporter: Address, query_id: BytesN<32>, value: Bytes, nonce: u32, query_data: Bytes);

    fn get_new_value_count_by_query_id(env: Env, query_id: BytesN<32>) -> u32;

    fn get_timestamp_by_index(env: Env, query_id: BytesN<32>, index: u32) -> u64;

    fn is_in_dispute(env: Env, query_id: BytesN<32>, timestamp: u64) -> bool;

    fn retrieve_data(env: Env, query_id: BytesN<32>, timestamp: u64) -> Bytes;

    fn get_reporter_by_timestamp(env: Env, query_id: BytesN<32>, timestamp: u64) -> Address;
}
