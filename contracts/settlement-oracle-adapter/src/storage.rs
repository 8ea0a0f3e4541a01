//! Storage layout and accessors.
//!
//! Configuration and the delayed parameters live in instance storage under
//! short symbol keys. Per-pool and per-reporter records live in persistent
//! storage under `(symbol, id)` tuple keys and have their TTL extended on
//! every write.

use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

use crate::delayed::DelayedParameter;
use crate::error::AdapterError;

const DAY_IN_LEDGERS: u32 = 17280;
const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

const OWNER: Symbol = symbol_short!("owner");
const SETTLEMENT: Symbol = symbol_short!("settle");
const DATA_NETWORK: Symbol = symbol_short!("data_net");
const MIN_PERIOD: Symbol = symbol_short!("min_prd");
pub const MAX_FEE_USD: Symbol = symbol_short!("max_fee");
pub const EXCESS_RECIPIENT: Symbol = symbol_short!("xs_rcpt");

const REPORTER: Symbol = symbol_short!("reporter");
const REPORTER_POOLS: Symbol = symbol_short!("rep_pools");
const TIP: Symbol = symbol_short!("tip");
const TIP_TOKENS: Symbol = symbol_short!("tip_tkns");

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

pub fn set_config(env: &Env, owner: &Address, settlement_protocol: &Address, data_network: &Address) {
    let instance = env.storage().instance();
    instance.set(&OWNER, owner);
    instance.set(&SETTLEMENT, settlement_protocol);
    instance.set(&DATA_NETWORK, data_network);
    extend_instance(env);
}

pub fn owner(env: &Env) -> Result<Address, AdapterError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(AdapterError::NotInitialized)
}

pub fn settlement_protocol(env: &Env) -> Result<Address, AdapterError> {
    env.storage()
        .instance()
        .get(&SETTLEMENT)
        .ok_or(AdapterError::NotInitialized)
}

pub fn data_network(env: &Env) -> Result<Address, AdapterError> {
    env.storage()
        .instance()
        .get(&DATA_NETWORK)
        .ok_or(AdapterError::NotInitialized)
}

pub fn min_period_undisputed(env: &Env) -> Result<u64, AdapterError> {
    env.storage()
        .instance()
        .get(&MIN_PERIOD)
        .ok_or(AdapterError::NotInitialized)
}

pub fn set_min_period_undisputed(env: &Env, period: u64) {
    env.storage().instance().set(&MIN_PERIOD, &period);
    extend_instance(env);
}

/// Loads a delayed parameter stored as a `(previous, current, pending, activation_time)` tuple.
pub fn delayed<T>(env: &Env, key: &Symbol) -> Result<DelayedParameter<T>, AdapterError>
where
    (T, T, T, u64): TryFromVal<Env, Val>,
{
    let (previous, current, pending, activation_time): (T, T, T, u64) = env
        .storage()
        .instance()
        .get(key)
        .ok_or(AdapterError::NotInitialized)?;

    Ok(DelayedParameter {
        previous,
        current,
        pending,
        activation_time,
    })
}

pub fn set_delayed<T>(env: &Env, key: &Symbol, param: &DelayedParameter<T>)
where
    T: Clone,
    (T, T, T, u64): IntoVal<Env, Val>,
{
    let stored = (
        param.previous.clone(),
        param.current.clone(),
        param.pending.clone(),
        param.activation_time,
    );
    env.storage().instance().set(key, &stored);
    extend_instance(env);
}

// ---------------------------------------------------------------------------
// Reporter of record and reporter index
// ---------------------------------------------------------------------------

pub fn reporter(env: &Env, pool_id: u64) -> Option<Address> {
    env.storage().persistent().get(&(REPORTER, pool_id))
}

/// Records the reporter of record for a pool and appends the pool to the
/// reporter's index. Callers guarantee the pool has no reporter yet.
pub fn record_reporter(env: &Env, pool_id: u64, reporter: &Address) {
    let key = (REPORTER, pool_id);
    env.storage().persistent().set(&key, reporter);
    extend_persistent(env, &key);

    let pools_key = (REPORTER_POOLS, reporter.clone());
    let mut pools = reporter_pools(env, reporter);
    pools.push_back(pool_id);
    env.storage().persistent().set(&pools_key, &pools);
    extend_persistent(env, &pools_key);
}

pub fn reporter_pools(env: &Env, reporter: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&(REPORTER_POOLS, reporter.clone()))
        .unwrap_or(Vec::new(env))
}

// ---------------------------------------------------------------------------
// Tips
// ---------------------------------------------------------------------------

pub fn tip(env: &Env, pool_id: u64, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(TIP, pool_id, token.clone()))
        .unwrap_or(0)
}

pub fn set_tip(env: &Env, pool_id: u64, token: &Address, amount: i128) {
    let key = (TIP, pool_id, token.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent(env, &key);
}

pub fn tipping_tokens(env: &Env, pool_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&(TIP_TOKENS, pool_id))
        .unwrap_or(Vec::new(env))
}

pub fn push_tipping_token(env: &Env, pool_id: u64, token: &Address) {
    let key = (TIP_TOKENS, pool_id);
    let mut tokens = tipping_tokens(env, pool_id);
    tokens.push_back(token.clone());
    env.storage().persistent().set(&key, &tokens);
    extend_persistent(env, &key);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Returns `items[start..end]` with `end` clamped to the list length. An
/// empty list is returned when the clamped range is empty.
pub fn page<T>(env: &Env, items: &Vec<T>, start: u32, end: u32) -> Vec<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    let end = end.min(items.len());
    if start >= end {
        return Vec::new(env);
    }
    items.slice(start..end)
}

// ---------------------------------------------------------------------------
// TTL
// ---------------------------------------------------------------------------

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
}

fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SettlementOracleAdapter;
    use soroban_sdk::{testutils::Address as _, vec};

    #[test]
    fn test_page_clamps_end_to_length() {
        let env = Env::default();
        let items = vec![&env, 1u64, 2, 3];

        assert_eq!(page(&env, &items, 0, 10), items);
        assert_eq!(page(&env, &items, 1, 2), vec![&env, 2u64]);
        assert_eq!(page(&env, &items, 2, 100), vec![&env, 3u64]);
        assert_eq!(page(&env, &items, 3, 100).len(), 0);
        assert_eq!(page(&env, &items, 2, 1).len(), 0);
    }

    #[test]
    fn test_record_reporter_appends_to_index() {
        let env = Env::default();
        let contract_id = env.register(SettlementOracleAdapter, ());
        let reporter_addr = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert_eq!(reporter(&env, 7), None);

            record_reporter(&env, 7, &reporter_addr);
            record_reporter(&env, 9, &reporter_addr);

            assert_eq!(reporter(&env, 7), Some(reporter_addr.clone()));
            assert_eq!(reporter_pools(&env, &reporter_addr), vec![&env, 7u64, 9]);
        });
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let env = Env::default();
        let contract_id = env.register(SettlementOracleAdapter, ());

        env.as_contract(&contract_id, || {
            assert!(!is_initialized(&env));
            assert_eq!(owner(&env), Err(AdapterError::NotInitialized));
            assert_eq!(
                delayed::<i128>(&env, &MAX_FEE_USD).map(|p| p.current),
                Err(AdapterError::NotInitialized)
            );
        });
    }
}
