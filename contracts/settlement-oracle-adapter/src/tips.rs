//! Tip ledger: per-pool, per-token tips held in custody until the pool is
//! finalized, then paid once to the reporter of record.

use soroban_sdk::{token, Address, Env, Vec};

use crate::error::AdapterError;
use crate::events;
use crate::storage;

/// Pulls `amount` of `token` from `tipper` into custody and credits the pool.
pub fn add(env: &Env, tipper: &Address, pool_id: u64, amount: i128, token: &Address) -> Result<(), AdapterError> {
    if storage::reporter(env, pool_id).is_some() {
        return Err(AdapterError::AlreadyConfirmedPool);
    }
    if amount <= 0 {
        return Err(AdapterError::InvalidAmount);
    }

    let current = storage::tip(env, pool_id, token);
    // Tips only grow before finalization, so a zero balance means a new token.
    if current == 0 {
        storage::push_tipping_token(env, pool_id, token);
    }
    let updated = current
        .checked_add(amount)
        .ok_or(AdapterError::ArithmeticOverflow)?;
    storage::set_tip(env, pool_id, token, updated);

    token::Client::new(env, token).transfer(tipper, &env.current_contract_address(), &amount);

    events::tip_added(env, pool_id, token, amount, tipper);

    Ok(())
}

pub fn amounts(env: &Env, pool_id: u64, tokens: &Vec<Address>) -> Vec<i128> {
    let mut amounts = Vec::new(env);
    for token in tokens.iter() {
        amounts.push_back(storage::tip(env, pool_id, &token));
    }
    amounts
}

/// Pays the listed tokens' balances to `reporter`. Each entry is zeroed
/// before its transfer; zero entries are skipped.
pub fn claim(env: &Env, pool_id: u64, reporter: &Address, tokens: &Vec<Address>) {
    let contract = env.current_contract_address();

    for token in tokens.iter() {
        let amount = storage::tip(env, pool_id, &token);
        if amount == 0 {
            continue;
        }

        storage::set_tip(env, pool_id, &token, 0);
        token::Client::new(env, &token).transfer(&contract, reporter, &amount);

        events::tip_claimed(env, pool_id, reporter, &token, amount);
    }
}
