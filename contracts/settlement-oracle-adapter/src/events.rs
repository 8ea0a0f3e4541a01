use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::fee_split::FeeSplit;

/// Event symbols
pub const INITIALIZED: Symbol = symbol_short!("init");
pub const TIP_ADDED: Symbol = symbol_short!("tip_add");
pub const TIP_CLAIMED: Symbol = symbol_short!("tip_clm");
pub const FINAL_VALUE_SET: Symbol = symbol_short!("fin_ref");
pub const FEE_SPLIT: Symbol = symbol_short!("fee_split");
pub const FEE_CLAIMED: Symbol = symbol_short!("fee_clm");
pub const MIN_PERIOD_SET: Symbol = symbol_short!("minp_set");
pub const MAX_FEE_UPDATED: Symbol = symbol_short!("mfee_upd");
pub const MAX_FEE_REVOKED: Symbol = symbol_short!("mfee_rvk");
pub const RECIPIENT_UPDATED: Symbol = symbol_short!("xrcp_upd");
pub const RECIPIENT_REVOKED: Symbol = symbol_short!("xrcp_rvk");

pub fn initialized(env: &Env, owner: &Address, settlement_protocol: &Address, data_network: &Address) {
    env.events().publish(
        (INITIALIZED,),
        (owner.clone(), settlement_protocol.clone(), data_network.clone()),
    );
}

pub fn tip_added(env: &Env, pool_id: u64, token: &Address, amount: i128, tipper: &Address) {
    env.events()
        .publish((TIP_ADDED, pool_id), (token.clone(), amount, tipper.clone()));
}

pub fn tip_claimed(env: &Env, pool_id: u64, recipient: &Address, token: &Address, amount: i128) {
    env.events()
        .publish((TIP_CLAIMED, pool_id), (recipient.clone(), token.clone(), amount));
}

pub fn final_value_set(env: &Env, pool_id: u64, value: i128, expiry_time: u64, report_timestamp: u64) {
    env.events().publish(
        (FINAL_VALUE_SET, pool_id),
        (value, expiry_time, report_timestamp),
    );
}

pub fn fee_split(env: &Env, pool_id: u64, reporter: &Address, excess_recipient: &Address, split: &FeeSplit) {
    env.events().publish(
        (FEE_SPLIT, pool_id),
        (
            reporter.clone(),
            split.to_reporter,
            excess_recipient.clone(),
            split.to_excess_recipient,
        ),
    );
}

pub fn fee_claimed(env: &Env, pool_id: u64, recipient: &Address, token: &Address) {
    env.events()
        .publish((FEE_CLAIMED, pool_id), (recipient.clone(), token.clone()));
}

pub fn min_period_set(env: &Env, by: &Address, period: u64) {
    env.events().publish((MIN_PERIOD_SET,), (by.clone(), period));
}

pub fn max_fee_updated(env: &Env, by: &Address, amount: i128, activation_time: u64) {
    env.events()
        .publish((MAX_FEE_UPDATED,), (by.clone(), amount, activation_time));
}

pub fn max_fee_revoked(env: &Env, by: &Address, revoked: i128, restored: i128) {
    env.events()
        .publish((MAX_FEE_REVOKED,), (by.clone(), revoked, restored));
}

pub fn recipient_updated(env: &Env, by: &Address, recipient: &Address, activation_time: u64) {
    env.events().publish(
        (RECIPIENT_UPDATED,),
        (by.clone(), recipient.clone(), activation_time),
    );
}

pub fn recipient_revoked(env: &Env, by: &Address, revoked: &Address, restored: &Address) {
    env.events().publish(
        (RECIPIENT_REVOKED,),
        (by.clone(), revoked.clone(), restored.clone()),
    );
}
