use soroban_sdk::{testutils::Address as _, vec, Address};

use super::*;
use crate::error::AdapterError;
use crate::types::{SettlementArgs, TipAmountsQuery};

const RATE: i128 = ONE;

struct Tipped {
    t: TestEnv<'static>,
    tipper: Address,
    token: Address,
}

/// Pool 1 with a report past its undisputed period, tipped 100 + 50 of one token.
fn tipped_pool() -> Tipped {
    let t = setup();
    let tipper = Address::generate(&t.env);
    let token = t.new_token(&tipper, 1_000);

    t.create_pool(1, COLLATERAL_BALANCE);
    t.adapter.add_tip(&tipper, &1, &100, &token);
    t.adapter.add_tip(&tipper, &1, &50, &token);

    Tipped { t, tipper, token }
}

#[test]
fn test_add_tip_accumulates_and_lists_token_once() {
    let Tipped { t, tipper, token } = tipped_pool();

    assert_eq!(
        t.adapter.get_tip_amounts(&vec![
            &t.env,
            TipAmountsQuery { pool_id: 1, tipping_tokens: vec![&t.env, token.clone()] },
        ]),
        vec![&t.env, vec![&t.env, 150i128]]
    );
    assert_eq!(t.adapter.get_tipping_tokens_lengths(&vec![&t.env, 1u64]), vec![&t.env, 1u32]);
    assert_eq!(t.balance(&token, &t.adapter_addr), 150);
    assert_eq!(t.balance(&token, &tipper), 850);
}

#[test]
fn test_add_tip_rejects_non_positive_amount() {
    let Tipped { t, tipper, token } = tipped_pool();

    assert_eq!(t.adapter.try_add_tip(&tipper, &1, &0, &token), Err(Ok(AdapterError::InvalidAmount)));
    assert_eq!(t.adapter.try_add_tip(&tipper, &1, &-5, &token), Err(Ok(AdapterError::InvalidAmount)));
}

#[test]
fn test_finalize_pays_tips_once() {
    let Tipped { t, token, .. } = tipped_pool();
    let reporter = t.report(1, EXPIRY + 10, 7, RATE);
    t.advance_to(EXPIRY + 10 + MIN_PERIOD);

    t.adapter.set_final_reference_value(&1, &vec![&t.env, token.clone()], &false);

    assert_eq!(t.balance(&token, &reporter), 150);
    assert_eq!(t.balance(&token, &t.adapter_addr), 0);

    // Claiming again succeeds and pays nothing.
    t.adapter.claim_reward(&1, &vec![&t.env, token.clone()], &false);
    assert_eq!(t.balance(&token, &reporter), 150);
    assert_eq!(
        t.adapter.get_tip_amounts(&vec![
            &t.env,
            TipAmountsQuery { pool_id: 1, tipping_tokens: vec![&t.env, token] },
        ]),
        vec![&t.env, vec![&t.env, 0i128]]
    );
}

#[test]
fn test_claim_reward_after_finalize() {
    let Tipped { t, tipper, token } = tipped_pool();
    let second = t.new_token(&tipper, 10);
    t.adapter.add_tip(&tipper, &1, &10, &second);

    let reporter = t.report(1, EXPIRY + 10, 7, RATE);
    t.advance_to(EXPIRY + 10 + MIN_PERIOD);
    t.adapter.set_final_reference_value(&1, &t.no_tokens(), &false);

    assert_eq!(t.balance(&token, &reporter), 0);

    // An untipped token in the list is skipped.
    let untipped = t.new_token(&tipper, 1);
    t.adapter.claim_reward(&1, &vec![&t.env, token.clone(), untipped, second.clone()], &true);

    assert_eq!(t.balance(&token, &reporter), 150);
    assert_eq!(t.balance(&second, &reporter), 10);
    assert_eq!(t.balance(&t.collateral, &reporter), 100_000_000);
}

#[test]
fn test_add_tip_after_finalize_fails() {
    let Tipped { t, tipper, token } = tipped_pool();
    t.report(1, EXPIRY + 10, 7, RATE);
    t.advance_to(EXPIRY + 10 + MIN_PERIOD);
    t.adapter.set_final_reference_value(&1, &t.no_tokens(), &false);

    assert_eq!(
        t.adapter.try_add_tip(&tipper, &1, &10, &token),
        Err(Ok(AdapterError::AlreadyConfirmedPool))
    );
}

#[test]
fn test_claim_reward_before_finalize_fails() {
    let Tipped { t, token, .. } = tipped_pool();

    assert_eq!(
        t.adapter.try_claim_reward(&1, &vec![&t.env, token], &false),
        Err(Ok(AdapterError::NotConfirmedPool))
    );
}

#[test]
fn test_batch_claim_rolls_back_on_unconfirmed_pool() {
    let Tipped { t, tipper, token } = tipped_pool();
    t.create_pool(2, COLLATERAL_BALANCE);
    t.adapter.add_tip(&tipper, &2, &20, &token);

    let reporter = t.report(1, EXPIRY + 10, 7, RATE);
    t.advance_to(EXPIRY + 10 + MIN_PERIOD);
    t.adapter.set_final_reference_value(&1, &t.no_tokens(), &false);

    let result = t.adapter.try_batch_claim_reward(&vec![
        &t.env,
        SettlementArgs { pool_id: 1, tipping_tokens: vec![&t.env, token.clone()], claim_fee: false },
        SettlementArgs { pool_id: 2, tipping_tokens: vec![&t.env, token.clone()], claim_fee: false },
    ]);
    assert_eq!(result, Err(Ok(AdapterError::NotConfirmedPool)));
    assert_eq!(t.balance(&token, &reporter), 0);

    t.adapter.batch_claim_reward(&vec![
        &t.env,
        SettlementArgs { pool_id: 1, tipping_tokens: vec![&t.env, token.clone()], claim_fee: true },
    ]);
    assert_eq!(t.balance(&token, &reporter), 150);
    assert_eq!(t.balance(&t.collateral, &reporter), 100_000_000);
}
