//! Settlement Oracle Adapter Contract
//!
//! This contract is the data provider of derivative pools in a settlement
//! protocol. It picks the reported value that settles a pool from an external
//! data network, pushes it into the settlement protocol once the report has
//! stayed undisputed long enough, and distributes the rewards for doing so:
//! the settlement fee (capped in USD, with the excess going to a separate
//! recipient) and any tips left on the pool.

#![no_std]

mod delayed;
mod error;
mod events;
mod fee_split;
mod interfaces;
mod math;
mod query;
mod selection;
mod storage;
mod timing;
mod tips;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, Vec};

pub use delayed::{DelayedParameter, ACTIVATION_DELAY};
pub use error::AdapterError;
pub use fee_split::{split_fee, FeeSplit};
pub use interfaces::{
    DataNetworkClient, DataNetworkInterface, Fees, PoolParameters, ReferenceValueStatus,
    SettlementProtocolClient, SettlementProtocolInterface,
};
pub use query::{decode_report_value, derive_query, encode_report_value, QUERY_TYPE};
pub use timing::{MIN_PERIOD_UNDISPUTED_LOWER, MIN_PERIOD_UNDISPUTED_UPPER};
pub use types::{PoolRange, ReporterRange, SettlementArgs, TipAmountsQuery};

/// Main contract for settlement value resolution and reward distribution
#[contract]
pub struct SettlementOracleAdapter;

#[contractimpl]
impl SettlementOracleAdapter {
    /// Initialize the contract with its owner, collaborators and parameters.
    ///
    /// # Arguments
    /// * `owner` - Address allowed to change the parameters below
    /// * `settlement_protocol` - Settlement protocol this adapter provides data for
    /// * `data_network` - Data network the reports are read from
    /// * `excess_fee_recipient` - Receives the part of a settlement fee above the USD cap
    /// * `min_period_undisputed` - Seconds a report must stay undisputed
    /// * `max_fee_amount_usd` - USD cap (18 decimals) on the reporter's fee share
    ///
    /// # Events
    /// Emits `init`
    pub fn initialize(
        env: Env,
        owner: Address,
        settlement_protocol: Address,
        data_network: Address,
        excess_fee_recipient: Address,
        min_period_undisputed: u64,
        max_fee_amount_usd: i128,
    ) -> Result<(), AdapterError> {
        if storage::is_initialized(&env) {
            return Err(AdapterError::AlreadyInitialized);
        }

        timing::validate_min_period_undisputed(min_period_undisputed)?;
        Self::validate_max_fee_amount_usd(max_fee_amount_usd)?;
        Self::validate_excess_fee_recipient(&env, &excess_fee_recipient)?;

        storage::set_config(&env, &owner, &settlement_protocol, &data_network);
        storage::set_min_period_undisputed(&env, min_period_undisputed);
        storage::set_delayed(&env, &storage::MAX_FEE_USD, &DelayedParameter::new(max_fee_amount_usd));
        storage::set_delayed(
            &env,
            &storage::EXCESS_RECIPIENT,
            &DelayedParameter::new(excess_fee_recipient),
        );

        events::initialized(&env, &owner, &settlement_protocol, &data_network);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tips
    // -----------------------------------------------------------------------

    /// Tip a pool that has not been finalized yet. The tip is paid to the
    /// reporter whose value finalizes the pool.
    ///
    /// # Events
    /// Emits `tip_add`
    pub fn add_tip(
        env: Env,
        tipper: Address,
        pool_id: u64,
        amount: i128,
        tipping_token: Address,
    ) -> Result<(), AdapterError> {
        tipper.require_auth();
        tips::add(&env, &tipper, pool_id, amount, &tipping_token)
    }

    /// Tip balances per query; untipped tokens read as zero.
    pub fn get_tip_amounts(env: Env, queries: Vec<TipAmountsQuery>) -> Vec<Vec<i128>> {
        let mut result = Vec::new(&env);
        for query in queries.iter() {
            result.push_back(tips::amounts(&env, query.pool_id, &query.tipping_tokens));
        }
        result
    }

    /// Tipping tokens per pool within `[start_index, end_index)`.
    pub fn get_tipping_tokens(env: Env, ranges: Vec<PoolRange>) -> Vec<Vec<Address>> {
        let mut result = Vec::new(&env);
        for range in ranges.iter() {
            let tokens = storage::tipping_tokens(&env, range.pool_id);
            result.push_back(storage::page(&env, &tokens, range.start_index, range.end_index));
        }
        result
    }

    pub fn get_tipping_tokens_lengths(env: Env, pool_ids: Vec<u64>) -> Vec<u32> {
        let mut result = Vec::new(&env);
        for pool_id in pool_ids.iter() {
            result.push_back(storage::tipping_tokens(&env, pool_id).len());
        }
        result
    }

    // -----------------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------------

    /// Finalize a pool with the latest undisputed report submitted after its
    /// expiry, then optionally pay out tips and the reporter's fee.
    ///
    /// # Arguments
    /// * `pool_id` - Pool to finalize
    /// * `tipping_tokens` - Tips to pay to the reporter right away
    /// * `claim_fee` - Also pay out the reporter's settlement fee claim
    ///
    /// # Events
    /// Emits `fin_ref` and `fee_split`, plus `tip_clm`/`fee_clm` for payouts
    pub fn set_final_reference_value(
        env: Env,
        pool_id: u64,
        tipping_tokens: Vec<Address>,
        claim_fee: bool,
    ) -> Result<(), AdapterError> {
        Self::finalize(&env, pool_id)?;
        Self::pay_rewards(&env, pool_id, &tipping_tokens, claim_fee)
    }

    /// Finalize several pools in order. Any failing item fails the whole call.
    pub fn batch_set_final_reference_value(env: Env, args: Vec<SettlementArgs>) -> Result<(), AdapterError> {
        for item in args.iter() {
            Self::finalize(&env, item.pool_id)?;
            Self::pay_rewards(&env, item.pool_id, &item.tipping_tokens, item.claim_fee)?;
        }
        Ok(())
    }

    /// Pay a finalized pool's tips (and optionally the settlement fee claim)
    /// to its reporter. Tokens already paid out are skipped.
    pub fn claim_reward(
        env: Env,
        pool_id: u64,
        tipping_tokens: Vec<Address>,
        claim_fee: bool,
    ) -> Result<(), AdapterError> {
        Self::pay_rewards(&env, pool_id, &tipping_tokens, claim_fee)
    }

    /// Claim rewards for several pools. Any unconfirmed pool fails the whole call.
    pub fn batch_claim_reward(env: Env, args: Vec<SettlementArgs>) -> Result<(), AdapterError> {
        for item in args.iter() {
            Self::pay_rewards(&env, item.pool_id, &item.tipping_tokens, item.claim_fee)?;
        }
        Ok(())
    }

    /// Reporter of record per pool; `None` for pools not finalized here.
    pub fn get_reporters(env: Env, pool_ids: Vec<u64>) -> Vec<Option<Address>> {
        let mut result = Vec::new(&env);
        for pool_id in pool_ids.iter() {
            result.push_back(storage::reporter(&env, pool_id));
        }
        result
    }

    /// Pools finalized by each reporter within `[start_index, end_index)`.
    pub fn get_pool_ids_for_reporters(env: Env, ranges: Vec<ReporterRange>) -> Vec<Vec<u64>> {
        let mut result = Vec::new(&env);
        for range in ranges.iter() {
            let pools = storage::reporter_pools(&env, &range.reporter);
            result.push_back(storage::page(&env, &pools, range.start_index, range.end_index));
        }
        result
    }

    pub fn get_reporter_pool_counts(env: Env, reporters: Vec<Address>) -> Vec<u32> {
        let mut result = Vec::new(&env);
        for reporter in reporters.iter() {
            result.push_back(storage::reporter_pools(&env, &reporter).len());
        }
        result
    }

    /// Values set by this adapter are final; the settlement protocol skips
    /// its challenge phase.
    pub fn get_challengeable(_env: Env) -> bool {
        false
    }

    // -----------------------------------------------------------------------
    // Owner parameters
    // -----------------------------------------------------------------------

    /// Set the minimum undisputed period (owner only). Takes effect immediately.
    ///
    /// # Events
    /// Emits `minp_set`
    pub fn set_min_period_undisputed(env: Env, caller: Address, period: u64) -> Result<(), AdapterError> {
        Self::require_owner(&env, &caller)?;
        timing::validate_min_period_undisputed(period)?;

        storage::set_min_period_undisputed(&env, period);
        events::min_period_set(&env, &caller, period);

        Ok(())
    }

    pub fn get_min_period_undisputed(env: Env) -> Result<u64, AdapterError> {
        storage::min_period_undisputed(&env)
    }

    /// Schedule a new USD fee cap (owner only). It takes effect after
    /// `ACTIVATION_DELAY`.
    ///
    /// # Events
    /// Emits `mfee_upd`
    pub fn update_max_fee_amount_usd(env: Env, caller: Address, amount: i128) -> Result<(), AdapterError> {
        Self::require_owner(&env, &caller)?;
        Self::validate_max_fee_amount_usd(amount)?;

        let mut param: DelayedParameter<i128> = storage::delayed(&env, &storage::MAX_FEE_USD)?;
        let activation_time = param
            .schedule(amount, env.ledger().timestamp(), ACTIVATION_DELAY)
            .map_err(|_| AdapterError::PendingMaxFeeAmountUsdUpdate)?;
        storage::set_delayed(&env, &storage::MAX_FEE_USD, &param);

        events::max_fee_updated(&env, &caller, amount, activation_time);

        Ok(())
    }

    /// Cancel a scheduled USD fee cap that has not taken effect (owner only).
    ///
    /// # Events
    /// Emits `mfee_rvk`
    pub fn revoke_max_fee_usd_update(env: Env, caller: Address) -> Result<(), AdapterError> {
        Self::require_owner(&env, &caller)?;

        let mut param: DelayedParameter<i128> = storage::delayed(&env, &storage::MAX_FEE_USD)?;
        let revoked = *param.latest();
        param
            .revoke(env.ledger().timestamp())
            .map_err(|_| AdapterError::MaxFeeAmountUsdAlreadyActive)?;
        storage::set_delayed(&env, &storage::MAX_FEE_USD, &param);

        events::max_fee_revoked(&env, &caller, revoked, param.current);

        Ok(())
    }

    /// Returns `(previous, latest, activation_time)`. `latest` is in effect
    /// from `activation_time` on; before that `previous` applies.
    pub fn get_max_fee_amount_usd_info(env: Env) -> Result<(i128, i128, u64), AdapterError> {
        let param: DelayedParameter<i128> = storage::delayed(&env, &storage::MAX_FEE_USD)?;
        Ok((param.previous, param.pending, param.activation_time))
    }

    pub fn get_max_fee_amount_usd(env: Env) -> Result<i128, AdapterError> {
        let param: DelayedParameter<i128> = storage::delayed(&env, &storage::MAX_FEE_USD)?;
        Ok(*param.active(env.ledger().timestamp()))
    }

    /// Schedule a new excess fee recipient (owner only). It takes effect
    /// after `ACTIVATION_DELAY`.
    ///
    /// # Events
    /// Emits `xrcp_upd`
    pub fn update_excess_fee_recipient(env: Env, caller: Address, recipient: Address) -> Result<(), AdapterError> {
        Self::require_owner(&env, &caller)?;
        Self::validate_excess_fee_recipient(&env, &recipient)?;

        let mut param: DelayedParameter<Address> = storage::delayed(&env, &storage::EXCESS_RECIPIENT)?;
        let activation_time = param
            .schedule(recipient.clone(), env.ledger().timestamp(), ACTIVATION_DELAY)
            .map_err(|_| AdapterError::PendingExcessFeeRecipientUpdate)?;
        storage::set_delayed(&env, &storage::EXCESS_RECIPIENT, &param);

        events::recipient_updated(&env, &caller, &recipient, activation_time);

        Ok(())
    }

    /// Cancel a scheduled excess fee recipient that has not taken effect
    /// (owner only).
    ///
    /// # Events
    /// Emits `xrcp_rvk`
    pub fn revoke_excess_recipient_update(env: Env, caller: Address) -> Result<(), AdapterError> {
        Self::require_owner(&env, &caller)?;

        let mut param: DelayedParameter<Address> = storage::delayed(&env, &storage::EXCESS_RECIPIENT)?;
        let revoked = param.latest().clone();
        param
            .revoke(env.ledger().timestamp())
            .map_err(|_| AdapterError::ExcessFeeRecipientAlreadyActive)?;
        storage::set_delayed(&env, &storage::EXCESS_RECIPIENT, &param);

        events::recipient_revoked(&env, &caller, &revoked, &param.current);

        Ok(())
    }

    /// Returns `(previous, latest, activation_time)`, as for the fee cap.
    pub fn get_excess_fee_recipient_info(env: Env) -> Result<(Address, Address, u64), AdapterError> {
        let param: DelayedParameter<Address> = storage::delayed(&env, &storage::EXCESS_RECIPIENT)?;
        Ok((param.previous, param.pending, param.activation_time))
    }

    pub fn get_excess_fee_recipient(env: Env) -> Result<Address, AdapterError> {
        let param: DelayedParameter<Address> = storage::delayed(&env, &storage::EXCESS_RECIPIENT)?;
        Ok(param.active(env.ledger().timestamp()).clone())
    }

    pub fn get_activation_delay(_env: Env) -> u64 {
        ACTIVATION_DELAY
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Query id reporters submit values for `pool_id` under.
    pub fn get_query_id(env: Env, pool_id: u64) -> Result<BytesN<32>, AdapterError> {
        let (_, query_id) = Self::query_for(&env, pool_id)?;
        Ok(query_id)
    }

    /// Query data and id for `pool_id` on this adapter's settlement protocol
    /// and network.
    pub fn get_query_data_and_id(env: Env, pool_id: u64) -> Result<(Bytes, BytesN<32>), AdapterError> {
        Self::query_for(&env, pool_id)
    }

    /// Query data and id for any settlement protocol and network.
    pub fn derive_query_data_and_id(
        env: Env,
        pool_id: u64,
        settlement_protocol: Address,
        network_id: BytesN<32>,
    ) -> (Bytes, BytesN<32>) {
        query::derive_query(&env, pool_id, &settlement_protocol, &network_id)
    }

    pub fn get_owner(env: Env) -> Result<Address, AdapterError> {
        storage::owner(&env)
    }

    pub fn get_settlement_protocol(env: Env) -> Result<Address, AdapterError> {
        storage::settlement_protocol(&env)
    }

    pub fn get_data_network(env: Env) -> Result<Address, AdapterError> {
        storage::data_network(&env)
    }

    // Helper functions

    fn finalize(env: &Env, pool_id: u64) -> Result<(), AdapterError> {
        if storage::reporter(env, pool_id).is_some() {
            return Err(AdapterError::AlreadyConfirmedPool);
        }

        let protocol_address = storage::settlement_protocol(env)?;
        let protocol = SettlementProtocolClient::new(env, &protocol_address);
        let adapter = env.current_contract_address();

        let params = protocol.get_pool_parameters(&pool_id);
        if params.data_provider != adapter {
            return Err(AdapterError::NoPermissionToSetValue);
        }
        if params.status_final_reference_value == ReferenceValueStatus::Confirmed {
            return Err(AdapterError::AlreadyConfirmedPool);
        }

        let (_, query_id) = query::derive_query(env, pool_id, &protocol_address, &env.ledger().network_id());
        let report = selection::select_report(env, &storage::data_network(env)?, &query_id, params.expiry_time)?;

        let now = env.ledger().timestamp();
        timing::ensure_undisputed_period_passed(report.timestamp, storage::min_period_undisputed(env)?, now)?;

        let (final_reference_value, collateral_to_usd_rate) = query::decode_report_value(&report.value)?;

        // Confirms the pool and credits the whole settlement fee to this adapter.
        protocol.set_final_reference_value(&pool_id, &final_reference_value, &true);

        let fees = protocol.get_fees(&pool_id);
        let fee = math::mul_div_floor(env, params.collateral_balance, fees.settlement_fee, math::ONE)?;

        let max_fee_amount_usd: DelayedParameter<i128> = storage::delayed(env, &storage::MAX_FEE_USD)?;
        let excess_recipient: DelayedParameter<Address> = storage::delayed(env, &storage::EXCESS_RECIPIENT)?;
        let excess_recipient = excess_recipient.active(now);

        let split = fee_split::split_fee(
            env,
            fee,
            params.collateral_token_decimals,
            collateral_to_usd_rate,
            *max_fee_amount_usd.active(now),
        )?;

        if split.to_reporter > 0 {
            protocol.transfer_fee_claim(&adapter, &report.reporter, &params.collateral_token, &split.to_reporter);
        }
        if split.to_excess_recipient > 0 {
            protocol.transfer_fee_claim(
                &adapter,
                excess_recipient,
                &params.collateral_token,
                &split.to_excess_recipient,
            );
        }

        storage::record_reporter(env, pool_id, &report.reporter);

        events::final_value_set(env, pool_id, final_reference_value, params.expiry_time, report.timestamp);
        events::fee_split(env, pool_id, &report.reporter, excess_recipient, &split);

        Ok(())
    }

    fn pay_rewards(
        env: &Env,
        pool_id: u64,
        tipping_tokens: &Vec<Address>,
        claim_fee: bool,
    ) -> Result<(), AdapterError> {
        let reporter = storage::reporter(env, pool_id).ok_or(AdapterError::NotConfirmedPool)?;

        tips::claim(env, pool_id, &reporter, tipping_tokens);

        if claim_fee {
            let protocol = SettlementProtocolClient::new(env, &storage::settlement_protocol(env)?);
            let collateral_token = protocol.get_pool_parameters(&pool_id).collateral_token;
            protocol.claim_fee(&collateral_token, &reporter);

            events::fee_claimed(env, pool_id, &reporter, &collateral_token);
        }

        Ok(())
    }

    fn query_for(env: &Env, pool_id: u64) -> Result<(Bytes, BytesN<32>), AdapterError> {
        let protocol = storage::settlement_protocol(env)?;
        Ok(query::derive_query(env, pool_id, &protocol, &env.ledger().network_id()))
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), AdapterError> {
        caller.require_auth();

        if *caller != storage::owner(env)? {
            return Err(AdapterError::NotContractOwner);
        }

        Ok(())
    }

    fn validate_max_fee_amount_usd(amount: i128) -> Result<(), AdapterError> {
        if amount < 0 {
            return Err(AdapterError::InvalidAmount);
        }
        Ok(())
    }

    fn validate_excess_fee_recipient(env: &Env, recipient: &Address) -> Result<(), AdapterError> {
        if *recipient == env.current_contract_address() {
            return Err(AdapterError::InvalidExcessFeeRecipient);
        }
        Ok(())
    }
}
