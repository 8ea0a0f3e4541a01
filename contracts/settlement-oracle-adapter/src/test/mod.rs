
mod tips;

use soroban_sdk::{
    testutils::Address as _, testutils::Ledger as _, token, Address, Env, Vec,
};

use crate::interfaces::{Fees, PoolParameters, ReferenceValueStatus};
use crate::math::ONE;
use crate::query::encode_report_value;
use crate::{SettlementOracleAdapter, SettlementOracleAdapterClient};
use mocks::{MockDataNetwork, MockDataNetworkClient, MockSettlementProtocol, MockSettlementProtocolClient};

pub const START: u64 = 1_000;
pub const EXPIRY: u64 = 10_000;
pub const MIN_PERIOD: u64 = 3_600;
/// $10 in 18-decimal USD.
pub const MAX_FEE_USD: i128 = 10 * ONE;
/// 1% settlement fee.
pub const SETTLEMENT_FEE: i128 = ONE / 100;
/// 1000 tokens at 7 decimals.
pub const COLLATERAL_BALANCE: i128 = 10_000_000_000;

pub struct TestEnv<'a> {
    pub env: Env,
    pub adapter: SettlementOracleAdapterClient<'a>,
    pub adapter_addr: Address,
    pub protocol: MockSettlementProtocolClient<'a>,
    pub protocol_addr: Address,
    pub network: MockDataNetworkClient<'a>,
    pub owner: Address,
    pub excess_recipient: Address,
    pub collateral: Address,
}

pub fn setup() -> TestEnv<'static> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let owner = Address::generate(&env);
    let excess_recipient = Address::generate(&env);

    let adapter_addr = env.register(SettlementOracleAdapter, ());
    let adapter = SettlementOracleAdapterClient::new(&env, &adapter_addr);

    let protocol_addr = env.register(MockSettlementProtocol, ());
    let protocol = MockSettlementProtocolClient::new(&env, &protocol_addr);

    let network_addr = env.register(MockDataNetwork, ());
    let network = MockDataNetworkClient::new(&env, &network_addr);

    // Collateral held by the settlement protocol backs fee claim payouts.
    let token_admin = Address::generate(&env);
    let collateral = env.register_stellar_asset_contract_v2(token_admin).address();
    token::StellarAssetClient::new(&env, &collateral).mint(&protocol_addr, &1_000_000_000_000);

    adapter.initialize(
        &owner,
        &protocol_addr,
        &network_addr,
        &excess_recipient,
        &MIN_PERIOD,
        &MAX_FEE_USD,
    );

    TestEnv {
        env,
        adapter,
        adapter_addr,
        protocol,
        protocol_addr,
        network,
        owner,
        excess_recipient,
        collateral,
    }
}

impl TestEnv<'_> {
    /// Creates a pool with this adapter as data provider.
    pub fn create_pool(&self, pool_id: u64, collateral_balance: i128) {
        self.create_pool_with(pool_id, collateral_balance, &self.adapter_addr, ReferenceValueStatus::Open);
    }

    pub fn create_pool_with(
        &self,
        pool_id: u64,
        collateral_balance: i128,
        data_provider: &Address,
        status: ReferenceValueStatus,
    ) {
        self.protocol.create_pool(
            &pool_id,
            &PoolParameters {
                expiry_time: EXPIRY,
                collateral_token: self.collateral.clone(),
                collateral_token_decimals: 7,
                data_provider: data_provider.clone(),
                status_final_reference_value: status,
                final_reference_value: 0,
                collateral_balance,
            },
            &Fees {
                protocol_fee: ONE / 1000,
                settlement_fee: SETTLEMENT_FEE,
            },
        );
    }

    /// Submits a report for `pool_id` at ledger time `at` from a fresh reporter.
    pub fn report(&self, pool_id: u64, at: u64, final_reference_value: i128, rate: i128) -> Address {
        let reporter = Address::generate(&self.env);
        self.report_from(&reporter, pool_id, at, final_reference_value, rate);
        reporter
    }

    pub fn report_from(&self, reporter: &Address, pool_id: u64, at: u64, final_reference_value: i128, rate: i128) {
        self.env.ledger().set_timestamp(at);
        let (query_data, query_id) = self.adapter.get_query_data_and_id(&pool_id);
        self.network.submit_value(
            reporter,
            &query_id,
            &encode_report_value(&self.env, final_reference_value, rate),
            &0,
            &query_data,
        );
    }

    pub fn dispute(&self, pool_id: u64, timestamp: u64) {
        let query_id = self.adapter.get_query_id(&pool_id);
        self.network.begin_dispute(&query_id, &timestamp);
    }

    pub fn advance_to(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn fee_claim(&self, recipient: &Address) -> i128 {
        self.protocol.get_claim(&self.collateral, recipient)
    }

    /// Registers a token and mints `amount` of it to `holder`.
    pub fn new_token(&self, holder: &Address, amount: i128) -> Address {
        let admin = Address::generate(&self.env);
        let token = self.env.register_stellar_asset_contract_v2(admin).address();
        token::StellarAssetClient::new(&self.env, &token).mint(holder, &amount);
        token
    }

    pub fn balance(&self, token: &Address, holder: &Address) -> i128 {
        token::Client::new(&self.env, token).balance(holder)
    }

    pub fn no_tokens(&self) -> Vec<Address> {
        Vec::new(&self.env)
    }
}
