//! Query identifier derivation and the report value codec.
//!
//! Reporters submit values to the data network under a query id derived from
//! the pool id, the settlement protocol address and the network id. The
//! submitted value carries the final reference value followed by the
//! collateral/USD rate, each as a 32-byte big-endian word.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::error::AdapterError;

/// Namespace tag wrapped around every query payload.
pub const QUERY_TYPE: &str = "DIVAProtocol";

const WORD: usize = 32;
const REPORT_VALUE_LEN: u32 = 2 * WORD as u32;

/// Encodes `value` as a 32-byte big-endian word.
pub fn word(env: &Env, value: u64) -> BytesN<32> {
    let mut buf = [0u8; WORD];
    buf[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    BytesN::from_array(env, &buf)
}

/// Returns `(query_data, query_id)` for a pool.
pub fn derive_query(
    env: &Env,
    pool_id: u64,
    settlement_protocol: &Address,
    network_id: &BytesN<32>,
) -> (Bytes, BytesN<32>) {
    let inner = (word(env, pool_id), settlement_protocol.clone(), network_id.clone()).to_xdr(env);
    let query_data = (String::from_str(env, QUERY_TYPE), inner).to_xdr(env);
    let query_id = env.crypto().keccak256(&query_data).to_bytes();

    (query_data, query_id)
}

/// Encodes a report value the way reporters submit it.
pub fn encode_report_value(env: &Env, final_reference_value: i128, collateral_to_usd_rate: i128) -> Bytes {
    let mut buf = [0u8; 2 * WORD];
    buf[WORD - 16..WORD].copy_from_slice(&(final_reference_value as u128).to_be_bytes());
    buf[2 * WORD - 16..].copy_from_slice(&(collateral_to_usd_rate as u128).to_be_bytes());
    Bytes::from_array(env, &buf)
}

/// Decodes `(final_reference_value, collateral_to_usd_rate)` from a report value.
pub fn decode_report_value(value: &Bytes) -> Result<(i128, i128), AdapterError> {
    if value.len() != REPORT_VALUE_LEN {
        return Err(AdapterError::InvalidReportValue);
    }

    let mut buf = [0u8; 2 * WORD];
    value.copy_into_slice(&mut buf);

    let (first, second) = buf.split_at(WORD);
    Ok((read_word(first)?, read_word(second)?))
}

fn read_word(word: &[u8]) -> Result<i128, AdapterError> {
    let (high, low) = word.split_at(WORD - 16);
    if high.iter().any(|b| *b != 0) {
        return Err(AdapterError::InvalidReportValue);
    }

    let mut low_bytes = [0u8; 16];
    low_bytes.copy_from_slice(low);
    i128::try_from(u128::from_be_bytes(low_bytes)).map_err(|_| AdapterError::InvalidReportValue)
}
