//! Picks the report that settles a pool.
//!
//! The most recent report submitted strictly after the pool's expiry that is
//! not disputed at the time of the call wins. Reports at or before expiry are
//! never eligible. Selection reads the data network fresh on every call.

use soroban_sdk::{Address, Bytes, BytesN, Env};

use crate::error::AdapterError;
use crate::interfaces::DataNetworkClient;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectedReport {
    pub value: Bytes,
    pub timestamp: u64,
    pub reporter: Address,
}

pub fn select_report(
    env: &Env,
    data_network: &Address,
    query_id: &BytesN<32>,
    expiry_time: u64,
) -> Result<SelectedReport, AdapterError> {
    let client = DataNetworkClient::new(env, data_network);
    let mut index = client.get_new_value_count_by_query_id(query_id);

    // Reports are ordered by timestamp, so walk back from the newest and stop
    // at the first one that is not after expiry.
    while index > 0 {
        index -= 1;

        let timestamp = client.get_timestamp_by_index(query_id, &index);
        if timestamp <= expiry_time {
            break;
        }
        if client.is_in_dispute(query_id, &timestamp) {
            continue;
        }

        return Ok(SelectedReport {
            value: client.retrieve_data(query_id, &timestamp),
            timestamp,
            reporter: client.get_reporter_by_timestamp(query_id, &timestamp),
        });
    }

    Err(AdapterError::NoOracleSubmissionAfterExpiryTime)
}
