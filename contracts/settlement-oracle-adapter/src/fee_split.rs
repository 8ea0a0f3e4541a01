//! Settlement fee split between the reporter and the excess fee recipient.
//!
//! The fee is valued in USD with the rate carried by the selected report.
//! The reporter's share is capped at `max_fee_amount_usd`; anything above the
//! cap goes to the excess fee recipient.

use soroban_sdk::Env;

use crate::error::AdapterError;
use crate::math::{pow10, wide, DECIMALS, ONE};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSplit {
    pub to_reporter: i128,
    pub to_excess_recipient: i128,
}

impl FeeSplit {
    fn all_to_reporter(fee: i128) -> Self {
        Self {
            to_reporter: fee,
            to_excess_recipient: 0,
        }
    }
}

/// Splits `fee` (in collateral token units with `collateral_decimals`) given
/// an 18-decimal collateral/USD `rate` and an 18-decimal USD cap.
///
/// A zero rate gives the whole fee to the reporter. In every case
/// `to_reporter + to_excess_recipient == fee`.
pub fn split_fee(
    env: &Env,
    fee: i128,
    collateral_decimals: u32,
    rate: i128,
    max_fee_amount_usd: i128,
) -> Result<FeeSplit, AdapterError> {
    if collateral_decimals > DECIMALS {
        return Err(AdapterError::UnsupportedCollateralDecimals);
    }
    if fee < 0 || rate < 0 || max_fee_amount_usd < 0 {
        return Err(AdapterError::InvalidAmount);
    }
    if rate == 0 {
        return Ok(FeeSplit::all_to_reporter(fee));
    }

    let scaling = wide(env, pow10(DECIMALS - collateral_decimals));
    let one = wide(env, ONE);
    let rate = wide(env, rate);
    let cap = wide(env, max_fee_amount_usd);

    let fee_usd = wide(env, fee).mul(&scaling).mul(&rate).div(&one);
    if fee_usd <= cap {
        return Ok(FeeSplit::all_to_reporter(fee));
    }

    let cap_in_collateral = cap.mul(&one).div(&rate).div(&scaling);
    let to_reporter = match cap_in_collateral.to_i128() {
        Some(amount) if amount < fee => amount,
        _ => fee,
    };

    Ok(FeeSplit {
        to_reporter,
        to_excess_recipient: fee - to_reporter,
    })
}
