//! Fixed-point helpers. Products are formed in 256-bit host integers so an
//! 18-decimal rate times a large collateral amount cannot overflow.

use soroban_sdk::{Env, I256};

use crate::error::AdapterError;

/// 1.0 in 18-decimal fixed point.
pub const ONE: i128 = 1_000_000_000_000_000_000;

pub const DECIMALS: u32 = 18;

pub fn wide(env: &Env, value: i128) -> I256 {
    I256::from_i128(env, value)
}

/// `10^exp`; callers keep `exp <= 18`.
pub fn pow10(exp: u32) -> i128 {
    10i128.pow(exp)
}

/// `floor(a * b / denominator)` for non-negative operands.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, AdapterError> {
    if a < 0 || b < 0 || denominator <= 0 {
        return Err(AdapterError::ArithmeticOverflow);
    }

    wide(env, a)
        .mul(&wide(env, b))
        .div(&wide(env, denominator))
        .to_i128()
        .ok_or(AdapterError::ArithmeticOverflow)
}
