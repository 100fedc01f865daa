//! Pool Calculator
//!
//! Fixed-rate conversion between reserve and FLS amounts.
//!
//! - reserve -> FLS: `fls = reserve * rate_scale / rate`
//! - FLS -> reserve: `reserve = fls * rate / rate_scale`
//!
//! Division truncates. Products are computed in BigInt so large amounts
//! never wrap; a result that does not fit an [`Amount`] is `Overflow`.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use farmland_core::{Amount, LedgerError, LedgerResult, Rate};

/// `amount * numerator / denominator`, truncating
fn mul_div(amount: Amount, numerator: Rate, denominator: Rate) -> LedgerResult<Amount> {
    let denominator = BigInt::from(denominator);
    if denominator.is_zero() {
        return Err(LedgerError::ZeroRate);
    }
    let result = BigInt::from(amount) * BigInt::from(numerator) / denominator;
    result.to_u128().ok_or(LedgerError::Overflow)
}

fn ensure_rate(rate: Rate, rate_scale: Rate) -> LedgerResult<()> {
    if rate == 0 || rate_scale == 0 {
        return Err(LedgerError::ZeroRate);
    }
    Ok(())
}

/// FLS minted for `reserve_amount` deposited at `rate`
pub fn fls_for_reserve(reserve_amount: Amount, rate: Rate, rate_scale: Rate) -> LedgerResult<Amount> {
    ensure_rate(rate, rate_scale)?;
    mul_div(reserve_amount, rate_scale, rate)
}

/// Reserve paid out for `fls_amount` burned at `rate`
pub fn reserve_for_fls(fls_amount: Amount, rate: Rate, rate_scale: Rate) -> LedgerResult<Amount> {
    ensure_rate(rate, rate_scale)?;
    mul_div(fls_amount, rate, rate_scale)
}

/// Reserve returned by swapping `reserve_amount` in and straight back out
pub fn round_trip(reserve_amount: Amount, rate: Rate, rate_scale: Rate) -> LedgerResult<Amount> {
    let fls = fls_for_reserve(reserve_amount, rate, rate_scale)?;
    reserve_for_fls(fls, rate, rate_scale)
}
