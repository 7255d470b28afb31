//! Pure reward formulas.
//!
//! Every function truncates toward zero. The lost dust is at most one unit of
//! the token's smallest denomination per evaluation and is never recovered.
//! Nothing here touches storage.

use crate::{
    StakingError, BASIS_POINTS, MAX_COMPOUNDING_PERIODS, PRECISION, SECONDS_PER_DAY,
    SECONDS_PER_YEAR,
};

fn mul(a: i128, b: i128) -> Result<i128, StakingError> {
    a.checked_mul(b).ok_or(StakingError::MathOverflow)
}

fn div(a: i128, b: i128) -> Result<i128, StakingError> {
    if b == 0 {
        return Err(StakingError::DivideByZero);
    }
    a.checked_div(b).ok_or(StakingError::MathOverflow)
}

/// `floor(a × b / PRECISION)` for non-negative `a` and `0 ≤ b < PRECISION`,
/// split on `a`'s quotient and remainder so the product never leaves `i128`.
fn mul_frac(a: i128, b: i128) -> Result<i128, StakingError> {
    let whole = mul(a / PRECISION, b)?;
    let part = div(mul(a % PRECISION, b)?, PRECISION)?;
    whole.checked_add(part).ok_or(StakingError::MathOverflow)
}

/// Ratio form used by the single-pool vault.
///
/// ```text
/// reward = floor(elapsed × principal × numerator / (time_unit × denominator))
/// ```
pub fn linear_ratio(
    principal: i128,
    elapsed: u64,
    numerator: u64,
    denominator: u64,
    time_unit: u64,
) -> Result<i128, StakingError> {
    if denominator == 0 || time_unit == 0 {
        return Err(StakingError::DivideByZero);
    }
    if principal <= 0 || elapsed == 0 || numerator == 0 {
        return Ok(0);
    }
    let top = mul(mul(elapsed as i128, principal)?, numerator as i128)?;
    let bottom = mul(time_unit as i128, denominator as i128)?;
    div(top, bottom)
}

/// Annual-rate form driven by a pool's cumulative `rate × seconds` index,
/// so that rate changes are priced per segment.
pub fn linear_from_index(principal: i128, index_delta: i128) -> Result<i128, StakingError> {
    if principal <= 0 || index_delta <= 0 {
        return Ok(0);
    }
    div(
        mul(principal, index_delta)?,
        mul(SECONDS_PER_YEAR as i128, BASIS_POINTS)?,
    )
}

/// Daily compounding at `annual_rate_bps / 365` per whole day.
///
/// The principal grows by `floor(value × daily_rate)` once per elapsed day at
/// [`PRECISION`] scale; the partial trailing day is discarded. Cost is linear
/// in the number of days, bounded by [`MAX_COMPOUNDING_PERIODS`]. Only a
/// value that no longer fits `i128` reports `MathOverflow`.
pub fn compound(principal: i128, annual_rate_bps: i128, elapsed: u64) -> Result<i128, StakingError> {
    let periods = (elapsed / SECONDS_PER_DAY).min(MAX_COMPOUNDING_PERIODS);
    if principal <= 0 || annual_rate_bps <= 0 || periods == 0 {
        return Ok(0);
    }

    let daily_rate = div(mul(annual_rate_bps, PRECISION)?, mul(BASIS_POINTS, 365)?)?;

    let mut value = principal;
    for _ in 0..periods {
        value = value
            .checked_add(mul_frac(value, daily_rate)?)
            .ok_or(StakingError::MathOverflow)?;
    }

    value
        .checked_sub(principal)
        .ok_or(StakingError::MathOverflow)
}

/// Reward for `principal` over `elapsed` seconds in which the pool's
/// `rate × seconds` index advanced by `index_delta`.
///
/// Linear accrual prices every rate segment exactly through the index.
/// Compounding runs daily at the time-weighted average rate
/// `index_delta / elapsed`.
pub fn accrue(
    principal: i128,
    index_delta: i128,
    elapsed: u64,
    auto_compounding: bool,
) -> Result<i128, StakingError> {
    if !auto_compounding {
        return linear_from_index(principal, index_delta);
    }
    if elapsed == 0 {
        return Ok(0);
    }
    compound(principal, div(index_delta, elapsed as i128)?, elapsed)
}

/// `floor(amount × bps / 10_000)`.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, StakingError> {
    if amount <= 0 || bps == 0 {
        return Ok(0);
    }
    let bps = bps as i128;
    let whole = mul(amount / BASIS_POINTS, bps)?;
    let part = div(mul(amount % BASIS_POINTS, bps)?, BASIS_POINTS)?;
    whole.checked_add(part).ok_or(StakingError::MathOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
