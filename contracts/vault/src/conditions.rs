//! Reward-condition history.
//!
//! Every change to the reward ratio or time unit closes the open condition at
//! the current timestamp and opens a new one. Accrual walks the conditions a
//! position has lived through, so a change never re-prices elapsed time.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};
use staking_common::{reward_math, StakingError, TTL_EXTEND_TO, TTL_THRESHOLD};

const COND_COUNT: Symbol = symbol_short!("COND_CNT");
const CONDITION: Symbol = symbol_short!("COND");

/// One reward ratio / time unit pair and the interval it applied to.
/// `end` is `None` while the condition is open.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardCondition {
    pub numerator: u64,
    pub denominator: u64,
    pub time_unit: u64,
    pub start: u64,
    pub end: Option<u64>,
}

fn key(id: u32) -> (Symbol, u32) {
    (CONDITION, id)
}

fn store(env: &Env, id: u32, condition: &RewardCondition) {
    let key = key(id);
    env.storage().persistent().set(&key, condition);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&COND_COUNT).unwrap_or(0)
}

pub fn get(env: &Env, id: u32) -> Option<RewardCondition> {
    env.storage().persistent().get(&key(id))
}

pub fn current_id(env: &Env) -> Result<u32, StakingError> {
    count(env)
        .checked_sub(1)
        .ok_or(StakingError::NotInitialized)
}

pub fn current(env: &Env) -> Result<RewardCondition, StakingError> {
    get(env, current_id(env)?).ok_or(StakingError::NotInitialized)
}

/// Closes the open condition at `now` and opens a new one. Returns its id.
pub fn open(
    env: &Env,
    numerator: u64,
    denominator: u64,
    time_unit: u64,
    now: u64,
) -> Result<u32, StakingError> {
    if denominator == 0 {
        return Err(StakingError::DivideByZero);
    }
    if time_unit == 0 {
        return Err(StakingError::ZeroTimeUnit);
    }

    let id = count(env);
    if id > 0 {
        let prev_id = id - 1;
        let mut prev = get(env, prev_id).ok_or(StakingError::NotInitialized)?;
        prev.end = Some(now);
        store(env, prev_id, &prev);
    }

    store(
        env,
        id,
        &RewardCondition {
            numerator,
            denominator,
            time_unit,
            start: now,
            end: None,
        },
    );
    env.storage().instance().set(&COND_COUNT, &(id + 1));
    Ok(id)
}

/// Reward on `principal` from (`from_id`, `from_time`) up to `now`, summed
/// per condition. Each segment truncates on its own.
pub fn accrued(
    env: &Env,
    principal: i128,
    from_id: u32,
    from_time: u64,
    now: u64,
) -> Result<i128, StakingError> {
    if principal <= 0 || now <= from_time {
        return Ok(0);
    }

    let mut total: i128 = 0;
    for id in from_id..count(env) {
        let condition = get(env, id).ok_or(StakingError::NotInitialized)?;
        let start = condition.start.max(from_time);
        let end = condition.end.map_or(now, |closed| closed.min(now));
        if end <= start {
            continue;
        }
        let segment = reward_math::linear_ratio(
            principal,
            end - start,
            condition.numerator,
            condition.denominator,
            condition.time_unit,
        )?;
        total = total
            .checked_add(segment)
            .ok_or(StakingError::MathOverflow)?;
    }
    Ok(total)
}
