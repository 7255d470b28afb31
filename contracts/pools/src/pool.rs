//! Pool registry.
//!
//! Pools are numbered from 0 in creation order. Bounds, lock-in and the
//! penalty / bonus settings are fixed at creation; only the reward rate moves.
//! `rate_index` accumulates `rate × seconds` so a rate change never re-prices
//! time that has already elapsed.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};
use staking_common::{StakingError, BASIS_POINTS, TTL_EXTEND_TO, TTL_THRESHOLD};

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const POOL: Symbol = symbol_short!("POOL");

/// Arguments to `create_pool`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub lock_in_period: u64,
    pub min_stake: i128,
    pub max_stake: i128,
    /// Basis points per year, `0..=10_000`.
    pub reward_rate: u32,
    pub auto_compounding: bool,
    pub early_penalty_bps: u32,
    pub late_bonus_bps: u32,
    pub capacity: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub lock_in_period: u64,
    pub min_stake: i128,
    pub max_stake: i128,
    pub capacity: i128,
    pub reward_rate: u32,
    pub auto_compounding: bool,
    pub early_penalty_bps: u32,
    pub late_bonus_bps: u32,
    pub total_staked: i128,
    pub created_at: u64,
    pub last_update_time: u64,
    pub rate_index: i128,
}

impl PoolParams {
    /// Checks run in a fixed order; the first failure wins.
    pub fn validate(&self) -> Result<(), StakingError> {
        if self.lock_in_period == 0 {
            return Err(StakingError::InvalidLockIn);
        }
        if self.min_stake <= 0 {
            return Err(StakingError::InvalidMinStake);
        }
        if self.max_stake <= self.min_stake {
            return Err(StakingError::InvalidMaxStake);
        }
        if self.reward_rate as i128 > BASIS_POINTS {
            return Err(StakingError::InvalidRewardRate);
        }
        if self.early_penalty_bps as i128 > BASIS_POINTS
            || self.late_bonus_bps as i128 > BASIS_POINTS
        {
            return Err(StakingError::InvalidBasisPoints);
        }
        if self.capacity <= 0 {
            return Err(StakingError::InvalidCapacity);
        }
        Ok(())
    }
}

impl Pool {
    pub fn unlock_at(&self, stake_timestamp: u64) -> u64 {
        stake_timestamp.saturating_add(self.lock_in_period)
    }

    /// Index value at `now` without writing it back.
    pub fn index_at(&self, now: u64) -> Result<i128, StakingError> {
        if now <= self.last_update_time {
            return Ok(self.rate_index);
        }
        let span = (now - self.last_update_time) as i128;
        (self.reward_rate as i128)
            .checked_mul(span)
            .and_then(|delta| self.rate_index.checked_add(delta))
            .ok_or(StakingError::MathOverflow)
    }

    /// Brings `rate_index` up to `now` at the current rate.
    pub fn settle(&mut self, now: u64) -> Result<(), StakingError> {
        self.rate_index = self.index_at(now)?;
        if now > self.last_update_time {
            self.last_update_time = now;
        }
        Ok(())
    }

    pub fn add_stake(&mut self, amount: i128) -> Result<(), StakingError> {
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        if total > self.capacity {
            return Err(StakingError::CapacityExceeded);
        }
        self.total_staked = total;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: i128) -> Result<(), StakingError> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, id: u32) -> Result<Pool, StakingError> {
    env.storage()
        .persistent()
        .get(&key(id))
        .ok_or(StakingError::InvalidPoolId)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Validates `params` and appends a new pool with the next id.
pub fn create(env: &Env, params: &PoolParams) -> Result<Pool, StakingError> {
    params.validate()?;

    let now = env.ledger().timestamp();
    let id = count(env);
    let pool = Pool {
        id,
        lock_in_period: params.lock_in_period,
        min_stake: params.min_stake,
        max_stake: params.max_stake,
        capacity: params.capacity,
        reward_rate: params.reward_rate,
        auto_compounding: params.auto_compounding,
        early_penalty_bps: params.early_penalty_bps,
        late_bonus_bps: params.late_bonus_bps,
        total_staked: 0,
        created_at: now,
        last_update_time: now,
        rate_index: 0,
    };
    save(env, &pool);
    env.storage().instance().set(&POOL_COUNT, &(id + 1));
    Ok(pool)
}
