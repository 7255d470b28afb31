use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};
use staking_common::{reward_math, StakingError, TTL_EXTEND_TO, TTL_THRESHOLD};

use crate::pool::Pool;

const POSITION: Symbol = symbol_short!("POS");

/// Per-(pool, account) record. Zeroed on full withdrawal, never removed.
///
/// `stake_timestamp` anchors the lock-in and moves on every principal
/// change. `reward_anchor` and `index_snapshot` mark where unsettled accrual
/// starts.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolPosition {
    pub amount: i128,
    pub stake_timestamp: u64,
    pub reward_anchor: u64,
    pub index_snapshot: i128,
    pub unclaimed: i128,
}

impl PoolPosition {
    pub fn increase(&mut self, delta: i128, now: u64) -> Result<(), StakingError> {
        self.amount = self
            .amount
            .checked_add(delta)
            .ok_or(StakingError::MathOverflow)?;
        self.stake_timestamp = now;
        Ok(())
    }

    pub fn decrease(&mut self, delta: i128, now: u64) -> Result<(), StakingError> {
        if delta > self.amount {
            return Err(StakingError::InsufficientStake);
        }
        self.amount -= delta;
        self.stake_timestamp = now;
        Ok(())
    }

    pub fn reset_clock(&mut self, now: u64, index: i128) {
        self.reward_anchor = now;
        self.index_snapshot = index;
    }

    /// Reward accrued since the anchor, not counting `unclaimed`.
    ///
    /// Linear pools price each rate segment through the index. Compounding
    /// pools compound daily at the time-weighted average rate.
    pub fn pending(&self, pool: &Pool, now: u64) -> Result<i128, StakingError> {
        if self.amount <= 0 || now <= self.reward_anchor {
            return Ok(0);
        }
        let delta = pool
            .index_at(now)?
            .checked_sub(self.index_snapshot)
            .ok_or(StakingError::MathOverflow)?;

        reward_math::accrue(
            self.amount,
            delta,
            now - self.reward_anchor,
            pool.auto_compounding,
        )
    }

    /// Moves pending accrual into `unclaimed` and restarts the reward clock.
    /// `pool` must already be settled to `now`.
    pub fn settle(&mut self, pool: &Pool, now: u64) -> Result<(), StakingError> {
        let pending = self.pending(pool, now)?;
        self.unclaimed = self
            .unclaimed
            .checked_add(pending)
            .ok_or(StakingError::MathOverflow)?;
        self.reset_clock(now, pool.rate_index);
        Ok(())
    }
}

fn key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, account.clone())
}

pub fn get(env: &Env, pool_id: u32, account: &Address) -> PoolPosition {
    env.storage()
        .persistent()
        .get(&key(pool_id, account))
        .unwrap_or_default()
}

pub fn put(env: &Env, pool_id: u32, account: &Address, position: &PoolPosition) {
    let key = key(pool_id, account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
