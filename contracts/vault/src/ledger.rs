use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};
use staking_common::{StakingError, TTL_EXTEND_TO, TTL_THRESHOLD};

const POSITION: Symbol = symbol_short!("STK");

/// Per-account record. Zeroed on full withdrawal, never removed.
///
/// `stake_timestamp` anchors the lock period and only moves on stake.
/// `reward_anchor` / `condition_id` mark where unsettled accrual starts.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub stake_timestamp: u64,
    pub reward_anchor: u64,
    pub condition_id: u32,
    pub unclaimed: i128,
}

impl StakePosition {
    pub fn increase(&mut self, delta: i128, now: u64) -> Result<(), StakingError> {
        self.amount = self
            .amount
            .checked_add(delta)
            .ok_or(StakingError::MathOverflow)?;
        self.stake_timestamp = now;
        Ok(())
    }

    pub fn decrease(&mut self, delta: i128) -> Result<(), StakingError> {
        if delta > self.amount {
            return Err(StakingError::InsufficientStake);
        }
        self.amount -= delta;
        Ok(())
    }

    pub fn reset_clock(&mut self, now: u64, condition_id: u32) {
        self.reward_anchor = now;
        self.condition_id = condition_id;
    }
}

fn key(account: &Address) -> (Symbol, Address) {
    (POSITION, account.clone())
}

pub fn get(env: &Env, account: &Address) -> StakePosition {
    env.storage()
        .persistent()
        .get(&key(account))
        .unwrap_or_default()
}

pub fn put(env: &Env, account: &Address, position: &StakePosition) {
    let key = key(account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
