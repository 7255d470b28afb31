#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when a pool is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub lock_in_period: u64,
    pub reward_rate: u32,
    pub auto_compounding: bool,
    pub capacity: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateChangedEvent {
    pub pool_id: u32,
    pub old_rate: u32,
    pub new_rate: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub pool_total: i128,
    pub timestamp: u64,
}

/// Fired on an ordinary withdrawal. `net` is what the staker received.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub principal: i128,
    pub reward: i128,
    pub penalty: i128,
    pub bonus: i128,
    pub net: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub principal: i128,
    pub penalty: i128,
    pub forfeited_rewards: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyToggledEvent {
    pub caller: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveChangedEvent {
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(env: &Env, pool: &crate::Pool) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool.id),
        PoolCreatedEvent {
            pool_id: pool.id,
            lock_in_period: pool.lock_in_period,
            reward_rate: pool.reward_rate,
            auto_compounding: pool.auto_compounding,
            capacity: pool.capacity,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate_changed(env: &Env, pool_id: u32, old_rate: u32, new_rate: u32) {
    env.events().publish(
        (symbol_short!("RATE_SET"), pool_id),
        RewardRateChangedEvent {
            pool_id,
            old_rate,
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, pool_id: u32, amount: i128, pool_total: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone(), pool_id),
        StakedEvent {
            staker,
            pool_id,
            amount,
            pool_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    pool_id: u32,
    principal: i128,
    reward: i128,
    penalty: i128,
    bonus: i128,
    net: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone(), pool_id),
        WithdrawnEvent {
            staker,
            pool_id,
            principal,
            reward,
            penalty,
            bonus,
            net,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone(), pool_id),
        RewardClaimedEvent {
            staker,
            pool_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    staker: Address,
    pool_id: u32,
    principal: i128,
    penalty: i128,
    forfeited_rewards: i128,
) {
    env.events().publish(
        (symbol_short!("EMERG"), staker.clone(), pool_id),
        EmergencyWithdrawnEvent {
            staker,
            pool_id,
            principal,
            penalty,
            forfeited_rewards,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_toggled(env: &Env, caller: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("EMERG_SET"), caller.clone()),
        EmergencyToggledEvent {
            caller,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reserve_deposited(env: &Env, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("RWD_DEP"),),
        ReserveChangedEvent {
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reserve_withdrawn(env: &Env, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("RWD_WDR"),),
        ReserveChangedEvent {
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}
