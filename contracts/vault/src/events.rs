#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::RewardSource;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_source: RewardSource,
    pub lock_period: u64,
    pub timestamp: u64,
}

/// Fired when a staker deposits principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when principal leaves the vault through `withdraw`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a staker leaves through the emergency hatch.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub principal: i128,
    pub penalty: i128,
    pub net: i128,
    pub forfeited_rewards: i128,
    pub timestamp: u64,
}

/// Fired whenever a new reward condition opens.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardConditionEvent {
    pub condition_id: u32,
    pub numerator: u64,
    pub denominator: u64,
    pub time_unit: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveChangedEvent {
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltiesWithdrawnEvent {
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    stake_token: Address,
    reward_token: Address,
    reward_source: RewardSource,
    lock_period: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            stake_token,
            reward_token,
            reward_source,
            lock_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, remaining: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    staker: Address,
    principal: i128,
    penalty: i128,
    forfeited_rewards: i128,
) {
    env.events().publish(
        (symbol_short!("EMERG"), staker.clone()),
        EmergencyWithdrawnEvent {
            staker,
            principal,
            penalty,
            net: principal - penalty,
            forfeited_rewards,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_condition(
    env: &Env,
    condition_id: u32,
    numerator: u64,
    denominator: u64,
    time_unit: u64,
) {
    env.events().publish(
        (symbol_short!("RWD_COND"),),
        RewardConditionEvent {
            condition_id,
            numerator,
            denominator,
            time_unit,
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

pub fn publish_penalties_withdrawn(env: &Env, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PEN_WDR"), to.clone()),
        PenaltiesWithdrawnEvent {
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
