#![allow(deprecated)] // events().publish migration tracked separately

use crate::StakingError;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────

const PAUSED: Symbol = symbol_short!("P_GLOB");
const LOCKED: Symbol = symbol_short!("RE_LOCK");

// ── Events ───────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub caller: Address,
    pub paused: bool,
    pub timestamp: u64,
}

// ── Pause ────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Fails with `OperationPaused` while the contract is halted.
pub fn require_not_paused(env: &Env) -> Result<(), StakingError> {
    if is_paused(env) {
        return Err(StakingError::OperationPaused);
    }
    Ok(())
}

/// Sets the pause flag. Callers must have checked authorization first.
pub fn set_paused(env: &Env, caller: &Address, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
    env.events().publish(
        (symbol_short!("PAUSE"), caller.clone()),
        PauseToggledEvent {
            caller: caller.clone(),
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Reentrancy lock ──────────────────────────────────────────

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

/// Takes the single-slot lock, failing with `ReentrantCall` if it is held.
pub fn enter(env: &Env) -> Result<(), StakingError> {
    if is_locked(env) {
        return Err(StakingError::ReentrantCall);
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

/// Runs `body` under the reentrancy lock, releasing it on every exit path.
pub fn locked<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, StakingError>,
) -> Result<T, StakingError> {
    enter(env)?;
    let result = body();
    exit(env);
    result
}

/// Runs `body` under the reentrancy lock after the pause check.
///
/// Order is fixed: paused, then reentrant, then whatever validation `body`
/// performs.
pub fn mutating<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, StakingError>,
) -> Result<T, StakingError> {
    require_not_paused(env)?;
    locked(env, body)
}
