#![no_std]

pub mod events;
pub mod pool;
pub mod position;

use soroban_sdk::{contract, contractimpl, contracttype, log, symbol_short, Address, Env, Symbol};
use staking_common::{
    access::{self, AdminTier, TierAtLeast},
    guard, reward_math, SacTokenPort, StakingError, TokenPort, BASIS_POINTS,
};

pub use pool::{Pool, PoolParams};
pub use position::PoolPosition;

// ── Storage key constants ────────────────────────────────────────────────────

const TOKEN: Symbol = symbol_short!("TOKEN");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_RESERVE: Symbol = symbol_short!("RESERVE");
const EMERGENCY: Symbol = symbol_short!("EMERG_ON");

/// Snapshot returned by `get_stake_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStakeInfo {
    pub pool_id: u32,
    pub amount: i128,
    pub stake_timestamp: u64,
    pub unlock_at: u64,
    pub claimable: i128,
}

/// Outcome of a single ordinary withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalReceipt {
    pub principal: i128,
    pub reward: i128,
    pub penalty: i128,
    pub bonus: i128,
    pub net: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPools;

#[contractimpl]
impl StakingPools {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap with the first `SuperAdmin` and the token that is both
    /// staked and paid out as reward.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), StakingError> {
        if env.storage().instance().has(&TOKEN) {
            return Err(StakingError::AlreadyInitialized);
        }
        admin.require_auth();

        access::set_admin_tier(&env, &admin, AdminTier::SuperAdmin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&EMERGENCY, &false);

        events::publish_initialized(&env, admin, token);
        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    pub fn create_pool(env: Env, caller: Address, params: PoolParams) -> Result<u32, StakingError> {
        Self::token(&env)?;
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::ContractAdmin))?;
        guard::require_not_paused(&env)?;

        let pool = pool::create(&env, &params)?;
        log!(&env, "pool created: id={}, rate={}", pool.id, pool.reward_rate);
        events::publish_pool_created(&env, &pool);
        Ok(pool.id)
    }

    /// Switch a pool's annual rate. Time up to now is locked in at the old
    /// rate through the pool index.
    pub fn change_reward_rate(
        env: Env,
        caller: Address,
        pool_id: u32,
        new_rate: u32,
    ) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::ContractAdmin))?;
        guard::require_not_paused(&env)?;
        if new_rate as i128 > BASIS_POINTS {
            return Err(StakingError::InvalidRewardRate);
        }

        let mut pool = pool::load(&env, pool_id)?;
        pool.settle(env.ledger().timestamp())?;
        let old_rate = pool.reward_rate;
        pool.reward_rate = new_rate;
        pool::save(&env, &pool);

        events::publish_rate_changed(&env, pool_id, old_rate, new_rate);
        Ok(())
    }

    pub fn get_pool_details(env: Env, pool_id: u32) -> Result<Pool, StakingError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` into `pool_id`.
    ///
    /// The amount must sit inside the pool's bounds and fit its remaining
    /// capacity. Accrual so far is settled first and the lock-in restarts.
    pub fn stake(env: Env, staker: Address, pool_id: u32, amount: i128) -> Result<(), StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let token = Self::token(&env)?;
            if amount <= 0 {
                return Err(StakingError::ZeroStake);
            }
            let mut pool = pool::load(&env, pool_id)?;
            if amount < pool.min_stake || amount > pool.max_stake {
                return Err(StakingError::StakeOutOfBounds);
            }
            pool.add_stake(amount)?;

            let now = env.ledger().timestamp();
            pool.settle(now)?;
            let mut position = position::get(&env, pool_id, &staker);
            position.settle(&pool, now)?;

            let received = SacTokenPort::new(&env, token).transfer_in(&staker, amount)?;
            if received != amount {
                return Err(StakingError::TransferMismatch);
            }

            position.increase(amount, now)?;
            position::put(&env, pool_id, &staker, &position);
            pool::save(&env, &pool);
            Self::adjust_total_staked(&env, amount)?;

            log!(&env, "stake: staker={}, pool={}, amount={}", staker, pool_id, amount);
            events::publish_staked(&env, staker.clone(), pool_id, amount, pool.total_staked);
            Ok(())
        })
    }

    /// Withdraw `amount` of principal together with all reward owed.
    ///
    /// Before the lock-in ends the early penalty is taken from principal plus
    /// reward, or the call fails outright if the pool has no early penalty.
    /// Strictly after the lock-in ends a late bonus on the reward is added.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<WithdrawalReceipt, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let token = Self::token(&env)?;
            if amount <= 0 {
                return Err(StakingError::ZeroWithdraw);
            }
            let mut pool = pool::load(&env, pool_id)?;
            let mut position = position::get(&env, pool_id, &staker);
            if position.amount == 0 {
                return Err(StakingError::NoStake);
            }
            if amount > position.amount {
                return Err(StakingError::InsufficientStake);
            }

            let now = env.ledger().timestamp();
            let unlock_at = pool.unlock_at(position.stake_timestamp);
            if now < unlock_at && pool.early_penalty_bps == 0 {
                return Err(StakingError::LockInNotOver);
            }

            pool.settle(now)?;
            position.settle(&pool, now)?;
            let reward = position.unclaimed;

            let mut penalty = 0;
            let mut bonus = 0;
            if now < unlock_at {
                let gross = amount.checked_add(reward).ok_or(StakingError::MathOverflow)?;
                penalty = reward_math::bps_of(gross, pool.early_penalty_bps)?;
            } else if now > unlock_at {
                bonus = reward_math::bps_of(reward, pool.late_bonus_bps)?;
            }

            // Effects: reward and bonus leave the reserve, the penalty stays.
            let payout = reward.checked_add(bonus).ok_or(StakingError::MathOverflow)?;
            let reserve = Self::get_reward_reserve(env.clone());
            if reserve < payout {
                return Err(StakingError::InsufficientRewardReserve);
            }
            Self::set_reward_reserve(&env, reserve - payout + penalty);

            position.unclaimed = 0;
            position.decrease(amount, now)?;
            position::put(&env, pool_id, &staker, &position);
            pool.remove_stake(amount)?;
            pool::save(&env, &pool);
            Self::adjust_total_staked(&env, -amount)?;

            let net = amount
                .checked_add(payout)
                .and_then(|gross| gross.checked_sub(penalty))
                .ok_or(StakingError::MathOverflow)?;

            // Interaction.
            SacTokenPort::new(&env, token).transfer_out(&staker, net)?;

            log!(&env, "withdraw: staker={}, pool={}, net={}", staker, pool_id, net);
            events::publish_withdrawn(
                &env,
                staker.clone(),
                pool_id,
                amount,
                reward,
                penalty,
                bonus,
                net,
            );
            Ok(WithdrawalReceipt {
                principal: amount,
                reward,
                penalty,
                bonus,
                net,
            })
        })
    }

    /// Pay out reward owed on `pool_id` without touching principal or the
    /// lock-in.
    pub fn claim_rewards(env: Env, staker: Address, pool_id: u32) -> Result<i128, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let token = Self::token(&env)?;
            let mut pool = pool::load(&env, pool_id)?;
            let now = env.ledger().timestamp();

            pool.settle(now)?;
            let mut position = position::get(&env, pool_id, &staker);
            position.settle(&pool, now)?;
            let reward = position.unclaimed;
            if reward <= 0 {
                return Err(StakingError::NoRewards);
            }

            let reserve = Self::get_reward_reserve(env.clone());
            if reserve < reward {
                return Err(StakingError::InsufficientRewardReserve);
            }
            Self::set_reward_reserve(&env, reserve - reward);
            position.unclaimed = 0;
            position::put(&env, pool_id, &staker, &position);
            pool::save(&env, &pool);

            let paid = SacTokenPort::new(&env, token).transfer_out(&staker, reward)?;

            log!(&env, "claim: staker={}, pool={}, reward={}", staker, pool_id, paid);
            events::publish_reward_claimed(&env, staker.clone(), pool_id, paid);
            Ok(paid)
        })
    }

    /// Leave `pool_id` at once while the emergency hatch is open.
    ///
    /// Reward is forfeited and the early penalty is taken from principal
    /// whether or not the lock-in has ended. Returns the net amount sent.
    pub fn emergency_withdraw(env: Env, staker: Address, pool_id: u32) -> Result<i128, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let token = Self::token(&env)?;
            if !Self::is_emergency_enabled(env.clone()) {
                return Err(StakingError::EmergencyDisabled);
            }
            let mut pool = pool::load(&env, pool_id)?;
            let mut position = position::get(&env, pool_id, &staker);
            if position.amount == 0 {
                return Err(StakingError::NoStake);
            }

            let now = env.ledger().timestamp();
            pool.settle(now)?;
            // Reward is forfeited, so a reward that cannot be evaluated must
            // not block the exit.
            let forfeited = position
                .pending(&pool, now)
                .unwrap_or_default()
                .saturating_add(position.unclaimed);
            position.reset_clock(now, pool.rate_index);
            let principal = position.amount;
            let penalty = reward_math::bps_of(principal, pool.early_penalty_bps)?;
            let net = principal - penalty;

            position.unclaimed = 0;
            position.decrease(principal, now)?;
            position::put(&env, pool_id, &staker, &position);
            pool.remove_stake(principal)?;
            pool::save(&env, &pool);
            Self::adjust_total_staked(&env, -principal)?;
            let reserve = Self::get_reward_reserve(env.clone());
            Self::set_reward_reserve(&env, reserve.saturating_add(penalty));

            SacTokenPort::new(&env, token).transfer_out(&staker, net)?;

            log!(&env, "emergency: staker={}, pool={}, net={}", staker, pool_id, net);
            events::publish_emergency_withdrawn(
                &env,
                staker.clone(),
                pool_id,
                principal,
                penalty,
                forfeited,
            );
            Ok(net)
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_stake_info(env: Env, staker: Address, pool_id: u32) -> Result<PoolStakeInfo, StakingError> {
        let pool = pool::load(&env, pool_id)?;
        let position = position::get(&env, pool_id, &staker);
        let pending = position.pending(&pool, env.ledger().timestamp())?;

        Ok(PoolStakeInfo {
            pool_id,
            amount: position.amount,
            stake_timestamp: position.stake_timestamp,
            unlock_at: pool.unlock_at(position.stake_timestamp),
            claimable: position
                .unclaimed
                .checked_add(pending)
                .ok_or(StakingError::MathOverflow)?,
        })
    }

    pub fn get_position(env: Env, staker: Address, pool_id: u32) -> PoolPosition {
        position::get(&env, pool_id, &staker)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn get_reward_reserve(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_RESERVE).unwrap_or(0)
    }

    pub fn get_token(env: Env) -> Result<Address, StakingError> {
        Self::token(&env)
    }

    pub fn is_emergency_enabled(env: Env) -> bool {
        env.storage().instance().get(&EMERGENCY).unwrap_or(false)
    }

    pub fn is_paused(env: Env) -> bool {
        guard::is_paused(&env)
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        access::get_admin_tier(&env, &admin)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), StakingError> {
        access::promote_admin(&env, &caller, &target, tier)
    }

    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), StakingError> {
        access::demote_admin(&env, &caller, &target)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::OperatorAdmin))?;
        guard::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::OperatorAdmin))?;
        guard::set_paused(&env, &caller, false);
        Ok(())
    }

    pub fn set_emergency_enabled(env: Env, caller: Address, enabled: bool) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::ContractAdmin))?;
        env.storage().instance().set(&EMERGENCY, &enabled);
        events::publish_emergency_toggled(&env, caller, enabled);
        Ok(())
    }

    /// Top up the reward reserve. Credits what actually arrived.
    pub fn deposit_reward_tokens(env: Env, caller: Address, amount: i128) -> Result<i128, StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::ContractAdmin))?;
        guard::locked(&env, || {
            let token = Self::token(&env)?;
            if amount <= 0 {
                return Err(StakingError::InvalidAmount);
            }

            let received = SacTokenPort::new(&env, token).transfer_in(&caller, amount)?;
            let reserve = Self::get_reward_reserve(env.clone())
                .checked_add(received)
                .ok_or(StakingError::MathOverflow)?;
            Self::set_reward_reserve(&env, reserve);

            events::publish_reserve_deposited(&env, received, reserve);
            Ok(received)
        })
    }

    /// Take tokens back out of the reserve, clamped to what it holds. The
    /// balance left behind must still cover every pool's principal.
    pub fn withdraw_reward_tokens(env: Env, caller: Address, amount: i128) -> Result<i128, StakingError> {
        access::authorize(&env, &caller, &TierAtLeast(AdminTier::ContractAdmin))?;
        guard::locked(&env, || {
            let token = Self::token(&env)?;
            if amount <= 0 {
                return Err(StakingError::InvalidAmount);
            }

            let reserve = Self::get_reward_reserve(env.clone());
            let amount = amount.min(reserve);
            if amount == 0 {
                return Ok(0);
            }

            let port = SacTokenPort::new(&env, token);
            if port.held().saturating_sub(amount) < Self::get_total_staked(env.clone()) {
                return Err(StakingError::StakeBalanceViolation);
            }

            let new_reserve = reserve - amount;
            Self::set_reward_reserve(&env, new_reserve);
            let sent = port.transfer_out(&caller, amount)?;

            events::publish_reserve_withdrawn(&env, sent, new_reserve);
            Ok(sent)
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn token(env: &Env) -> Result<Address, StakingError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(StakingError::NotInitialized)
    }

    fn set_reward_reserve(env: &Env, reserve: i128) {
        env.storage().instance().set(&REWARD_RESERVE, &reserve);
    }

    fn adjust_total_staked(env: &Env, delta: i128) -> Result<i128, StakingError> {
        let total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = total.checked_add(delta).ok_or(StakingError::MathOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Ok(new_total)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
