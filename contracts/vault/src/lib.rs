#![no_std]

pub mod conditions;
pub mod events;
pub mod ledger;

use soroban_sdk::{contract, contractimpl, contracttype, log, symbol_short, Address, Env, Symbol};
use staking_common::{
    access::{self, SingleOwner},
    guard, reward_math, SacTokenPort, StakingError, TokenPort, BASIS_POINTS,
};

pub use conditions::RewardCondition;
pub use ledger::StakePosition;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_RESERVE: Symbol = symbol_short!("RESERVE");
const PENALTIES: Symbol = symbol_short!("PENALTY");

// ── Public-facing types ──────────────────────────────────────────────────────

/// Where claimed rewards come from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardSource {
    /// Paid out of tokens the owner deposited into the reward reserve.
    Reserve = 0,
    /// Minted on demand; the vault must be the reward token's admin.
    Mint = 1,
}

/// Construction parameters accepted by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultParams {
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_source: RewardSource,
    pub reward_ratio_numerator: u64,
    pub reward_ratio_denominator: u64,
    pub time_unit: u64,
    pub lock_period: u64,
    pub emergency_penalty_bps: u32,
}

/// Settings fixed for the vault's lifetime.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_source: RewardSource,
    pub lock_period: u64,
    pub emergency_penalty_bps: u32,
}

/// Snapshot returned by `get_stake_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeInfo {
    pub amount: i128,
    pub stake_timestamp: u64,
    pub unlock_at: u64,
    pub claimable: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingVault;

#[contractimpl]
impl StakingVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault.
    ///
    /// The token pair, reward source, lock period and emergency penalty are
    /// fixed here for good. The reward ratio and time unit open the first
    /// reward condition and may be retuned by the owner later.
    pub fn initialize(env: Env, owner: Address, params: VaultParams) -> Result<(), StakingError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(StakingError::AlreadyInitialized);
        }
        if params.reward_ratio_denominator == 0 {
            return Err(StakingError::DivideByZero);
        }
        if params.time_unit == 0 {
            return Err(StakingError::ZeroTimeUnit);
        }
        if params.emergency_penalty_bps as i128 > BASIS_POINTS {
            return Err(StakingError::InvalidBasisPoints);
        }

        let now = env.ledger().timestamp();
        let config = VaultConfig {
            stake_token: params.stake_token,
            reward_token: params.reward_token,
            reward_source: params.reward_source,
            lock_period: params.lock_period,
            emergency_penalty_bps: params.emergency_penalty_bps,
        };

        access::set_owner(&env, &owner);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&INITIALIZED, &true);
        let condition_id = conditions::open(
            &env,
            params.reward_ratio_numerator,
            params.reward_ratio_denominator,
            params.time_unit,
            now,
        )?;

        events::publish_initialized(
            &env,
            owner,
            config.stake_token,
            config.reward_token,
            config.reward_source,
            config.lock_period,
        );
        events::publish_reward_condition(
            &env,
            condition_id,
            params.reward_ratio_numerator,
            params.reward_ratio_denominator,
            params.time_unit,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// Accrual up to now is settled into the position first, so the new
    /// principal only earns from this moment on. The lock period restarts.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let config = Self::config(&env)?;
            if amount <= 0 {
                return Err(StakingError::ZeroStake);
            }

            let now = env.ledger().timestamp();
            let mut position = ledger::get(&env, &staker);
            Self::settle(&env, &mut position, now)?;

            let received =
                SacTokenPort::new(&env, config.stake_token).transfer_in(&staker, amount)?;
            if received != amount {
                return Err(StakingError::TransferMismatch);
            }

            position.increase(amount, now)?;
            ledger::put(&env, &staker, &position);
            let new_total = Self::add_total_staked(&env, amount)?;

            log!(&env, "stake: staker={}, amount={}", staker, amount);
            events::publish_staked(&env, staker.clone(), amount, new_total);
            Ok(())
        })
    }

    /// Withdraw `amount` of principal once the lock period has run out.
    ///
    /// Reward accrued so far stays in the position for `claim_rewards`.
    /// Returns the amount that left the vault.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let config = Self::config(&env)?;
            if amount <= 0 {
                return Err(StakingError::ZeroWithdraw);
            }

            let mut position = ledger::get(&env, &staker);
            if position.amount == 0 {
                return Err(StakingError::NoStake);
            }
            if amount > position.amount {
                return Err(StakingError::InsufficientStake);
            }

            let now = env.ledger().timestamp();
            if now < position.stake_timestamp.saturating_add(config.lock_period) {
                return Err(StakingError::LockNotExpired);
            }

            // Effects.
            Self::settle(&env, &mut position, now)?;
            position.decrease(amount)?;
            ledger::put(&env, &staker, &position);
            Self::sub_total_staked(&env, amount)?;

            // Interaction.
            let sent = SacTokenPort::new(&env, config.stake_token).transfer_out(&staker, amount)?;

            log!(&env, "withdraw: staker={}, amount={}", staker, sent);
            events::publish_withdrawn(&env, staker.clone(), sent, position.amount);
            Ok(sent)
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has accrued.
    ///
    /// Fails with `NoRewards` when nothing is owed, so a second claim in the
    /// same ledger always fails.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let config = Self::config(&env)?;
            let now = env.ledger().timestamp();

            let mut position = ledger::get(&env, &staker);
            Self::settle(&env, &mut position, now)?;
            let reward = position.unclaimed;
            if reward <= 0 {
                return Err(StakingError::NoRewards);
            }

            position.unclaimed = 0;
            ledger::put(&env, &staker, &position);
            let paid = Self::pay_reward(&env, &config, &staker, reward)?;

            log!(&env, "claim: staker={}, reward={}", staker, paid);
            events::publish_reward_claimed(&env, staker.clone(), paid);
            Ok(paid)
        })
    }

    /// Leave immediately regardless of the lock period.
    ///
    /// All accrued reward is forfeited and the emergency penalty is taken from
    /// the principal. Returns the net amount sent.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, StakingError> {
        staker.require_auth();
        guard::mutating(&env, || {
            let config = Self::config(&env)?;
            let now = env.ledger().timestamp();

            let mut position = ledger::get(&env, &staker);
            if position.amount == 0 {
                return Err(StakingError::NoStake);
            }

            // Reward is forfeited, so a reward that cannot be evaluated must
            // not block the exit.
            let forfeited = conditions::accrued(
                &env,
                position.amount,
                position.condition_id,
                position.reward_anchor,
                now,
            )
            .unwrap_or_default()
            .saturating_add(position.unclaimed);
            position.reset_clock(now, conditions::current_id(&env)?);
            let principal = position.amount;
            let penalty = reward_math::bps_of(principal, config.emergency_penalty_bps)?;
            let net = principal - penalty;

            position.decrease(principal)?;
            position.unclaimed = 0;
            ledger::put(&env, &staker, &position);
            Self::sub_total_staked(&env, principal)?;
            let penalties: i128 = env.storage().instance().get(&PENALTIES).unwrap_or(0);
            env.storage()
                .instance()
                .set(&PENALTIES, &(penalties.saturating_add(penalty)));

            SacTokenPort::new(&env, config.stake_token).transfer_out(&staker, net)?;

            log!(&env, "emergency: staker={}, net={}", staker, net);
            events::publish_emergency_withdrawn(&env, staker.clone(), principal, penalty, forfeited);
            Ok(net)
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Principal, lock status and claimable reward (settled plus pending).
    pub fn get_stake_info(env: Env, staker: Address) -> Result<StakeInfo, StakingError> {
        let config = Self::config(&env)?;
        let position = ledger::get(&env, &staker);
        let pending = conditions::accrued(
            &env,
            position.amount,
            position.condition_id,
            position.reward_anchor,
            env.ledger().timestamp(),
        )?;

        Ok(StakeInfo {
            amount: position.amount,
            stake_timestamp: position.stake_timestamp,
            unlock_at: position.stake_timestamp.saturating_add(config.lock_period),
            claimable: position
                .unclaimed
                .checked_add(pending)
                .ok_or(StakingError::MathOverflow)?,
        })
    }

    pub fn get_position(env: Env, staker: Address) -> StakePosition {
        ledger::get(&env, &staker)
    }

    /// Current `(numerator, denominator)`.
    pub fn get_reward_ratio(env: Env) -> Result<(u64, u64), StakingError> {
        let condition = conditions::current(&env)?;
        Ok((condition.numerator, condition.denominator))
    }

    pub fn get_time_unit(env: Env) -> Result<u64, StakingError> {
        Ok(conditions::current(&env)?.time_unit)
    }

    pub fn get_reward_condition(env: Env, id: u32) -> Option<RewardCondition> {
        conditions::get(&env, id)
    }

    pub fn get_reward_condition_count(env: Env) -> u32 {
        conditions::count(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn get_reward_reserve(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_RESERVE).unwrap_or(0)
    }

    pub fn get_collected_penalties(env: Env) -> i128 {
        env.storage().instance().get(&PENALTIES).unwrap_or(0)
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, StakingError> {
        Self::config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, StakingError> {
        access::owner(&env).ok_or(StakingError::NotInitialized)
    }

    pub fn is_paused(env: Env) -> bool {
        guard::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Retune the reward ratio. Elapsed time keeps the old ratio.
    ///
    /// A zero denominator is rejected before the caller is even looked at.
    pub fn set_reward_ratio(
        env: Env,
        caller: Address,
        numerator: u64,
        denominator: u64,
    ) -> Result<(), StakingError> {
        if denominator == 0 {
            return Err(StakingError::DivideByZero);
        }
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::require_not_paused(&env)?;

        let current = conditions::current(&env)?;
        let id = conditions::open(
            &env,
            numerator,
            denominator,
            current.time_unit,
            env.ledger().timestamp(),
        )?;
        events::publish_reward_condition(&env, id, numerator, denominator, current.time_unit);
        Ok(())
    }

    /// Retune the accrual time unit. Elapsed time keeps the old unit.
    pub fn set_time_unit(env: Env, caller: Address, time_unit: u64) -> Result<(), StakingError> {
        if time_unit == 0 {
            return Err(StakingError::ZeroTimeUnit);
        }
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::require_not_paused(&env)?;

        let current = conditions::current(&env)?;
        let id = conditions::open(
            &env,
            current.numerator,
            current.denominator,
            time_unit,
            env.ledger().timestamp(),
        )?;
        events::publish_reward_condition(&env, id, current.numerator, current.denominator, time_unit);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), StakingError> {
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::set_paused(&env, &caller, false);
        Ok(())
    }

    /// Top up the reward reserve. Credits what actually arrived.
    pub fn deposit_reward_tokens(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<i128, StakingError> {
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::locked(&env, || {
            let config = Self::config(&env)?;
            if amount <= 0 {
                return Err(StakingError::InvalidAmount);
            }

            let received =
                SacTokenPort::new(&env, config.reward_token).transfer_in(&caller, amount)?;
            let reserve = Self::get_reward_reserve(env.clone())
                .checked_add(received)
                .ok_or(StakingError::MathOverflow)?;
            env.storage().instance().set(&REWARD_RESERVE, &reserve);

            events::publish_reserve_deposited(&env, received, reserve);
            Ok(received)
        })
    }

    /// Take reward tokens back out of the reserve, clamped to what it holds.
    ///
    /// When the reward token is also the stake token, the vault's balance
    /// after the transfer must still cover every staker's principal and the
    /// collected penalties.
    pub fn withdraw_reward_tokens(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<i128, StakingError> {
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::locked(&env, || {
            let config = Self::config(&env)?;
            if amount <= 0 {
                return Err(StakingError::InvalidAmount);
            }

            let reserve = Self::get_reward_reserve(env.clone());
            let amount = amount.min(reserve);
            if amount == 0 {
                return Ok(0);
            }

            let owed = if config.reward_token == config.stake_token {
                Self::get_total_staked(env.clone())
                    .saturating_add(Self::get_collected_penalties(env.clone()))
            } else {
                0
            };
            let port = SacTokenPort::new(&env, config.reward_token);
            if port.held().saturating_sub(amount) < owed {
                return Err(StakingError::StakeBalanceViolation);
            }

            let new_reserve = reserve - amount;
            env.storage().instance().set(&REWARD_RESERVE, &new_reserve);
            let sent = port.transfer_out(&caller, amount)?;

            events::publish_reserve_withdrawn(&env, sent, new_reserve);
            Ok(sent)
        })
    }

    /// Sweep penalties collected from emergency withdrawals to `to`.
    pub fn withdraw_penalties(env: Env, caller: Address, to: Address) -> Result<i128, StakingError> {
        access::authorize(&env, &caller, &SingleOwner)?;
        guard::locked(&env, || {
            let config = Self::config(&env)?;
            let penalties = Self::get_collected_penalties(env.clone());
            if penalties == 0 {
                return Ok(0);
            }

            env.storage().instance().set(&PENALTIES, &0i128);
            let sent = SacTokenPort::new(&env, config.stake_token).transfer_out(&to, penalties)?;

            events::publish_penalties_withdrawn(&env, to.clone(), sent);
            Ok(sent)
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn config(env: &Env) -> Result<VaultConfig, StakingError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(StakingError::NotInitialized)
    }

    /// Move pending accrual into `unclaimed` and restart the reward clock.
    fn settle(env: &Env, position: &mut StakePosition, now: u64) -> Result<(), StakingError> {
        let pending = conditions::accrued(
            env,
            position.amount,
            position.condition_id,
            position.reward_anchor,
            now,
        )?;
        position.unclaimed = position
            .unclaimed
            .checked_add(pending)
            .ok_or(StakingError::MathOverflow)?;
        position.reset_clock(now, conditions::current_id(env)?);
        Ok(())
    }

    fn pay_reward(
        env: &Env,
        config: &VaultConfig,
        to: &Address,
        reward: i128,
    ) -> Result<i128, StakingError> {
        let port = SacTokenPort::new(env, config.reward_token.clone());
        match config.reward_source {
            RewardSource::Reserve => {
                let reserve: i128 = env.storage().instance().get(&REWARD_RESERVE).unwrap_or(0);
                if reserve < reward {
                    return Err(StakingError::InsufficientRewardReserve);
                }
                env.storage()
                    .instance()
                    .set(&REWARD_RESERVE, &(reserve - reward));
                port.transfer_out(to, reward)
            }
            RewardSource::Mint => port.mint_to(to, reward),
        }
    }

    fn add_total_staked(env: &Env, amount: i128) -> Result<i128, StakingError> {
        let total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = total
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Ok(new_total)
    }

    fn sub_total_staked(env: &Env, amount: i128) -> Result<i128, StakingError> {
        let total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = total
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Ok(new_total)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
