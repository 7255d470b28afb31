extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking_common::{
    testutils::{FeeOnTransferToken, FeeOnTransferTokenClient},
    StakingError,
};

use crate::{RewardSource, StakingVault, StakingVaultClient, VaultParams, REWARD_RESERVE};

fn setup(same_token: bool) -> (Env, StakingVaultClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = if same_token {
        stake_token.clone()
    } else {
        env.register_stellar_asset_contract_v2(Address::generate(&env))
            .address()
    };

    let client = StakingVaultClient::new(&env, &env.register(StakingVault, ()));
    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &VaultParams {
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            reward_source: RewardSource::Reserve,
            reward_ratio_numerator: 1,
            reward_ratio_denominator: 20,
            time_unit: 60,
            lock_period: 0,
            emergency_penalty_bps: 500,
        },
    );

    let asset = StellarAssetClient::new(&env, &reward_token);
    asset.mint(&owner, &500);
    client.deposit_reward_tokens(&owner, &500);

    (env, client, owner, stake_token)
}

// ── Authorization ─────────────────────────────────────────────────────────────

#[test]
fn test_non_owner_is_rejected() {
    let (env, client, _owner, _) = setup(false);
    let stranger = Address::generate(&env);

    match client.try_set_reward_ratio(&stranger, &1, &10) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_set_time_unit(&stranger, &30) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_pause(&stranger) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_withdraw_reward_tokens(&stranger, &100) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_withdraw_penalties(&stranger, &stranger) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert_eq!(client.get_reward_ratio(), (1, 20));
}

#[test]
fn test_divisor_checks_precede_authorization() {
    let (env, client, _owner, _) = setup(false);
    let stranger = Address::generate(&env);

    match client.try_set_reward_ratio(&stranger, &1, &0) {
        Err(Ok(e)) => assert_eq!(e, StakingError::DivideByZero),
        _ => unreachable!("Expected DivideByZero error"),
    }
    match client.try_set_time_unit(&stranger, &0) {
        Err(Ok(e)) => assert_eq!(e, StakingError::ZeroTimeUnit),
        _ => unreachable!("Expected ZeroTimeUnit error"),
    }
}

#[test]
fn test_reward_settings_frozen_while_paused() {
    let (_env, client, owner, _) = setup(false);
    client.pause(&owner);

    match client.try_set_reward_ratio(&owner, &1, &10) {
        Err(Ok(e)) => assert_eq!(e, StakingError::OperationPaused),
        _ => unreachable!("Expected OperationPaused error"),
    }
    match client.try_set_time_unit(&owner, &30) {
        Err(Ok(e)) => assert_eq!(e, StakingError::OperationPaused),
        _ => unreachable!("Expected OperationPaused error"),
    }

    client.unpause(&owner);
    client.set_reward_ratio(&owner, &1, &10);
    assert_eq!(client.get_reward_ratio(), (1, 10));
}

#[test]
fn test_zero_numerator_stops_accrual() {
    let (env, client, owner, stake_token) = setup(false);
    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &400);
    client.stake(&staker, &400);

    client.set_reward_ratio(&owner, &0, &1);
    env.ledger().set_timestamp(10_000);
    assert_eq!(client.get_stake_info(&staker).claimable, 0);
}

// ── Reward reserve ────────────────────────────────────────────────────────────

#[test]
fn test_reserve_withdrawal_is_clamped() {
    let (_env, client, owner, _) = setup(false);

    assert_eq!(client.withdraw_reward_tokens(&owner, &2_000), 500);
    assert_eq!(client.get_reward_reserve(), 0);
    assert_eq!(client.withdraw_reward_tokens(&owner, &2_000), 0);

    match client.try_withdraw_reward_tokens(&owner, &0) {
        Err(Ok(e)) => assert_eq!(e, StakingError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

#[test]
fn test_reserve_withdrawal_cannot_touch_stake() {
    let (env, client, owner, stake_token) = setup(true);
    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &1_000);
    client.stake(&staker, &1_000);

    // Book more reserve than the vault actually holds beyond principal.
    env.as_contract(&client.address, || {
        env.storage().instance().set(&REWARD_RESERVE, &800i128);
    });

    match client.try_withdraw_reward_tokens(&owner, &800) {
        Err(Ok(e)) => assert_eq!(e, StakingError::StakeBalanceViolation),
        _ => unreachable!("Expected StakeBalanceViolation error"),
    }
    assert_eq!(client.withdraw_reward_tokens(&owner, &500), 500);
    assert_eq!(client.get_total_staked(), 1_000);
}

#[test]
fn test_deposit_credits_received_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let fee_token = env.register(FeeOnTransferToken, (100u32,));
    let client = StakingVaultClient::new(&env, &env.register(StakingVault, ()));
    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &VaultParams {
            stake_token,
            reward_token: fee_token.clone(),
            reward_source: RewardSource::Reserve,
            reward_ratio_numerator: 1,
            reward_ratio_denominator: 20,
            time_unit: 60,
            lock_period: 0,
            emergency_penalty_bps: 0,
        },
    );

    FeeOnTransferTokenClient::new(&env, &fee_token).mint(&owner, &1_000);
    assert_eq!(client.deposit_reward_tokens(&owner, &1_000), 990);
    assert_eq!(client.get_reward_reserve(), 990);
}

#[test]
fn test_penalty_sweep_with_nothing_collected() {
    let (env, client, owner, _) = setup(false);
    let treasury = Address::generate(&env);
    assert_eq!(client.withdraw_penalties(&owner, &treasury), 0);
}
