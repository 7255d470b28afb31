extern crate std;

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env};
use staking_common::{AdminTier, StakingError};

use crate::{PoolParams, StakingPools, StakingPoolsClient, REWARD_RESERVE};

fn setup() -> (Env, StakingPoolsClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let client = StakingPoolsClient::new(&env, &env.register(StakingPools, ()));
    let super_admin = Address::generate(&env);
    client.initialize(&super_admin, &token);

    (env, client, super_admin, token)
}

fn params() -> PoolParams {
    PoolParams {
        lock_in_period: 3_600,
        min_stake: 10,
        max_stake: 10_000,
        reward_rate: 500,
        auto_compounding: false,
        early_penalty_bps: 300,
        late_bonus_bps: 100,
        capacity: 100_000,
    }
}

// ── Admin tiers ──────────────────────────────────────────────────────────────

#[test]
fn test_initializer_is_super_admin() {
    let (_env, client, super_admin, _) = setup();
    assert_eq!(client.get_admin_tier(&super_admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_tiers_gate_admin_operations() {
    let (env, client, super_admin, _) = setup();
    let operator = Address::generate(&env);
    let manager = Address::generate(&env);
    client.promote_admin(&super_admin, &operator, &AdminTier::OperatorAdmin);
    client.promote_admin(&super_admin, &manager, &AdminTier::ContractAdmin);

    // Operators may pause but not manage pools.
    client.pause(&operator);
    client.unpause(&operator);
    match client.try_create_pool(&operator, &params()) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_set_emergency_enabled(&operator, &true) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    let pool_id = client.create_pool(&manager, &params());
    client.change_reward_rate(&manager, &pool_id, &700);
    assert_eq!(client.get_pool_details(&pool_id).reward_rate, 700);

    // Only a SuperAdmin manages tiers.
    match client.try_promote_admin(&manager, &operator, &AdminTier::SuperAdmin) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    client.demote_admin(&super_admin, &manager);
    assert_eq!(client.get_admin_tier(&manager), None);
    match client.try_create_pool(&manager, &params()) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

#[test]
fn test_stranger_is_rejected() {
    let (env, client, _super_admin, _) = setup();
    let stranger = Address::generate(&env);

    match client.try_pause(&stranger) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_withdraw_reward_tokens(&stranger, &1) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    match client.try_create_pool(&stranger, &params()) {
        Err(Ok(e)) => assert_eq!(e, StakingError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

// ── Pool management ──────────────────────────────────────────────────────────

#[test]
fn test_create_pool_reports_first_invalid_parameter() {
    let (_env, client, admin, _) = setup();

    let cases = [
        (
            PoolParams {
                lock_in_period: 0,
                ..params()
            },
            StakingError::InvalidLockIn,
        ),
        (
            PoolParams {
                min_stake: 0,
                ..params()
            },
            StakingError::InvalidMinStake,
        ),
        (
            PoolParams {
                max_stake: 10,
                ..params()
            },
            StakingError::InvalidMaxStake,
        ),
        (
            PoolParams {
                reward_rate: 10_001,
                ..params()
            },
            StakingError::InvalidRewardRate,
        ),
        (
            PoolParams {
                early_penalty_bps: 10_001,
                ..params()
            },
            StakingError::InvalidBasisPoints,
        ),
        (
            PoolParams {
                capacity: 0,
                ..params()
            },
            StakingError::InvalidCapacity,
        ),
    ];

    for (p, expected) in cases {
        match client.try_create_pool(&admin, &p) {
            Err(Ok(e)) => assert_eq!(e, expected),
            _ => unreachable!("Expected {:?}", expected),
        }
    }
    assert_eq!(client.pool_count(), 0);
}

#[test]
fn test_change_reward_rate_validation() {
    let (_env, client, admin, _) = setup();
    let pool_id = client.create_pool(&admin, &params());

    match client.try_change_reward_rate(&admin, &pool_id, &10_001) {
        Err(Ok(e)) => assert_eq!(e, StakingError::InvalidRewardRate),
        _ => unreachable!("Expected InvalidRewardRate error"),
    }
    match client.try_change_reward_rate(&admin, &4, &100) {
        Err(Ok(e)) => assert_eq!(e, StakingError::InvalidPoolId),
        _ => unreachable!("Expected InvalidPoolId error"),
    }

    client.pause(&admin);
    match client.try_change_reward_rate(&admin, &pool_id, &100) {
        Err(Ok(e)) => assert_eq!(e, StakingError::OperationPaused),
        _ => unreachable!("Expected OperationPaused error"),
    }
    match client.try_create_pool(&admin, &params()) {
        Err(Ok(e)) => assert_eq!(e, StakingError::OperationPaused),
        _ => unreachable!("Expected OperationPaused error"),
    }
}

// ── Reward reserve ───────────────────────────────────────────────────────────

#[test]
fn test_reserve_withdrawal_is_clamped() {
    let (env, client, admin, token) = setup();
    StellarAssetClient::new(&env, &token).mint(&admin, &700);
    assert_eq!(client.deposit_reward_tokens(&admin, &700), 700);

    assert_eq!(client.withdraw_reward_tokens(&admin, &1_000), 700);
    assert_eq!(client.get_reward_reserve(), 0);
    assert_eq!(client.withdraw_reward_tokens(&admin, &1_000), 0);
}

#[test]
fn test_reserve_withdrawal_cannot_touch_stake() {
    let (env, client, admin, token) = setup();
    let pool_id = client.create_pool(&admin, &params());
    let asset = StellarAssetClient::new(&env, &token);

    asset.mint(&admin, &500);
    client.deposit_reward_tokens(&admin, &500);
    let staker = Address::generate(&env);
    asset.mint(&staker, &5_000);
    client.stake(&staker, &pool_id, &5_000);

    env.as_contract(&client.address, || {
        env.storage().instance().set(&REWARD_RESERVE, &2_000i128);
    });

    match client.try_withdraw_reward_tokens(&admin, &2_000) {
        Err(Ok(e)) => assert_eq!(e, StakingError::StakeBalanceViolation),
        _ => unreachable!("Expected StakeBalanceViolation error"),
    }
    assert_eq!(client.withdraw_reward_tokens(&admin, &500), 500);
}
