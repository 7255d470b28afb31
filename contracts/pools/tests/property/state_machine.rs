#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the pool contract.
//!
//! Random interleavings of stake / withdraw / claim / emergency exits and
//! clock moves across three stakers and two pools. Calls are allowed to fail;
//! after every step the books must still balance.
//!
//! Invariants tested:
//! - `pool.total_staked == Σ position.amount` for every pool
//! - `get_total_staked == Σ pool.total_staked`
//! - `pool.total_staked ≤ pool.capacity`
//! - The contract's token balance equals reserve plus staked principal

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking_pools::{PoolParams, StakingPools, StakingPoolsClient};

const STAKERS: usize = 3;
const POOLS: u32 = 2;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Stake {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
        #[proptest(strategy = "1i128..=6_000i128")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
        #[proptest(strategy = "1i128..=6_000i128")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
    },
    Emergency {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
    },
    Advance {
        #[proptest(strategy = "1u64..=400_000u64")]
        seconds: u64,
    },
    ChangeRate {
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
        #[proptest(strategy = "0u32..=10_000u32")]
        rate: u32,
    },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    env: Env,
    client: StakingPoolsClient<'static>,
    admin: Address,
    token: Address,
    stakers: Vec<Address>,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let client = StakingPoolsClient::new(&env, &env.register(StakingPools, ()));
    let admin = Address::generate(&env);
    client.initialize(&admin, &token);

    let base = PoolParams {
        lock_in_period: 86_400,
        min_stake: 10,
        max_stake: 5_000,
        reward_rate: 2_500,
        auto_compounding: false,
        early_penalty_bps: 800,
        late_bonus_bps: 300,
        capacity: 9_000,
    };
    client.create_pool(&admin, &base);
    client.create_pool(
        &admin,
        &PoolParams {
            auto_compounding: true,
            early_penalty_bps: 0,
            ..base
        },
    );
    client.set_emergency_enabled(&admin, &true);

    let asset = StellarAssetClient::new(&env, &token);
    asset.mint(&admin, &10_000_000);
    client.deposit_reward_tokens(&admin, &10_000_000);

    let stakers = (0..STAKERS)
        .map(|_| {
            let who = Address::generate(&env);
            asset.mint(&who, &50_000);
            who
        })
        .collect();

    World {
        env,
        client,
        admin,
        token,
        stakers,
    }
}

fn apply(world: &World, action: &Action) {
    let client = &world.client;
    match action {
        Action::Stake { who, pool, amount } => {
            let _ = client.try_stake(&world.stakers[*who], pool, amount);
        }
        Action::Withdraw { who, pool, amount } => {
            let _ = client.try_withdraw(&world.stakers[*who], pool, amount);
        }
        Action::Claim { who, pool } => {
            let _ = client.try_claim_rewards(&world.stakers[*who], pool);
        }
        Action::Emergency { who, pool } => {
            let _ = client.try_emergency_withdraw(&world.stakers[*who], pool);
        }
        Action::Advance { seconds } => {
            let now = world.env.ledger().timestamp();
            world.env.ledger().set_timestamp(now + seconds);
        }
        Action::ChangeRate { pool, rate } => {
            let _ = client.try_change_reward_rate(&world.admin, pool, rate);
        }
    }
}

fn check_books(world: &World) -> Result<(), TestCaseError> {
    let client = &world.client;
    let mut grand_total = 0i128;

    for pool_id in 0..POOLS {
        let pool = client.get_pool_details(&pool_id);
        let sum: i128 = world
            .stakers
            .iter()
            .map(|who| client.get_position(who, &pool_id).amount)
            .sum();
        prop_assert_eq!(pool.total_staked, sum);
        prop_assert!(pool.total_staked <= pool.capacity);
        grand_total += pool.total_staked;
    }
    prop_assert_eq!(client.get_total_staked(), grand_total);

    let held = TokenClient::new(&world.env, &world.token).balance(&client.address);
    prop_assert_eq!(held, client.get_reward_reserve() + grand_total);
    Ok(())
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_books_balance_after_every_step(
        actions in prop::collection::vec(any::<Action>(), 1..40),
    ) {
        let world = setup();
        for action in &actions {
            apply(&world, action);
            check_books(&world)?;
        }
    }

    /// Withdrawing the whole position exactly at unlock carries neither
    /// penalty nor bonus.
    #[test]
    fn prop_withdraw_at_unlock_is_principal_plus_reward(
        amount in 10i128..=5_000i128,
        start in 0u64..=2_000_000u64,
    ) {
        let world = setup();
        let who = &world.stakers[0];
        world.env.ledger().set_timestamp(start);

        world.client.stake(who, &0, &amount);
        world.env.ledger().set_timestamp(start + 86_400);
        let before = TokenClient::new(&world.env, &world.token).balance(who);
        let receipt = world.client.withdraw(who, &0, &amount);

        prop_assert_eq!(receipt.principal, amount);
        prop_assert_eq!((receipt.penalty, receipt.bonus), (0, 0));
        prop_assert_eq!(receipt.net, amount + receipt.reward);
        prop_assert_eq!(
            TokenClient::new(&world.env, &world.token).balance(who) - before,
            receipt.net
        );
        prop_assert_eq!(world.client.get_position(who, &0).amount, 0);
    }
}
