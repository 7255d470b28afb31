#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pools::{PoolParams, StakingPools, StakingPoolsClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { pool: bool, amount: u32 },
    Withdraw { pool: bool, amount: u32 },
    ClaimRewards { pool: bool },
    EmergencyWithdraw { pool: bool },
    Advance { seconds: u32 },
    ChangeRate { pool: bool, rate: u16 },
    ToggleEmergency { enabled: bool },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
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
        min_stake: 1,
        max_stake: u32::MAX as i128,
        reward_rate: 1_000,
        auto_compounding: false,
        early_penalty_bps: 500,
        late_bonus_bps: 250,
        capacity: u32::MAX as i128 * 2,
    };
    client.create_pool(&admin, &base);
    client.create_pool(
        &admin,
        &PoolParams {
            auto_compounding: true,
            ..base
        },
    );

    let asset = StellarAssetClient::new(&env, &token);
    asset.mint(&admin, &1_000_000_000_000);
    client.deposit_reward_tokens(&admin, &1_000_000_000_000);

    let users: Vec<Address> = (0..4)
        .map(|_| {
            let who = Address::generate(&env);
            asset.mint(&who, &(u32::MAX as i128 * 4));
            who
        })
        .collect();

    // Errors are expected; panics and broken books are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { pool, amount } => {
                let _ = client.try_stake(caller, &(pool as u32), &(amount as i128));
            }
            FuzzAction::Withdraw { pool, amount } => {
                let _ = client.try_withdraw(caller, &(pool as u32), &(amount as i128));
            }
            FuzzAction::ClaimRewards { pool } => {
                let _ = client.try_claim_rewards(caller, &(pool as u32));
            }
            FuzzAction::EmergencyWithdraw { pool } => {
                let _ = client.try_emergency_withdraw(caller, &(pool as u32));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
            FuzzAction::ChangeRate { pool, rate } => {
                let _ = client.try_change_reward_rate(&admin, &(pool as u32), &(rate as u32));
            }
            FuzzAction::ToggleEmergency { enabled } => {
                let _ = client.try_set_emergency_enabled(&admin, &enabled);
            }
        }

        let held = TokenClient::new(&env, &token).balance(&client.address);
        assert_eq!(held, client.get_reward_reserve() + client.get_total_staked());
    }
});
