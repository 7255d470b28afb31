#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking_vault::{RewardSource, StakingVault, StakingVaultClient, VaultParams};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u32 },
    Withdraw { amount: u32 },
    ClaimRewards,
    EmergencyWithdraw,
    Advance { seconds: u16 },
    SetRatio { numerator: u8, denominator: u8 },
    SetTimeUnit { unit: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
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
            lock_period: 600,
            emergency_penalty_bps: 1_000,
        },
    );
    StellarAssetClient::new(&env, &reward_token).mint(&owner, &1_000_000_000);
    client.deposit_reward_tokens(&owner, &1_000_000_000);

    let stake_asset = StellarAssetClient::new(&env, &stake_token);
    let users: Vec<Address> = (0..4)
        .map(|_| {
            let who = Address::generate(&env);
            stake_asset.mint(&who, &(u32::MAX as i128 * 4));
            who
        })
        .collect();

    // Errors are expected; panics and broken books are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &(amount as i128));
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(caller, &(amount as i128));
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(caller);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
            FuzzAction::SetRatio {
                numerator,
                denominator,
            } => {
                let _ = client.try_set_reward_ratio(&owner, &(numerator as u64), &(denominator as u64));
            }
            FuzzAction::SetTimeUnit { unit } => {
                let _ = client.try_set_time_unit(&owner, &(unit as u64));
            }
        }

        let staked: i128 = users.iter().map(|who| client.get_position(who).amount).sum();
        assert_eq!(client.get_total_staked(), staked);
    }
});
