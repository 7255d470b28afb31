//! Test doubles shared by the contract test suites.

use crate::BASIS_POINTS;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

const FEE_BPS: Symbol = symbol_short!("FEE_BPS");
const BALANCE: Symbol = symbol_short!("BAL");

/// Token that burns `fee_bps` of every transfer, delivering less than was
/// sent. Implements just enough of the token interface for the port.
#[contract]
pub struct FeeOnTransferToken;

#[contractimpl]
impl FeeOnTransferToken {
    pub fn __constructor(env: Env, fee_bps: u32) {
        env.storage().instance().set(&FEE_BPS, &fee_bps);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let key = (BALANCE, to);
        let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(current + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let fee_bps: u32 = env.storage().instance().get(&FEE_BPS).unwrap_or(0);
        let fee = amount * fee_bps as i128 / BASIS_POINTS;

        let from_key = (BALANCE, from);
        let from_balance: i128 = env.storage().persistent().get(&from_key).unwrap_or(0);
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .persistent()
            .set(&from_key, &(from_balance - amount));

        let to_key = (BALANCE, to);
        let to_balance: i128 = env.storage().persistent().get(&to_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&to_key, &(to_balance + amount - fee));
    }
}
