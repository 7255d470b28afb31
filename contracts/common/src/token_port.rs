//! Narrow port over an external token contract.
//!
//! Amounts reported back are balance deltas observed around the call, not the
//! requested amount, so fee-on-transfer tokens surface as a mismatch the
//! caller can reject.

use crate::StakingError;
use soroban_sdk::{token, Address, Env};

pub trait TokenPort {
    /// Pulls `amount` from `from` into this contract. Returns what arrived.
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<i128, StakingError>;

    /// Sends `amount` from this contract to `to`. Returns what left.
    fn transfer_out(&self, to: &Address, amount: i128) -> Result<i128, StakingError>;

    /// Mints `amount` to `to`. Returns what `to` received.
    fn mint_to(&self, to: &Address, amount: i128) -> Result<i128, StakingError>;

    /// Token balance held by this contract.
    fn held(&self) -> i128;
}

/// [`TokenPort`] backed by a Stellar Asset Contract or any contract that
/// implements the standard token interface.
pub struct SacTokenPort<'a> {
    env: &'a Env,
    token: Address,
}

impl<'a> SacTokenPort<'a> {
    pub fn new(env: &'a Env, token: Address) -> Self {
        Self { env, token }
    }

    pub fn address(&self) -> &Address {
        &self.token
    }

    fn client(&self) -> token::Client<'a> {
        token::Client::new(self.env, &self.token)
    }

    fn balance_of(&self, id: &Address) -> i128 {
        self.client().balance(id)
    }
}

fn delta(before: i128, after: i128) -> Result<i128, StakingError> {
    after.checked_sub(before).ok_or(StakingError::MathOverflow)
}

impl TokenPort for SacTokenPort<'_> {
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<i128, StakingError> {
        let this = self.env.current_contract_address();
        let before = self.balance_of(&this);
        match self.client().try_transfer(from, &this, &amount) {
            Ok(Ok(())) => {}
            _ => return Err(StakingError::TransferFailed),
        }
        delta(before, self.balance_of(&this))
    }

    fn transfer_out(&self, to: &Address, amount: i128) -> Result<i128, StakingError> {
        if amount == 0 {
            return Ok(0);
        }
        let this = self.env.current_contract_address();
        let before = self.balance_of(&this);
        match self.client().try_transfer(&this, to, &amount) {
            Ok(Ok(())) => {}
            _ => return Err(StakingError::TransferFailed),
        }
        delta(self.balance_of(&this), before)
    }

    fn mint_to(&self, to: &Address, amount: i128) -> Result<i128, StakingError> {
        let before = self.balance_of(to);
        match token::StellarAssetClient::new(self.env, &self.token).try_mint(to, &amount) {
            Ok(Ok(())) => {}
            _ => return Err(StakingError::TransferFailed),
        }
        delta(before, self.balance_of(to))
    }

    fn held(&self) -> i128 {
        self.balance_of(&self.env.current_contract_address())
    }
}
