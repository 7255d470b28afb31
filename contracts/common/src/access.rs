//! Administrative capability.
//!
//! Every admin operation asks one question: `can_administer(caller)`. The
//! vault answers it with a single stored owner, the pool registry with a
//! three-tier admin set. Both are expressed as [`AdminCapability`].

use crate::{StakingError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy.
///
/// - `SuperAdmin`    – everything, including promoting and demoting admins.
/// - `ContractAdmin` – pool creation, rates, reserve and emergency toggles.
/// - `OperatorAdmin` – pause and unpause only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Capability ───────────────────────────────────────────────────────────────

pub trait AdminCapability {
    fn can_administer(&self, env: &Env, caller: &Address) -> bool;
}

/// Capability held by exactly one stored owner address.
pub struct SingleOwner;

impl AdminCapability for SingleOwner {
    fn can_administer(&self, env: &Env, caller: &Address) -> bool {
        owner(env).map_or(false, |owner| owner == *caller)
    }
}

/// Capability held by any address whose tier is at least the given one.
pub struct TierAtLeast(pub AdminTier);

impl AdminCapability for TierAtLeast {
    fn can_administer(&self, env: &Env, caller: &Address) -> bool {
        match get_admin_tier(env, caller) {
            Some(tier) => tier.has_at_least(&self.0),
            None => false,
        }
    }
}

/// Authenticates `caller` and checks the capability.
pub fn authorize(
    env: &Env,
    caller: &Address,
    capability: &impl AdminCapability,
) -> Result<(), StakingError> {
    caller.require_auth();
    if !capability.can_administer(env, caller) {
        return Err(StakingError::NotAuthorized);
    }
    Ok(())
}

// ── Owner ────────────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

// ── Tiers ────────────────────────────────────────────────────────────────────

fn admin_tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

/// Assigns a tier. Callers must verify authorization beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = admin_tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage().persistent().get(&admin_tier_key(admin))
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&admin_tier_key(admin));
}

/// Promotes `target` to `tier`. Only a `SuperAdmin` may do this.
pub fn promote_admin(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: AdminTier,
) -> Result<(), StakingError> {
    authorize(env, caller, &TierAtLeast(AdminTier::SuperAdmin))?;
    set_admin_tier(env, target, tier);
    Ok(())
}

/// Removes the tier of `target`. Only a `SuperAdmin` may do this.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> Result<(), StakingError> {
    authorize(env, caller, &TierAtLeast(AdminTier::SuperAdmin))?;
    remove_admin_tier(env, target);
    Ok(())
}
