//! Shared staking core for the vault and pool contracts.
//!
//! This crate provides:
//! - [`StakingError`]: one error enum with stable codes and the exact
//!   revert messages every contract reports.
//! - [`reward_math`]: pure reward formulas.
//! - [`token_port`]: the narrow transfer / mint port over a token contract.
//! - [`guard`]: pause flag and single-slot reentrancy lock.
//! - [`access`]: the `can_administer` capability (single owner or tiers).

#![no_std]

pub mod access;
pub mod errors;
pub mod guard;
pub mod reward_math;
pub mod token_port;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use access::*;
pub use errors::*;
pub use token_port::{SacTokenPort, TokenPort};

// ── Shared constants ─────────────────────────────────────────────────────────

/// 100 % expressed in basis points.
pub const BASIS_POINTS: i128 = 10_000;

/// Seconds in one accrual day for compounding.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Fixed-point scale used by the compounding accumulator (1e18).
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Upper bound on compounding periods evaluated per accrual (ten years of
/// daily periods). Days beyond this bound earn nothing further.
pub const MAX_COMPOUNDING_PERIODS: u64 = 3_650;

/// Persistent-entry TTL management, shared by every contract.
pub const TTL_THRESHOLD: u32 = 5_184_000;
pub const TTL_EXTEND_TO: u32 = 10_368_000;
