use soroban_sdk::{contracterror, contracttype};

/// Error categories used to classify failures for callers and monitoring.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed parameters: zero amounts, out-of-bounds stakes, zero divisors.
    Validation = 1,
    /// A non-privileged caller invoked an admin operation.
    Authorization = 2,
    /// Contract state forbids the call: paused, locked, nothing to act on.
    State = 3,
    /// Overflow or division by zero inside reward math.
    Arithmetic = 4,
    /// The external token contract misbehaved.
    Interaction = 5,
}

/// Error codes shared by the vault and pool contracts.
///
/// # Code ranges
/// | Range   | Purpose                     |
/// |---------|-----------------------------|
/// | 1 – 9   | Lifecycle / initialisation  |
/// | 10 – 19 | Authorisation               |
/// | 20 – 39 | Validation / input          |
/// | 40 – 59 | Contract state              |
/// | 60 – 69 | Token interaction           |
/// | 70 – 79 | Arithmetic                  |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    NotAuthorized = 10,

    // ── Validation (20–39) ───────────────────────────────────
    ZeroStake = 20,
    ZeroWithdraw = 21,
    InvalidAmount = 22,
    StakeOutOfBounds = 23,
    InvalidLockIn = 24,
    InvalidMinStake = 25,
    InvalidMaxStake = 26,
    InvalidRewardRate = 27,
    InvalidCapacity = 28,
    InvalidBasisPoints = 29,
    ZeroTimeUnit = 30,
    InvalidPoolId = 31,

    // ── Contract state (40–59) ───────────────────────────────
    OperationPaused = 40,
    ReentrantCall = 41,
    InsufficientStake = 42,
    NoStake = 43,
    LockNotExpired = 44,
    LockInNotOver = 45,
    NoRewards = 46,
    CapacityExceeded = 47,
    InsufficientRewardReserve = 48,
    StakeBalanceViolation = 49,
    EmergencyDisabled = 50,

    // ── Token interaction (60–69) ────────────────────────────
    TransferFailed = 60,
    TransferMismatch = 61,

    // ── Arithmetic (70–79) ───────────────────────────────────
    DivideByZero = 70,
    MathOverflow = 71,
}

impl StakingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StakingError::NotAuthorized => ErrorCategory::Authorization,
            StakingError::ZeroStake
            | StakingError::ZeroWithdraw
            | StakingError::InvalidAmount
            | StakingError::StakeOutOfBounds
            | StakingError::InvalidLockIn
            | StakingError::InvalidMinStake
            | StakingError::InvalidMaxStake
            | StakingError::InvalidRewardRate
            | StakingError::InvalidCapacity
            | StakingError::InvalidBasisPoints
            | StakingError::ZeroTimeUnit
            | StakingError::InvalidPoolId => ErrorCategory::Validation,
            StakingError::NotInitialized
            | StakingError::AlreadyInitialized
            | StakingError::OperationPaused
            | StakingError::ReentrantCall
            | StakingError::InsufficientStake
            | StakingError::NoStake
            | StakingError::LockNotExpired
            | StakingError::LockInNotOver
            | StakingError::NoRewards
            | StakingError::CapacityExceeded
            | StakingError::InsufficientRewardReserve
            | StakingError::StakeBalanceViolation
            | StakingError::EmergencyDisabled => ErrorCategory::State,
            StakingError::TransferFailed | StakingError::TransferMismatch => {
                ErrorCategory::Interaction
            }
            StakingError::DivideByZero | StakingError::MathOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Revert string reported to dependent tooling. These are part of the
    /// external contract and must not change.
    pub fn message(&self) -> &'static str {
        match self {
            StakingError::NotInitialized => "Contract has not been initialized",
            StakingError::AlreadyInitialized => "Contract is already initialized",
            StakingError::NotAuthorized => "Not authorized",
            StakingError::ZeroStake => "Staking 0 tokens",
            StakingError::ZeroWithdraw => "Withdrawing 0 tokens",
            StakingError::InvalidAmount => "Amount must be greater than 0",
            StakingError::StakeOutOfBounds => "Stake amount out of bounds",
            StakingError::InvalidLockIn => "Lock-in period must be greater than 0",
            StakingError::InvalidMinStake => "Minimum stake must be greater than 0",
            StakingError::InvalidMaxStake => "Maximum stake must be greater than minimum stake",
            StakingError::InvalidRewardRate => "Invalid reward rate",
            StakingError::InvalidCapacity => "Capacity must be greater than 0",
            StakingError::InvalidBasisPoints => "Invalid basis points",
            StakingError::ZeroTimeUnit => "time-unit can't be 0",
            StakingError::InvalidPoolId => "Invalid pool ID",
            StakingError::OperationPaused => "Pausable: paused",
            StakingError::ReentrantCall => "ReentrancyGuard: reentrant call",
            StakingError::InsufficientStake => "Withdrawing more than staked",
            StakingError::NoStake => "No stake to withdraw",
            StakingError::LockNotExpired => "Locking period not expired",
            StakingError::LockInNotOver => "Lock-in period not over",
            StakingError::NoRewards => "No rewards",
            StakingError::CapacityExceeded => "Pool capacity exceeded",
            StakingError::InsufficientRewardReserve => "Not enough reward tokens",
            StakingError::StakeBalanceViolation => "Withdrawal would touch staked tokens",
            StakingError::EmergencyDisabled => "Emergency withdrawal disabled",
            StakingError::TransferFailed => "Token transfer failed",
            StakingError::TransferMismatch => "Transferred amount mismatch",
            StakingError::DivideByZero => "divide by 0",
            StakingError::MathOverflow => "Arithmetic overflow",
        }
    }
}
