use anchor_lang::prelude::*;

#[error_code]
pub enum RamValleyError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,

    // -----------------
    // Phase
    // -----------------
    #[msg("No active round")]
    NoActiveRound,
    #[msg("Round is not the active round")]
    NotActiveRound,
    #[msg("Previous round is not over")]
    PreviousRoundActive,
    #[msg("Seed phase is over")]
    SeedPhaseOver,
    #[msg("Seed phase is not over")]
    SeedPhaseNotOver,
    #[msg("No proof")]
    NoProof,
    #[msg("Proof already revealed")]
    AlreadyRevealed,
    #[msg("Redeem phase is over")]
    RedeemPhaseOver,
    #[msg("Redeem phase is not over")]
    RedeemPhaseNotOver,

    // -----------------
    // Integrity
    // -----------------
    #[msg("Round already exists or is out of order")]
    RoundOutOfOrder,
    #[msg("Commitment hash must not be zero")]
    InvalidCommitment,
    #[msg("Invalid phase duration")]
    InvalidDuration,
    #[msg("Seed already used")]
    DuplicateSeed,
    #[msg("Proof does not match")]
    ProofMismatch,
    #[msg("No next seed")]
    SeedOrderMismatch,
    #[msg("Pool vault PDA mismatch")]
    PoolVaultMismatch,

    // -----------------
    // Exhaustion
    // -----------------
    #[msg("Account not found")]
    NotParticipant,
    #[msg("No tickets to redeem")]
    NoTicketsAvailable,
    #[msg("No points to redeem")]
    NothingToClaim,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Insufficient pool funds")]
    InsufficientPool,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Coarse grouping of failures, telling a caller what to do about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Not valid in the current phase; retry later.
    Phase,
    /// Input rejected as reused or tampered; retry with different input.
    Integrity,
    /// Nothing left to do for this caller.
    Exhaustion,
    /// Signer or pause gate.
    Access,
    Arithmetic,
}

impl RamValleyError {
    pub fn class(&self) -> ErrorClass {
        use RamValleyError::*;
        match self {
            NoActiveRound | NotActiveRound | PreviousRoundActive | SeedPhaseOver
            | SeedPhaseNotOver | NoProof | AlreadyRevealed | RedeemPhaseOver
            | RedeemPhaseNotOver => ErrorClass::Phase,

            RoundOutOfOrder | InvalidCommitment | InvalidDuration | DuplicateSeed
            | ProofMismatch | SeedOrderMismatch | PoolVaultMismatch => ErrorClass::Integrity,

            NotParticipant | NoTicketsAvailable | NothingToClaim | AlreadyClaimed
            | InsufficientPool => ErrorClass::Exhaustion,

            Unauthorized | Paused => ErrorClass::Access,

            MathOverflow => ErrorClass::Arithmetic,
        }
    }
}
