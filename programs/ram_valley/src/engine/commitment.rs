use anchor_lang::prelude::*;

use crate::errors::RamValleyError;
use crate::state::Round;
use crate::utils::{commitment_hash, ZERO_DIGEST};

/// Store the opener's digest; the secret starts as the zero sentinel.
pub fn open_commitment(round: &mut Round, committed_hash: [u8; 32]) -> Result<()> {
    require!(committed_hash != ZERO_DIGEST, RamValleyError::InvalidCommitment);
    round.committed_hash = committed_hash;
    round.revealed_secret = ZERO_DIGEST;
    round.reveal_time = 0;
    Ok(())
}

/// Disclose the secret behind `round.committed_hash`.
///
/// Only possible once seeding is over, so the secret was fixed before any
/// contributed entropy could be observed.
pub fn reveal(round: &mut Round, secret: [u8; 32], now: i64) -> Result<()> {
    require!(!round.is_revealed(), RamValleyError::AlreadyRevealed);
    require!(now >= round.seed_deadline(), RamValleyError::SeedPhaseNotOver);
    require!(
        secret != ZERO_DIGEST && commitment_hash(&secret) == round.committed_hash,
        RamValleyError::ProofMismatch
    );

    round.revealed_secret = secret;
    round.reveal_time = now;
    Ok(())
}
