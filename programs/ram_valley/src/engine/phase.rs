use anchor_lang::prelude::*;

use crate::errors::RamValleyError;
use crate::state::Round;

/// Phase of a round, derived from its timestamps at the moment of an action.
///
/// Nothing stores this value: a round moves from `Seeding` to
/// `AwaitingReveal` (and from `Redeeming` to `Closed`) simply because the
/// clock passed a deadline, and the next action to touch it observes that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seeding,
    AwaitingReveal,
    Redeeming,
    Closed,
}

pub fn phase_of(round: &Round, now: i64) -> Phase {
    if now < round.seed_deadline() {
        return Phase::Seeding;
    }
    match round.redeem_deadline() {
        None => Phase::AwaitingReveal,
        Some(deadline) if now < deadline => Phase::Redeeming,
        Some(_) => Phase::Closed,
    }
}

pub fn require_seeding(round: &Round, now: i64) -> Result<()> {
    require!(phase_of(round, now) == Phase::Seeding, RamValleyError::SeedPhaseOver);
    Ok(())
}

/// Seconds left in the seed phase; negative once it is over.
pub fn seed_time_remaining(round: &Round, now: i64) -> i64 {
    round.seed_deadline().saturating_sub(now)
}

/// Seconds left in the redeem phase; negative once it is over.
pub fn redeem_time_remaining(round: &Round, now: i64) -> Result<i64> {
    let deadline = round.redeem_deadline().ok_or(RamValleyError::NoProof)?;
    Ok(deadline.saturating_sub(now))
}
