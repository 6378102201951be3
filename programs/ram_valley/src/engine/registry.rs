use anchor_lang::prelude::*;

use crate::constants::{INITIAL_VERSION, MAX_PHASE_DURATION_SECS, MIN_PHASE_DURATION_SECS, NO_ROUND};
use crate::engine::commitment::open_commitment;
use crate::engine::phase::{phase_of, Phase};
use crate::errors::RamValleyError;
use crate::state::{Round, RoundRegistry};

/// Parameters of a freshly opened round.
#[derive(Debug, Clone, Copy)]
pub struct RoundParams {
    pub index: u16,
    pub opener: Pubkey,
    pub committed_hash: [u8; 32],
    pub seed_phase_duration: u32,
    pub redeem_phase_duration: u32,
}

pub fn validate_duration(secs: u32) -> Result<()> {
    require!(
        (MIN_PHASE_DURATION_SECS..=MAX_PHASE_DURATION_SECS).contains(&secs),
        RamValleyError::InvalidDuration
    );
    Ok(())
}

/// `Ok` only for the round the registry points at.
pub fn require_active(registry: &RoundRegistry, round: &Round) -> Result<()> {
    require!(registry.current_index != NO_ROUND, RamValleyError::NoActiveRound);
    require!(round.index == registry.current_index, RamValleyError::NotActiveRound);
    Ok(())
}

/// Open round `params.index`.
///
/// `active` is the round the registry currently points at (`None` before the
/// first round); a new round may only follow once its seed phase is over.
/// Opener enrollment is done separately by `entropy::enroll_opener`.
pub fn open_round(
    registry: &mut RoundRegistry,
    active: Option<&Round>,
    round: &mut Round,
    params: RoundParams,
    now: i64,
) -> Result<()> {
    let expected = registry
        .current_index
        .checked_add(1)
        .ok_or(RamValleyError::MathOverflow)?;
    require!(params.index == expected, RamValleyError::RoundOutOfOrder);

    if registry.current_index != NO_ROUND {
        let prev = active.ok_or(RamValleyError::NoActiveRound)?;
        require!(prev.index == registry.current_index, RamValleyError::NotActiveRound);
        require!(phase_of(prev, now) != Phase::Seeding, RamValleyError::PreviousRoundActive);
    }

    validate_duration(params.seed_phase_duration)?;
    validate_duration(params.redeem_phase_duration)?;

    init_round(round, params, now)?;
    registry.current_index = params.index;
    Ok(())
}

/// Forced advance: the active round's seed phase ended and nobody revealed,
/// so the next round opens with the same opener, commitment and durations.
/// The stale round stays behind, unrevealed.
pub fn advance_stale_round(
    registry: &mut RoundRegistry,
    stale: &Round,
    next: &mut Round,
    now: i64,
) -> Result<()> {
    require_active(registry, stale)?;
    match phase_of(stale, now) {
        Phase::AwaitingReveal => {}
        Phase::Seeding => return err!(RamValleyError::SeedPhaseNotOver),
        Phase::Redeeming | Phase::Closed => return err!(RamValleyError::AlreadyRevealed),
    }

    let params = RoundParams {
        index: stale.index.checked_add(1).ok_or(RamValleyError::MathOverflow)?,
        opener: stale.opener,
        committed_hash: stale.committed_hash,
        seed_phase_duration: stale.seed_phase_duration,
        redeem_phase_duration: stale.redeem_phase_duration,
    };

    init_round(next, params, now)?;
    registry.current_index = params.index;
    Ok(())
}

fn init_round(round: &mut Round, params: RoundParams, now: i64) -> Result<()> {
    round.index = params.index;
    round.opener = params.opener;

    round.start_time = now;
    round.seed_phase_duration = params.seed_phase_duration;
    round.redeem_phase_duration = params.redeem_phase_duration;
    open_commitment(round, params.committed_hash)?;

    round.next_seed_id = 0;
    round.participants = 0;
    round.tickets_used = 0;
    round.total_score = 0;
    round.resource_released = 0;

    round.pool_credited = 0;
    round.settlement_started = false;
    round.settlement_pool = 0;
    round.rewards_paid = 0;
    round.claims = 0;

    round.version = INITIAL_VERSION;
    Ok(())
}
