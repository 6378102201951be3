use anchor_lang::prelude::*;

use crate::constants::RESOURCE_PER_TICKET;
use crate::errors::RamValleyError;
use crate::state::{Participant, Round, Seed};
use crate::utils::score_for_ticket;

/// Consume one of `participant`'s tickets.
///
/// The ticket always consumes the seed whose id equals `round.tickets_used`,
/// whoever redeems it, and its score comes from that ordinal and the revealed
/// secret. Returns the score increment.
pub fn redeem_ticket(
    round: &mut Round,
    participant: &mut Participant,
    seed: &Seed,
    now: i64,
) -> Result<u64> {
    let deadline = round.redeem_deadline().ok_or(RamValleyError::NoProof)?;
    require!(now < deadline, RamValleyError::RedeemPhaseOver);

    require!(
        participant.is_enrolled() && participant.round_index == round.index,
        RamValleyError::NotParticipant
    );
    require!(participant.tickets_remaining() > 0, RamValleyError::NoTicketsAvailable);
    require!(
        seed.round_index == round.index && seed.id == round.tickets_used,
        RamValleyError::SeedOrderMismatch
    );

    let points = score_for_ticket(&round.revealed_secret, round.tickets_used, &seed.value);

    participant.tickets_used = participant
        .tickets_used
        .checked_add(1)
        .ok_or(RamValleyError::MathOverflow)?;
    participant.score = participant
        .score
        .checked_add(points)
        .ok_or(RamValleyError::MathOverflow)?;

    round.tickets_used = round
        .tickets_used
        .checked_add(1)
        .ok_or(RamValleyError::MathOverflow)?;
    round.total_score = round
        .total_score
        .checked_add(points)
        .ok_or(RamValleyError::MathOverflow)?;
    round.resource_released = round
        .tickets_used
        .checked_mul(RESOURCE_PER_TICKET)
        .ok_or(RamValleyError::MathOverflow)?;

    Ok(points)
}
