use anchor_lang::prelude::*;

use crate::engine::phase::require_seeding;
use crate::errors::RamValleyError;
use crate::state::{Participant, Round, Seed};

/// Accept one entropy value for `round` and grant `account` a ticket for it.
///
/// `seed` is the row stored under `(round, value)`; a non-vacant row means
/// the value was already contributed to this round. `participant` is the
/// `(round, account)` row, vacant on first contribution.
pub fn contribute(
    round: &mut Round,
    participant: &mut Participant,
    seed: &mut Seed,
    account: Pubkey,
    value: [u8; 32],
    now: i64,
) -> Result<()> {
    require_seeding(round, now)?;
    require!(seed.is_vacant(), RamValleyError::DuplicateSeed);

    record_seed(round, seed, account, value, now)?;
    grant_ticket(round, participant, account, now)
}

/// Opener enrollment at round open: seed 0 carries the commitment and the
/// opener gets the round's first ticket.
pub fn enroll_opener(
    round: &mut Round,
    participant: &mut Participant,
    seed: &mut Seed,
    now: i64,
) -> Result<()> {
    require!(round.next_seed_id == 0, RamValleyError::SeedOrderMismatch);
    require!(seed.is_vacant(), RamValleyError::DuplicateSeed);

    let opener = round.opener;
    let value = round.committed_hash;
    record_seed(round, seed, opener, value, now)?;
    grant_ticket(round, participant, opener, now)
}

fn record_seed(
    round: &mut Round,
    seed: &mut Seed,
    contributor: Pubkey,
    value: [u8; 32],
    now: i64,
) -> Result<()> {
    seed.round_index = round.index;
    seed.id = round.next_seed_id;
    seed.contributor = contributor;
    seed.value = value;
    seed.created_at = now;

    round.next_seed_id = round
        .next_seed_id
        .checked_add(1)
        .ok_or(RamValleyError::MathOverflow)?;
    Ok(())
}

fn grant_ticket(
    round: &mut Round,
    participant: &mut Participant,
    account: Pubkey,
    now: i64,
) -> Result<()> {
    if participant.is_enrolled() {
        require_keys_eq!(participant.account, account, RamValleyError::Unauthorized);
        require!(participant.round_index == round.index, RamValleyError::NotActiveRound);
    } else {
        participant.round_index = round.index;
        participant.account = account;
        participant.tickets_available = 0;
        participant.tickets_used = 0;
        participant.score = 0;
        participant.claimed = false;
        participant.reward = 0;
        participant.joined_at = now;

        round.participants = round
            .participants
            .checked_add(1)
            .ok_or(RamValleyError::MathOverflow)?;
    }

    participant.tickets_available = participant
        .tickets_available
        .checked_add(1)
        .ok_or(RamValleyError::MathOverflow)?;
    Ok(())
}
