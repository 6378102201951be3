use anchor_lang::prelude::*;

use crate::engine::{entropy, registry};
use crate::errors::RamValleyError;
use crate::events::SeedContributed;
use crate::ContributeSeed;

pub fn contribute_seed(ctx: Context<ContributeSeed>, value: [u8; 32]) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, RamValleyError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let contributor = ctx.accounts.contributor.key();

    let round = ctx
        .accounts
        .round
        .as_mut()
        .ok_or(RamValleyError::NoActiveRound)?;
    registry::require_active(&ctx.accounts.round_registry, round)?;

    let participant = &mut ctx.accounts.participant;
    if !participant.is_enrolled() {
        participant.bump = ctx.bumps.participant;
    }

    let seed = &mut ctx.accounts.seed;
    // a populated row is rejected below, keep its bump untouched
    if seed.is_vacant() {
        seed.bump = ctx.bumps.seed;
    }

    entropy::contribute(round, participant, seed, contributor, value, now)?;

    emit!(SeedContributed {
        index: round.index,
        id: seed.id,
        contributor,
        tickets_available: participant.tickets_available,
    });

    Ok(())
}
