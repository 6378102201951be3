use anchor_lang::prelude::*;

use crate::engine::registry::{self, RoundParams};
use crate::engine::{entropy, phase};
use crate::errors::RamValleyError;
use crate::events::{RoundAdvanced, RoundOpened};
use crate::{AdvanceRound, OpenRound, RoundView};

pub fn open_round(
    ctx: Context<OpenRound>,
    index: u16,
    committed_hash: [u8; 32],
    seed_phase_duration: u32,
    redeem_phase_duration: u32,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, RamValleyError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), RamValleyError::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    let opener = ctx.accounts.admin.key();

    let params = RoundParams {
        index,
        opener,
        committed_hash,
        seed_phase_duration,
        redeem_phase_duration,
    };

    let active = ctx.accounts.active_round.as_deref();
    let round = &mut ctx.accounts.round;
    registry::open_round(&mut ctx.accounts.round_registry, active, round, params, now)?;

    round.bump = ctx.bumps.round;
    round.pool_vault = ctx.accounts.pool_vault.key();
    round.pool_vault_bump = ctx.bumps.pool_vault;

    // the opener's seed row is leased by the admin, like any other seed
    let participant = &mut ctx.accounts.opener_participant;
    participant.bump = ctx.bumps.opener_participant;
    let seed = &mut ctx.accounts.opener_seed;
    seed.bump = ctx.bumps.opener_seed;
    entropy::enroll_opener(round, participant, seed, now)?;

    msg!("Round {} opened, seed phase ends at {}", index, round.seed_deadline());
    emit!(RoundOpened {
        index,
        opener,
        committed_hash,
        start_time: now,
        seed_phase_duration,
        redeem_phase_duration,
    });

    Ok(())
}

pub fn advance_round(ctx: Context<AdvanceRound>, next_index: u16) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, RamValleyError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let stale = &ctx.accounts.stale_round;
    require!(
        stale.index.checked_add(1) == Some(next_index),
        RamValleyError::RoundOutOfOrder
    );

    let next = &mut ctx.accounts.next_round;
    registry::advance_stale_round(&mut ctx.accounts.round_registry, stale, next, now)?;

    next.bump = ctx.bumps.next_round;
    next.pool_vault = ctx.accounts.pool_vault.key();
    next.pool_vault_bump = ctx.bumps.pool_vault;

    let participant = &mut ctx.accounts.opener_participant;
    participant.bump = ctx.bumps.opener_participant;
    let seed = &mut ctx.accounts.opener_seed;
    seed.bump = ctx.bumps.opener_seed;
    entropy::enroll_opener(next, participant, seed, now)?;

    msg!("Round {} abandoned without reveal, round {} opened", stale.index, next_index);
    emit!(RoundAdvanced {
        stale_index: stale.index,
        index: next_index,
        start_time: now,
    });

    Ok(())
}

pub fn seed_time(ctx: Context<RoundView>, _round_index: u16) -> Result<i64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(phase::seed_time_remaining(&ctx.accounts.round, now))
}

pub fn redeem_time(ctx: Context<RoundView>, _round_index: u16) -> Result<i64> {
    let now = Clock::get()?.unix_timestamp;
    phase::redeem_time_remaining(&ctx.accounts.round, now)
}
