use anchor_lang::prelude::*;

use crate::engine::{registry, scoring, settlement};
use crate::events::TicketRedeemed;
use crate::RedeemTicket;

pub fn redeem_ticket(ctx: Context<RedeemTicket>, _round_index: u16) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let redeemer = ctx.accounts.redeemer.key();

    let round = &mut ctx.accounts.round;
    registry::require_active(&ctx.accounts.round_registry, round)?;
    settlement::require_pool_vault(round, &ctx.accounts.pool_vault.key())?;

    let ordinal = round.tickets_used;
    let participant = &mut ctx.accounts.participant;
    let points = scoring::redeem_ticket(round, participant, &ctx.accounts.seed, now)?;

    // the seed row is closed into the vault on exit; its rent is the release
    let seed_lamports = ctx.accounts.seed.to_account_info().lamports();
    let pool_credit = settlement::credit_closed_seed(round, seed_lamports)?;

    emit!(TicketRedeemed {
        index: round.index,
        ordinal,
        account: redeemer,
        points,
        total_score: round.total_score,
        resource_released: round.resource_released,
        pool_credit,
    });

    Ok(())
}
