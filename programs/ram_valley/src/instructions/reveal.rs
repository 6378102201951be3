use anchor_lang::prelude::*;

use crate::engine::{commitment, registry};
use crate::events::SecretRevealed;
use crate::RevealSecret;

/// Anyone holding the secret may reveal it; the digest check is the only gate.
pub fn reveal_secret(ctx: Context<RevealSecret>, secret: [u8; 32], _round_index: u16) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let round = &mut ctx.accounts.round;
    registry::require_active(&ctx.accounts.round_registry, round)?;
    commitment::reveal(round, secret, now)?;

    msg!("Round {} revealed by {}", round.index, ctx.accounts.revealer.key());
    emit!(SecretRevealed {
        index: round.index,
        secret,
        reveal_time: now,
    });

    Ok(())
}
