use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::RamValleyError;
use crate::{InitializeConfig, InitializeRoundRegistry, SetPause};

pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
    let cfg = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;
    cfg.paused = false;
    cfg.version = INITIAL_VERSION;

    msg!("Config initialized, admin: {}", cfg.admin);
    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), RamValleyError::Unauthorized);
    cfg.paused = paused;

    msg!("Paused: {}", paused);
    Ok(())
}

pub fn initialize_round_registry(ctx: Context<InitializeRoundRegistry>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), RamValleyError::Unauthorized);

    let rr = &mut ctx.accounts.round_registry;
    rr.admin = cfg.admin;
    rr.bump = ctx.bumps.round_registry;
    rr.current_index = NO_ROUND;
    rr.version = INITIAL_VERSION;

    Ok(())
}
