// programs/ram_valley/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::{Config, Participant, Round, RoundRegistry, Seed};
use crate::RESOURCE_PER_TICKET;

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct InitializeRoundRegistry<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + RoundRegistry::INIT_SPACE,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Round lifecycle
// ----------------------------

#[derive(Accounts)]
#[instruction(index: u16, committed_hash: [u8; 32])]
pub struct OpenRound<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    /// Round the registry points at; omitted before the first round.
    #[account(
        seeds = [crate::ROUND_SEED, round_registry.current_index.to_le_bytes().as_ref()],
        bump = active_round.bump
    )]
    pub active_round: Option<Account<'info, Round>>,

    #[account(
        init,
        payer = admin,
        space = 8 + Round::INIT_SPACE,
        seeds = [crate::ROUND_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    /// CHECK: system-owned pool vault PDA, holds released rent, no data
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::POOL_VAULT_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub pool_vault: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + Participant::INIT_SPACE,
        seeds = [
            crate::PARTICIPANT_SEED,
            index.to_le_bytes().as_ref(),
            admin.key().as_ref(),
        ],
        bump
    )]
    pub opener_participant: Account<'info, Participant>,

    #[account(
        init,
        payer = admin,
        space = RESOURCE_PER_TICKET as usize,
        seeds = [
            crate::SEED_SEED,
            index.to_le_bytes().as_ref(),
            committed_hash.as_ref(),
        ],
        bump
    )]
    pub opener_seed: Account<'info, Seed>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(next_index: u16)]
pub struct AdvanceRound<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    #[account(
        seeds = [crate::ROUND_SEED, round_registry.current_index.to_le_bytes().as_ref()],
        bump = stale_round.bump
    )]
    pub stale_round: Account<'info, Round>,

    #[account(
        init,
        payer = payer,
        space = 8 + Round::INIT_SPACE,
        seeds = [crate::ROUND_SEED, next_index.to_le_bytes().as_ref()],
        bump
    )]
    pub next_round: Account<'info, Round>,

    /// CHECK: system-owned pool vault PDA, holds released rent, no data
    #[account(
        init,
        payer = payer,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::POOL_VAULT_SEED, next_index.to_le_bytes().as_ref()],
        bump
    )]
    pub pool_vault: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + Participant::INIT_SPACE,
        seeds = [
            crate::PARTICIPANT_SEED,
            next_index.to_le_bytes().as_ref(),
            stale_round.opener.as_ref(),
        ],
        bump
    )]
    pub opener_participant: Account<'info, Participant>,

    #[account(
        init,
        payer = payer,
        space = RESOURCE_PER_TICKET as usize,
        seeds = [
            crate::SEED_SEED,
            next_index.to_le_bytes().as_ref(),
            stale_round.committed_hash.as_ref(),
        ],
        bump
    )]
    pub opener_seed: Account<'info, Seed>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(value: [u8; 32])]
pub struct ContributeSeed<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    /// Active round; omitted when no round was ever opened.
    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_registry.current_index.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Option<Account<'info, Round>>,

    // Participant rent is never reclaimed: a per-round entrance fee.
    #[account(
        init_if_needed,
        payer = contributor,
        space = 8 + Participant::INIT_SPACE,
        seeds = [
            crate::PARTICIPANT_SEED,
            round_registry.current_index.to_le_bytes().as_ref(),
            contributor.key().as_ref(),
        ],
        bump
    )]
    pub participant: Account<'info, Participant>,

    // Keyed by value: an existing account means the value was used.
    #[account(
        init_if_needed,
        payer = contributor,
        space = RESOURCE_PER_TICKET as usize,
        seeds = [
            crate::SEED_SEED,
            round_registry.current_index.to_le_bytes().as_ref(),
            value.as_ref(),
        ],
        bump
    )]
    pub seed: Account<'info, Seed>,

    #[account(mut)]
    pub contributor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(secret: [u8; 32], round_index: u16)]
pub struct RevealSecret<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    pub revealer: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(round_index: u16)]
pub struct RedeemTicket<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [
            crate::PARTICIPANT_SEED,
            round_index.to_le_bytes().as_ref(),
            redeemer.key().as_ref(),
        ],
        bump = participant.bump
    )]
    pub participant: Account<'info, Participant>,

    /// Seed whose id equals `round.tickets_used`; its rent goes to the pool.
    #[account(
        mut,
        seeds = [
            crate::SEED_SEED,
            round_index.to_le_bytes().as_ref(),
            seed.value.as_ref(),
        ],
        bump = seed.bump,
        close = pool_vault
    )]
    pub seed: Account<'info, Seed>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.pool_vault_bump
    )]
    pub pool_vault: UncheckedAccount<'info>,

    pub redeemer: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(round_index: u16)]
pub struct ClaimReward<'info> {
    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [
            crate::PARTICIPANT_SEED,
            round_index.to_le_bytes().as_ref(),
            claimant.key().as_ref(),
        ],
        bump = participant.bump
    )]
    pub participant: Account<'info, Participant>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.pool_vault_bump
    )]
    pub pool_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(round_index: u16)]
pub struct RoundView<'info> {
    #[account(
        seeds = [crate::ROUND_SEED, round_index.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,
}
