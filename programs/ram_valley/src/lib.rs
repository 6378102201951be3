use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("4S3U6vHpqrd4m2ZHdRdCPjRr7y4Y73YT7ky6BVFKZHdR");

#[program]
pub mod ram_valley {
    use super::*;
    use crate::instructions::{admin, redeem, reveal, reward, round, seed};

    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        admin::initialize_config(ctx)
    }

    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn initialize_round_registry(ctx: Context<InitializeRoundRegistry>) -> Result<()> {
        admin::initialize_round_registry(ctx)
    }

    // ----------------------------
    // Round lifecycle
    // ----------------------------
    pub fn open_round(
        ctx: Context<OpenRound>,
        index: u16,
        committed_hash: [u8; 32],
        seed_phase_duration: u32,
        redeem_phase_duration: u32,
    ) -> Result<()> {
        round::open_round(
            ctx,
            index,
            committed_hash,
            seed_phase_duration,
            redeem_phase_duration,
        )
    }

    /// Opens `next_index` with the stale round's opener and commitment when
    /// the stale round's seed phase ended without a reveal.
    pub fn advance_round(ctx: Context<AdvanceRound>, next_index: u16) -> Result<()> {
        round::advance_round(ctx, next_index)
    }

    pub fn contribute_seed(ctx: Context<ContributeSeed>, value: [u8; 32]) -> Result<()> {
        seed::contribute_seed(ctx, value)
    }

    pub fn reveal_secret(ctx: Context<RevealSecret>, secret: [u8; 32], round_index: u16) -> Result<()> {
        reveal::reveal_secret(ctx, secret, round_index)
    }

    pub fn redeem_ticket(ctx: Context<RedeemTicket>, round_index: u16) -> Result<()> {
        redeem::redeem_ticket(ctx, round_index)
    }

    pub fn claim_reward(ctx: Context<ClaimReward>, round_index: u16) -> Result<()> {
        reward::claim_reward(ctx, round_index)
    }

    // ----------------------------
    // Views
    // ----------------------------
    pub fn seed_time(ctx: Context<RoundView>, round_index: u16) -> Result<i64> {
        round::seed_time(ctx, round_index)
    }

    pub fn redeem_time(ctx: Context<RoundView>, round_index: u16) -> Result<i64> {
        round::redeem_time(ctx, round_index)
    }
}
