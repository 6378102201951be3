use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::engine::settlement;
use crate::errors::RamValleyError;
use crate::events::RewardClaimed;
use crate::ClaimReward;

pub fn claim_reward(ctx: Context<ClaimReward>, _round_index: u16) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claimant = ctx.accounts.claimant.key();

    // the vault's own rent floor is never part of the pool
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.pool_vault.lamports();
    let pool_balance = settlement::vault_pool_balance(vault_lamports, rent_floor);

    let round = &mut ctx.accounts.round;
    settlement::require_pool_vault(round, &ctx.accounts.pool_vault.key())?;
    let participant = &mut ctx.accounts.participant;
    require_keys_eq!(participant.account, claimant, RamValleyError::NotParticipant);

    let reward = settlement::claim_reward(round, participant, pool_balance, now)?;
    require!(reward <= pool_balance, RamValleyError::InsufficientPool);

    let round_le = round.index.to_le_bytes();
    let vault_bump = round.pool_vault_bump;
    let settlement_pool = round.settlement_pool;
    let index = round.index;

    if reward > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_VAULT_SEED, &round_le, &[vault_bump]]];

        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.claimant.to_account_info(),
                },
                signer_seeds,
            ),
            reward,
        )?;
    }

    msg!("Round {} claim: {} lamports to {}", index, reward, claimant);
    emit!(RewardClaimed {
        index,
        account: claimant,
        reward,
        settlement_pool,
    });

    Ok(())
}
