use anchor_lang::prelude::*;

use crate::errors::RamValleyError;
use crate::state::{Participant, Round};
use crate::utils::proportional_share;

/// Host service that leases storage for seed rows and buys it back.
///
/// On-chain this is the rent mechanism itself (a seed account is created with
/// rent paid by its contributor and closed into the round's pool vault). The
/// in-memory executor takes an explicit implementation.
pub trait ResourceMarket {
    /// Lease `bytes` of storage paid for by `payer`.
    fn lease(&mut self, payer: &Pubkey, bytes: u64) -> Result<()>;

    /// Release `bytes` of storage; returns the funds credited to the pool.
    fn release(&mut self, bytes: u64) -> Result<u64>;
}

/// Market with a fixed price per byte in both directions.
#[derive(Debug, Clone, Default)]
pub struct FlatRateMarket {
    pub price_per_byte: u64,
    pub bytes_leased: u64,
    pub bytes_released: u64,
}

impl FlatRateMarket {
    pub fn new(price_per_byte: u64) -> Self {
        Self {
            price_per_byte,
            ..Default::default()
        }
    }

    pub fn bytes_outstanding(&self) -> u64 {
        self.bytes_leased.saturating_sub(self.bytes_released)
    }
}

impl ResourceMarket for FlatRateMarket {
    fn lease(&mut self, _payer: &Pubkey, bytes: u64) -> Result<()> {
        self.bytes_leased = self
            .bytes_leased
            .checked_add(bytes)
            .ok_or(RamValleyError::MathOverflow)?;
        Ok(())
    }

    fn release(&mut self, bytes: u64) -> Result<u64> {
        require!(self.bytes_outstanding() >= bytes, RamValleyError::InsufficientPool);
        self.bytes_released += bytes;
        let credit = bytes
            .checked_mul(self.price_per_byte)
            .ok_or(RamValleyError::MathOverflow)?;
        Ok(credit)
    }
}

/// Record funds produced by releasing one ticket's resource.
pub fn credit_release(round: &mut Round, amount: u64) -> Result<()> {
    round.pool_credited = round
        .pool_credited
        .checked_add(amount)
        .ok_or(RamValleyError::MathOverflow)?;
    Ok(())
}

/// Credit the rent of a seed row closed into the pool vault.
pub fn credit_closed_seed(round: &mut Round, seed_lamports: u64) -> Result<u64> {
    require!(seed_lamports > 0, RamValleyError::InsufficientPool);
    credit_release(round, seed_lamports)?;
    Ok(seed_lamports)
}

/// Funds a pool vault can pay out; its own rent floor stays behind.
pub fn vault_pool_balance(vault_lamports: u64, rent_floor: u64) -> u64 {
    vault_lamports.saturating_sub(rent_floor)
}

pub fn require_pool_vault(round: &Round, vault: &Pubkey) -> Result<()> {
    require_keys_eq!(round.pool_vault, *vault, RamValleyError::PoolVaultMismatch);
    Ok(())
}

/// Settle `participant`'s share of the round pool.
///
/// `pool_balance` is what the pool holds right now; the first claim of the
/// round freezes it as `settlement_pool` and every claim is computed against
/// that snapshot, so later claims are not diluted by earlier payouts.
/// Shares are floored; the remainder stays in the pool.
pub fn claim_reward(
    round: &mut Round,
    participant: &mut Participant,
    pool_balance: u64,
    now: i64,
) -> Result<u64> {
    let deadline = round.redeem_deadline().ok_or(RamValleyError::NoProof)?;
    require!(now >= deadline, RamValleyError::RedeemPhaseNotOver);

    require!(
        participant.is_enrolled() && participant.round_index == round.index,
        RamValleyError::NotParticipant
    );
    require!(!participant.claimed, RamValleyError::AlreadyClaimed);
    require!(
        round.total_score > 0 && participant.score > 0,
        RamValleyError::NothingToClaim
    );

    if !round.settlement_started {
        round.settlement_started = true;
        round.settlement_pool = pool_balance;
    }

    let reward = proportional_share(round.settlement_pool, participant.score, round.total_score)
        .ok_or(RamValleyError::MathOverflow)?;
    let paid = round
        .rewards_paid
        .checked_add(reward)
        .ok_or(RamValleyError::MathOverflow)?;
    require!(paid <= round.settlement_pool, RamValleyError::InsufficientPool);

    participant.claimed = true;
    participant.reward = reward;
    round.rewards_paid = paid;
    round.claims = round.claims.checked_add(1).ok_or(RamValleyError::MathOverflow)?;

    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::assert_err;

    fn settled_round(total_score: u64) -> Round {
        Round {
            index: 1,
            seed_phase_duration: 10,
            redeem_phase_duration: 10,
            committed_hash: [1u8; 32],
            revealed_secret: [2u8; 32],
            reveal_time: 10,
            total_score,
            ..Default::default()
        }
    }

    fn scorer(score: u64) -> Participant {
        Participant {
            round_index: 1,
            account: Pubkey::new_unique(),
            tickets_available: 1,
            tickets_used: 1,
            score,
            ..Default::default()
        }
    }

    #[test]
    fn claims_split_a_frozen_pool_with_floor() {
        let mut r = settled_round(3);
        let mut a = scorer(1);
        let mut b = scorer(2);

        let ra = claim_reward(&mut r, &mut a, 1_000, 20).unwrap();
        // balance passed on the second claim is ignored
        let rb = claim_reward(&mut r, &mut b, 1_000 - ra, 21).unwrap();

        assert_eq!(ra, 333);
        assert_eq!(rb, 666);
        assert_eq!(r.settlement_pool, 1_000);
        assert_eq!(r.rewards_paid, 999);
        assert_eq!(r.claims, 2);
        assert!(a.claimed && b.claimed);
    }

    #[test]
    fn claim_waits_for_redeem_deadline() {
        let mut r = settled_round(5);
        let mut a = scorer(5);
        assert_err(claim_reward(&mut r, &mut a, 10, 19), RamValleyError::RedeemPhaseNotOver);
        assert!(!r.settlement_started);
    }

    #[test]
    fn claim_needs_a_reveal() {
        let mut r = settled_round(5);
        r.revealed_secret = [0u8; 32];
        let mut a = scorer(5);
        assert_err(claim_reward(&mut r, &mut a, 10, 1_000), RamValleyError::NoProof);
    }

    #[test]
    fn double_claim_is_rejected() {
        let mut r = settled_round(5);
        let mut a = scorer(5);
        assert_eq!(claim_reward(&mut r, &mut a, 10, 20).unwrap(), 10);
        assert_err(claim_reward(&mut r, &mut a, 10, 21), RamValleyError::AlreadyClaimed);
        assert_eq!(r.rewards_paid, 10);
    }

    #[test]
    fn zero_total_score_is_nothing_to_claim() {
        let mut r = settled_round(0);
        let mut a = scorer(0);
        assert_err(claim_reward(&mut r, &mut a, 10, 20), RamValleyError::NothingToClaim);
        assert!(!a.claimed);
    }

    #[test]
    fn closed_seed_rent_accumulates_in_the_pool() {
        let mut r = settled_round(0);
        assert_eq!(credit_closed_seed(&mut r, 3_062_400).unwrap(), 3_062_400);
        credit_closed_seed(&mut r, 3_062_400).unwrap();
        assert_eq!(r.pool_credited, 6_124_800);
        assert_err(credit_closed_seed(&mut r, 0), RamValleyError::InsufficientPool);
        assert_eq!(r.pool_credited, 6_124_800);
    }

    #[test]
    fn vault_rent_floor_is_not_paid_out() {
        let floor = 890_880;
        assert_eq!(vault_pool_balance(floor + 10_000, floor), 10_000);
        assert_eq!(vault_pool_balance(floor, floor), 0);
        assert_eq!(vault_pool_balance(floor - 1, floor), 0);

        let mut r = settled_round(2);
        let mut a = scorer(1);
        let pool = vault_pool_balance(floor + 1_001, floor);
        assert_eq!(claim_reward(&mut r, &mut a, pool, 20).unwrap(), 500);
        assert_eq!(r.settlement_pool, 1_001);
    }

    #[test]
    fn foreign_vault_is_rejected() {
        let mut r = settled_round(1);
        let vault = Pubkey::new_unique();
        r.pool_vault = vault;
        require_pool_vault(&r, &vault).unwrap();
        assert_err(
            require_pool_vault(&r, &Pubkey::new_unique()),
            RamValleyError::PoolVaultMismatch,
        );
    }

    #[test]
    fn flat_rate_market_credits_released_bytes() {
        let mut m = FlatRateMarket::new(3);
        let payer = Pubkey::new_unique();
        m.lease(&payer, 312).unwrap();
        assert_eq!(m.release(312).unwrap(), 936);
        assert_err(m.release(1), RamValleyError::InsufficientPool);
    }
}
