use anchor_lang::prelude::*;

use crate::utils::ZERO_DIGEST;

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,
    pub paused: bool,
    pub version: u16,
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct RoundRegistry {
    pub admin: Pubkey,
    pub bump: u8,

    /// Index of the active round. `NO_ROUND` until the first round opens.
    pub current_index: u16,

    pub version: u16,
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Round {
    pub index: u16,
    pub bump: u8,

    /// Account auto-enrolled at open; carried over by a forced advance.
    pub opener: Pubkey,

    // System-owned PDA vault collecting released rent
    pub pool_vault: Pubkey,
    pub pool_vault_bump: u8,

    pub start_time: i64,
    pub seed_phase_duration: u32,
    pub redeem_phase_duration: u32,

    pub committed_hash: [u8; 32],
    /// `ZERO_DIGEST` until revealed.
    pub revealed_secret: [u8; 32],
    pub reveal_time: i64,

    // ===== tickets / scoring =====
    /// Id handed to the next seed; equals the number of tickets issued.
    pub next_seed_id: u64,
    pub participants: u64,
    pub tickets_used: u64,
    pub total_score: u64,
    pub resource_released: u64,

    // ===== settlement =====
    pub pool_credited: u64,
    pub settlement_started: bool,
    pub settlement_pool: u64,
    pub rewards_paid: u64,
    pub claims: u64,

    pub version: u16,
}

impl Round {
    pub fn is_revealed(&self) -> bool {
        self.revealed_secret != ZERO_DIGEST
    }

    pub fn seed_deadline(&self) -> i64 {
        self.start_time.saturating_add(self.seed_phase_duration as i64)
    }

    /// `None` until the secret is revealed.
    pub fn redeem_deadline(&self) -> Option<i64> {
        self.is_revealed()
            .then(|| self.reveal_time.saturating_add(self.redeem_phase_duration as i64))
    }

    pub fn tickets_issued(&self) -> u64 {
        self.next_seed_id
    }
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Participant {
    /// 0 while the row is vacant (rounds start at 1).
    pub round_index: u16,
    pub account: Pubkey,
    pub bump: u8,

    /// Tickets granted so far, one per accepted seed.
    pub tickets_available: u64,
    pub tickets_used: u64,
    pub score: u64,

    pub claimed: bool,
    pub reward: u64,

    pub joined_at: i64,
}

impl Participant {
    pub fn is_enrolled(&self) -> bool {
        self.round_index != 0
    }

    pub fn tickets_remaining(&self) -> u64 {
        self.tickets_available.saturating_sub(self.tickets_used)
    }
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Seed {
    /// 0 while the row is vacant.
    pub round_index: u16,
    pub id: u64,
    pub bump: u8,

    pub contributor: Pubkey,
    pub value: [u8; 32],

    pub created_at: i64,
}

impl Seed {
    pub fn is_vacant(&self) -> bool {
        self.round_index == 0
    }
}

// seed accounts are sized to the leased resource
const _: () = assert!(8 + Seed::INIT_SPACE <= crate::constants::RESOURCE_PER_TICKET as usize);
