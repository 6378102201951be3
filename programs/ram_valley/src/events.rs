use anchor_lang::prelude::*;

#[event]
pub struct RoundOpened {
    pub index: u16,
    pub opener: Pubkey,
    pub committed_hash: [u8; 32],
    pub start_time: i64,
    pub seed_phase_duration: u32,
    pub redeem_phase_duration: u32,
}

#[event]
pub struct RoundAdvanced {
    pub stale_index: u16,
    pub index: u16,
    pub start_time: i64,
}

#[event]
pub struct SeedContributed {
    pub index: u16,
    pub id: u64,
    pub contributor: Pubkey,
    pub tickets_available: u64,
}

#[event]
pub struct SecretRevealed {
    pub index: u16,
    pub secret: [u8; 32],
    pub reveal_time: i64,
}

#[event]
pub struct TicketRedeemed {
    pub index: u16,
    pub ordinal: u64,
    pub account: Pubkey,
    pub points: u64,
    pub total_score: u64,
    pub resource_released: u64,
    pub pool_credit: u64,
}

#[event]
pub struct RewardClaimed {
    pub index: u16,
    pub account: Pubkey,
    pub reward: u64,
    pub settlement_pool: u64,
}
