// Centralized Protocol Constants

// Resource accounting
// ===================

/// Bytes of ledger storage leased for every seed record, and released again
/// when the ticket with the same ordinal is redeemed.
/// Seed accounts are allocated with exactly this many bytes.
pub const RESOURCE_PER_TICKET: u64 = 312;

// Scoring
// =======

/// Lowest score a single redeemed ticket can add.
pub const MIN_TICKET_SCORE: u64 = 1;

/// Highest score a single redeemed ticket can add.
pub const MAX_TICKET_SCORE: u64 = 10_000;

// Phase windows (seconds)
// =======================

/// Shortest seed or redeem phase accepted by `open_round`.
pub const MIN_PHASE_DURATION_SECS: u32 = 60;

/// Longest seed or redeem phase accepted by `open_round` (30 days).
pub const MAX_PHASE_DURATION_SECS: u32 = 30 * 24 * 60 * 60;

// Versions / registry
// ===================

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// Registry index before any round was opened.
pub const NO_ROUND: u16 = 0;
