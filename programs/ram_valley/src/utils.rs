use solana_sha256_hasher::{hash, hashv};

use crate::constants::{MAX_TICKET_SCORE, MIN_TICKET_SCORE};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const ROUND_REGISTRY_SEED: &[u8] = b"round_registry_v1";
pub const ROUND_SEED: &[u8] = b"round_v1";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault_v1";
pub const PARTICIPANT_SEED: &[u8] = b"participant_v1";
pub const SEED_SEED: &[u8] = b"seed_v1";

/// Sentinel for "not revealed yet" and for "no commitment".
pub const ZERO_DIGEST: [u8; 32] = [0u8; 32];

// -------------------------
// Commitment hash
// -------------------------
/// Digest an opener publishes before the round; the reveal must hash to it.
pub fn commitment_hash(secret: &[u8; 32]) -> [u8; 32] {
    hash(secret.as_ref()).to_bytes()
}

// -------------------------
// Ticket score draw
// -------------------------
/// Score added by the ticket consumed at `ordinal` (0-based, round-wide).
///
/// Depends only on the revealed secret, the consumption ordinal and the seed
/// stored under that ordinal, so anyone can replay the whole score stream
/// once the secret is public.
pub fn score_for_ticket(secret: &[u8; 32], ordinal: u64, seed_value: &[u8; 32]) -> u64 {
    let h = hashv(&[
        b"score".as_ref(),
        secret.as_ref(),
        ordinal.to_le_bytes().as_ref(),
        seed_value.as_ref(),
    ])
    .to_bytes();

    let mut head = [0u8; 8];
    head.copy_from_slice(&h[..8]);
    let span = MAX_TICKET_SCORE - MIN_TICKET_SCORE + 1;
    u64::from_le_bytes(head) % span + MIN_TICKET_SCORE
}

// -------------------------
// Proportional share
// -------------------------
/// `floor(pool * score / total)`; the remainder stays with the pool.
pub fn proportional_share(pool: u64, score: u64, total: u64) -> Option<u64> {
    if total == 0 || score > total {
        return None;
    }
    let share = (pool as u128)
        .checked_mul(score as u128)?
        .checked_div(total as u128)?;
    u64::try_from(share).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_is_plain_sha256_of_secret() {
        let secret = hash(b"test").to_bytes();
        let expected = hashv(&[secret.as_ref()]).to_bytes();
        assert_eq!(commitment_hash(&secret), expected);
        assert_ne!(commitment_hash(&secret), secret);
    }

    #[test]
    fn score_draw_stays_in_bounds_and_is_deterministic() {
        let secret = [7u8; 32];
        for ordinal in 0..256u64 {
            let mut value = [0u8; 32];
            value[..8].copy_from_slice(&ordinal.to_le_bytes());
            let s = score_for_ticket(&secret, ordinal, &value);
            assert!((MIN_TICKET_SCORE..=MAX_TICKET_SCORE).contains(&s));
            assert_eq!(s, score_for_ticket(&secret, ordinal, &value));
        }
    }

    #[test]
    fn score_draw_depends_on_ordinal_and_secret() {
        let value = [3u8; 32];
        let a: Vec<u64> = (0..32).map(|i| score_for_ticket(&[1u8; 32], i, &value)).collect();
        let b: Vec<u64> = (0..32).map(|i| score_for_ticket(&[2u8; 32], i, &value)).collect();
        assert_ne!(a, b);
        assert!(a.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn proportional_share_floors() {
        assert_eq!(proportional_share(100, 1, 3), Some(33));
        assert_eq!(proportional_share(100, 2, 3), Some(66));
        assert_eq!(proportional_share(u64::MAX, u64::MAX, u64::MAX), Some(u64::MAX));
        assert_eq!(proportional_share(100, 1, 0), None);
        assert_eq!(proportional_share(100, 4, 3), None);
    }
}
