use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use ram_valley::engine::{FlatRateMarket, Phase, Tables};
use ram_valley::errors::{ErrorClass, RamValleyError};
use ram_valley::utils::{commitment_hash, score_for_ticket};
use ram_valley::RESOURCE_PER_TICKET;

const SEED_PHASE: u32 = 86_400;
const REDEEM_PHASE: u32 = 259_200;
const LAMPORTS_PER_BYTE: u64 = 6_960;

fn secret() -> [u8; 32] {
    solana_sha256_hasher::hash(b"ram valley round one").to_bytes()
}

fn entropy(tag: &str, n: u64) -> [u8; 32] {
    solana_sha256_hasher::hashv(&[tag.as_bytes(), &n.to_le_bytes()]).to_bytes()
}

fn expect_err<T: std::fmt::Debug>(res: Result<T>, expected: RamValleyError) {
    match res {
        Err(Error::AnchorError(e)) => assert_eq!(e.error_code_number, u32::from(expected)),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

struct Scenario {
    tables: Tables<FlatRateMarket>,
    admin: Pubkey,
    usera: Pubkey,
    userb: Pubkey,
}

fn scenario() -> Scenario {
    let admin = Pubkey::new_unique();
    let mut tables = Tables::new(admin, FlatRateMarket::new(LAMPORTS_PER_BYTE));
    tables
        .open_round(admin, 1, commitment_hash(&secret()), SEED_PHASE, REDEEM_PHASE, 0)
        .unwrap();
    Scenario {
        tables,
        admin,
        usera: Pubkey::new_unique(),
        userb: Pubkey::new_unique(),
    }
}

#[test]
fn round_one_end_to_end() {
    let Scenario {
        mut tables,
        admin,
        usera,
        userb,
    } = scenario();
    let secret = secret();

    assert_eq!(tables.phase(1, 0), Some(Phase::Seeding));
    assert_eq!(tables.participant(1, &admin).unwrap().tickets_available, 1);

    // seeding: usera 24 values, userb 2, one reused value rejected
    for n in 0..24 {
        assert_eq!(tables.contribute_seed(usera, entropy("a", n), 60 + n as i64).unwrap(), 1);
    }
    for n in 0..2 {
        tables.contribute_seed(userb, entropy("b", n), 3_600 + n as i64).unwrap();
    }
    let dup = tables.contribute_seed(userb, entropy("a", 3), 7_200);
    expect_err(dup, RamValleyError::DuplicateSeed);
    assert_eq!(RamValleyError::DuplicateSeed.class(), ErrorClass::Integrity);

    let round = tables.round(1).unwrap();
    assert_eq!(round.tickets_issued(), 27);
    assert_eq!(round.participants, 3);
    assert_eq!(tables.market().bytes_leased, 27 * RESOURCE_PER_TICKET);

    // nothing redeems before the reveal
    expect_err(tables.redeem_ticket(1, usera, 10_000), RamValleyError::NoProof);
    expect_err(
        tables.reveal_secret(1, secret, SEED_PHASE as i64 - 1),
        RamValleyError::SeedPhaseNotOver,
    );
    expect_err(
        tables.reveal_secret(1, entropy("wrong", 0), SEED_PHASE as i64),
        RamValleyError::ProofMismatch,
    );

    let reveal_at = SEED_PHASE as i64 + 30;
    tables.reveal_secret(1, secret, reveal_at).unwrap();
    assert_eq!(tables.phase(1, reveal_at), Some(Phase::Redeeming));
    expect_err(
        tables.reveal_secret(1, secret, reveal_at + 1),
        RamValleyError::AlreadyRevealed,
    );

    // the seed window stays closed once the round is revealed
    let late = tables.contribute_seed(usera, entropy("late", 0), reveal_at + 5);
    expect_err(late, RamValleyError::SeedPhaseOver);
    assert_eq!(RamValleyError::SeedPhaseOver.class(), ErrorClass::Phase);

    // 26 redemptions by the contributors; the opener keeps their ticket
    let mut order = vec![userb, usera, userb];
    order.extend(std::iter::repeat(usera).take(23));
    let seeds: Vec<[u8; 32]> = tables.seeds(1).map(|s| s.value).collect();
    let mut expected_total = 0u64;
    for (ordinal, who) in order.iter().enumerate() {
        let points = tables.redeem_ticket(1, *who, reveal_at + 100 + ordinal as i64).unwrap();
        assert_eq!(points, score_for_ticket(&secret, ordinal as u64, &seeds[ordinal]));
        expected_total += points;
    }
    expect_err(
        tables.redeem_ticket(1, userb, reveal_at + 500),
        RamValleyError::NoTicketsAvailable,
    );
    assert_eq!(RamValleyError::NoTicketsAvailable.class(), ErrorClass::Exhaustion);

    let round = tables.round(1).unwrap();
    assert_eq!(round.tickets_used, 26);
    assert_eq!(round.total_score, expected_total);
    assert_eq!(round.resource_released, 26 * RESOURCE_PER_TICKET);
    let scores: u64 = tables.participants(1).map(|p| p.score).sum();
    assert_eq!(scores, expected_total);

    let pool = tables.pool_balance(1);
    assert_eq!(pool, 26 * RESOURCE_PER_TICKET * LAMPORTS_PER_BYTE);
    assert_eq!(round.pool_credited, pool);
    assert_eq!(tables.market().bytes_outstanding(), RESOURCE_PER_TICKET);
    assert_eq!(tables.participant(1, &admin).unwrap().tickets_remaining(), 1);

    // claims only after the redeem deadline
    let closes = reveal_at + REDEEM_PHASE as i64;
    expect_err(
        tables.claim_reward(1, usera, closes - 1),
        RamValleyError::RedeemPhaseNotOver,
    );
    assert_eq!(tables.phase(1, closes), Some(Phase::Closed));

    let mut paid = 0u64;
    for who in [usera, userb] {
        let score = tables.participant(1, &who).unwrap().score;
        let reward = tables.claim_reward(1, who, closes).unwrap();
        assert_eq!(reward as u128, pool as u128 * score as u128 / expected_total as u128);
        paid += reward;
    }
    expect_err(tables.claim_reward(1, userb, closes + 1), RamValleyError::AlreadyClaimed);
    expect_err(tables.claim_reward(1, admin, closes + 1), RamValleyError::NothingToClaim);
    expect_err(
        tables.claim_reward(1, Pubkey::new_unique(), closes + 1),
        RamValleyError::NotParticipant,
    );

    assert!(paid <= pool);
    assert!(pool - paid < 2);
    assert_eq!(tables.pool_balance(1), pool - paid);
    assert_eq!(tables.round(1).unwrap().claims, 2);
}

#[test]
fn next_round_opens_after_seed_phase() {
    let Scenario {
        mut tables,
        admin,
        usera,
        ..
    } = scenario();
    tables.contribute_seed(usera, entropy("a", 0), 10).unwrap();

    let next_hash = commitment_hash(&entropy("round two", 0));
    expect_err(
        tables.open_round(admin, 2, next_hash, SEED_PHASE, REDEEM_PHASE, 100),
        RamValleyError::PreviousRoundActive,
    );
    expect_err(
        tables.open_round(admin, 3, next_hash, SEED_PHASE, REDEEM_PHASE, SEED_PHASE as i64),
        RamValleyError::RoundOutOfOrder,
    );

    tables.reveal_secret(1, secret(), SEED_PHASE as i64).unwrap();
    tables
        .open_round(admin, 2, next_hash, SEED_PHASE, REDEEM_PHASE, SEED_PHASE as i64 + 1)
        .unwrap();
    assert_eq!(tables.registry().current_index, 2);

    // round one is no longer active, its redemptions are over
    expect_err(
        tables.redeem_ticket(1, usera, SEED_PHASE as i64 + 2),
        RamValleyError::NotActiveRound,
    );
    assert_eq!(
        tables.contribute_seed(usera, entropy("a", 0), SEED_PHASE as i64 + 3).unwrap(),
        2
    );
}

#[test]
fn unrevealed_round_is_carried_forward() {
    let Scenario {
        mut tables,
        admin,
        usera,
        userb,
    } = scenario();
    tables.contribute_seed(usera, entropy("a", 0), 10).unwrap();

    let late = SEED_PHASE as i64 + 10;
    assert_eq!(tables.phase(1, late), Some(Phase::AwaitingReveal));
    assert_eq!(tables.contribute_seed(userb, entropy("b", 0), late).unwrap(), 2);

    let r2 = tables.round(2).unwrap();
    assert_eq!(r2.opener, admin);
    assert_eq!(r2.committed_hash, commitment_hash(&secret()));
    assert_eq!(r2.seed_phase_duration, SEED_PHASE);
    assert_eq!(r2.redeem_phase_duration, REDEEM_PHASE);
    assert_eq!(r2.tickets_issued(), 2);

    // the carried commitment still opens round two
    tables.reveal_secret(2, secret(), late + SEED_PHASE as i64).unwrap();
    assert!(tables.round(2).unwrap().is_revealed());
    assert!(!tables.round(1).unwrap().is_revealed());
    assert!(tables.participant(1, &userb).is_none());
}
