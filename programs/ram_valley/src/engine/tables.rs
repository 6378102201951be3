//! In-memory executor over ordered tables.
//!
//! Mirrors the program's account layout with `BTreeMap`s keyed the same way
//! the PDAs are (`round`, `(round, account)`, `(round, id)`), so iteration is
//! deterministic. Each action works on copies of the rows it touches, and on
//! a staged copy of the market, and writes them back only after every step
//! succeeded.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::{NO_ROUND, RESOURCE_PER_TICKET};
use crate::engine::registry::{self, RoundParams};
use crate::engine::settlement::{self, ResourceMarket};
use crate::engine::{commitment, entropy, phase, scoring};
use crate::errors::RamValleyError;
use crate::state::{Participant, Round, RoundRegistry, Seed};

pub struct Tables<M: ResourceMarket> {
    market: M,
    registry: RoundRegistry,
    rounds: BTreeMap<u16, Round>,
    participants: BTreeMap<(u16, Pubkey), Participant>,
    seeds: BTreeMap<(u16, u64), Seed>,
    seed_ids: BTreeMap<(u16, [u8; 32]), u64>,
    pools: BTreeMap<u16, u64>,
}

impl<M: ResourceMarket + Clone> Tables<M> {
    pub fn new(admin: Pubkey, market: M) -> Self {
        Self {
            market,
            registry: RoundRegistry {
                admin,
                current_index: NO_ROUND,
                ..Default::default()
            },
            rounds: BTreeMap::new(),
            participants: BTreeMap::new(),
            seeds: BTreeMap::new(),
            seed_ids: BTreeMap::new(),
            pools: BTreeMap::new(),
        }
    }

    // ----------------------------
    // Lookups
    // ----------------------------
    pub fn market(&self) -> &M {
        &self.market
    }

    pub fn registry(&self) -> &RoundRegistry {
        &self.registry
    }

    pub fn round(&self, index: u16) -> Option<&Round> {
        self.rounds.get(&index)
    }

    pub fn active_round(&self) -> Option<&Round> {
        self.rounds.get(&self.registry.current_index)
    }

    pub fn participant(&self, index: u16, account: &Pubkey) -> Option<&Participant> {
        self.participants.get(&(index, *account))
    }

    /// Participants of a round, ordered by account.
    pub fn participants(&self, index: u16) -> impl Iterator<Item = &Participant> {
        self.participants
            .range((index, Pubkey::default())..)
            .take_while(move |((round, _), _)| *round == index)
            .map(|(_, p)| p)
    }

    /// Seeds of a round, ordered by id.
    pub fn seeds(&self, index: u16) -> impl Iterator<Item = &Seed> {
        self.seeds.range((index, 0)..=(index, u64::MAX)).map(|(_, s)| s)
    }

    pub fn pool_balance(&self, index: u16) -> u64 {
        self.pools.get(&index).copied().unwrap_or(0)
    }

    pub fn phase(&self, index: u16, now: i64) -> Option<phase::Phase> {
        self.round(index).map(|r| phase::phase_of(r, now))
    }

    // ----------------------------
    // Actions
    // ----------------------------
    pub fn open_round(
        &mut self,
        opener: Pubkey,
        index: u16,
        committed_hash: [u8; 32],
        seed_phase_duration: u32,
        redeem_phase_duration: u32,
        now: i64,
    ) -> Result<()> {
        require_keys_eq!(opener, self.registry.admin, RamValleyError::Unauthorized);
        require!(!self.rounds.contains_key(&index), RamValleyError::RoundOutOfOrder);

        let mut registry = self.registry.clone();
        let mut round = Round::default();
        let params = RoundParams {
            index,
            opener,
            committed_hash,
            seed_phase_duration,
            redeem_phase_duration,
        };
        registry::open_round(&mut registry, self.active_round(), &mut round, params, now)?;

        let mut opening = Opening::new(registry, round);
        opening.enroll(now)?;
        let mut market = self.market.clone();
        market.lease(&opener, RESOURCE_PER_TICKET)?;

        self.market = market;
        self.commit_opening(opening);
        Ok(())
    }

    /// Contribute entropy to the active round.
    ///
    /// When the active round's seed phase is over and it was never revealed,
    /// the next round is opened first and the seed lands there. Returns the
    /// index of the round that received the seed.
    pub fn contribute_seed(&mut self, account: Pubkey, value: [u8; 32], now: i64) -> Result<u16> {
        let active = self.active_round().cloned().ok_or(RamValleyError::NoActiveRound)?;

        let mut opening = None;
        let mut round = active;
        if phase::phase_of(&round, now) == phase::Phase::AwaitingReveal {
            let mut registry = self.registry.clone();
            let mut next = Round::default();
            registry::advance_stale_round(&mut registry, &round, &mut next, now)?;
            let mut o = Opening::new(registry, next);
            o.enroll(now)?;
            round = o.round.clone();
            opening = Some(o);
        }

        let index = round.index;
        if self.seed_ids.contains_key(&(index, value))
            || opening.as_ref().is_some_and(|o| o.seed.value == value)
        {
            return err!(RamValleyError::DuplicateSeed);
        }

        let mut participant = match opening.as_ref() {
            Some(o) if o.participant.account == account => o.participant.clone(),
            _ => self.participant(index, &account).cloned().unwrap_or_default(),
        };
        let mut seed = Seed::default();
        entropy::contribute(&mut round, &mut participant, &mut seed, account, value, now)?;

        let mut market = self.market.clone();
        if opening.is_some() {
            market.lease(&round.opener, RESOURCE_PER_TICKET)?;
        }
        market.lease(&account, RESOURCE_PER_TICKET)?;

        self.market = market;

        if let Some(mut o) = opening {
            // the contributor's rows supersede the opener's copies
            o.round = round.clone();
            if o.participant.account == account {
                o.participant = participant.clone();
            }
            self.commit_opening(o);
        }
        self.seed_ids.insert((index, value), seed.id);
        self.seeds.insert((index, seed.id), seed);
        self.participants.insert((index, account), participant);
        self.rounds.insert(index, round);
        Ok(index)
    }

    pub fn reveal_secret(&mut self, index: u16, secret: [u8; 32], now: i64) -> Result<()> {
        let mut round = self.round(index).cloned().ok_or(RamValleyError::NoActiveRound)?;
        registry::require_active(&self.registry, &round)?;
        commitment::reveal(&mut round, secret, now)?;
        self.rounds.insert(index, round);
        Ok(())
    }

    /// Redeem one ticket of `account`; returns the score it added.
    pub fn redeem_ticket(&mut self, index: u16, account: Pubkey, now: i64) -> Result<u64> {
        let mut round = self.round(index).cloned().ok_or(RamValleyError::NoActiveRound)?;
        registry::require_active(&self.registry, &round)?;
        require!(round.is_revealed(), RamValleyError::NoProof);

        let mut participant = self
            .participant(index, &account)
            .cloned()
            .ok_or(RamValleyError::NotParticipant)?;
        let seed = self
            .seeds
            .get(&(index, round.tickets_used))
            .cloned()
            .unwrap_or_default();

        let points = scoring::redeem_ticket(&mut round, &mut participant, &seed, now)?;
        let mut market = self.market.clone();
        let credit = market.release(RESOURCE_PER_TICKET)?;
        settlement::credit_release(&mut round, credit)?;
        let pool = self
            .pool_balance(index)
            .checked_add(credit)
            .ok_or(RamValleyError::MathOverflow)?;

        self.market = market;
        self.pools.insert(index, pool);
        self.participants.insert((index, account), participant);
        self.rounds.insert(index, round);
        Ok(points)
    }

    /// Pay out `account`'s share of the round pool; returns the amount paid.
    pub fn claim_reward(&mut self, index: u16, account: Pubkey, now: i64) -> Result<u64> {
        let mut round = self.round(index).cloned().ok_or(RamValleyError::NoActiveRound)?;
        let mut participant = self
            .participant(index, &account)
            .cloned()
            .ok_or(RamValleyError::NotParticipant)?;

        let balance = self.pool_balance(index);
        let reward = settlement::claim_reward(&mut round, &mut participant, balance, now)?;
        let remaining = balance
            .checked_sub(reward)
            .ok_or(RamValleyError::InsufficientPool)?;

        self.pools.insert(index, remaining);
        self.participants.insert((index, account), participant);
        self.rounds.insert(index, round);
        Ok(reward)
    }

    fn commit_opening(&mut self, o: Opening) {
        let index = o.round.index;
        self.registry = o.registry;
        self.seed_ids.insert((index, o.seed.value), o.seed.id);
        self.seeds.insert((index, o.seed.id), o.seed);
        self.participants.insert((index, o.participant.account), o.participant);
        self.rounds.insert(index, o.round);
        self.pools.entry(index).or_insert(0);
    }
}

/// Rows written when a round opens, held until the action commits.
struct Opening {
    registry: RoundRegistry,
    round: Round,
    participant: Participant,
    seed: Seed,
}

impl Opening {
    fn new(registry: RoundRegistry, round: Round) -> Self {
        Self {
            registry,
            round,
            participant: Participant::default(),
            seed: Seed::default(),
        }
    }

    fn enroll(&mut self, now: i64) -> Result<()> {
        entropy::enroll_opener(&mut self.round, &mut self.participant, &mut self.seed, now)
    }
}
