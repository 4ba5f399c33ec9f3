use crate::config::{ContestConfig, ContestPhase};
use crate::eligibility::{EligibilityCache, EligibilityOracle};
use crate::registry::ProposalRegistry;
use crate::types::{ProposalTally, VoteRecord, VoteSupport};
use crate::{ContestError, Result};
use agora_types::{Address, ContestClock, Hash};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct VotingState {
    records: HashMap<(Hash, Address), VoteRecord>,
    tallies: HashMap<Hash, ProposalTally>,
}

/// Voting engine
///
/// Enforces the voting window and eligibility caps, applies the linear
/// decay weighting, and keeps per-proposal tallies consistent with the
/// per-voter records at all times: a recast subtracts the voter's previous
/// applied weight and re-applies the whole commitment at the current decay
/// factor.
pub struct VotingEngine {
    config: Arc<ContestConfig>,
    clock: Arc<dyn ContestClock>,
    oracle: Arc<dyn EligibilityOracle>,
    eligibility: EligibilityCache,
    registry: Arc<ProposalRegistry>,
    state: Arc<RwLock<VotingState>>,
}

impl VotingEngine {
    pub fn new(
        config: Arc<ContestConfig>,
        clock: Arc<dyn ContestClock>,
        oracle: Arc<dyn EligibilityOracle>,
        eligibility: EligibilityCache,
        registry: Arc<ProposalRegistry>,
    ) -> Self {
        Self {
            config,
            clock,
            oracle,
            eligibility,
            registry,
            state: Arc::new(RwLock::new(VotingState::default())),
        }
    }

    /// Cast (or extend) a vote with an eligibility proof
    ///
    /// Returns the proposal's current `for_votes` total after this vote.
    pub async fn cast_vote(
        &self,
        caller: Address,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
        proof: &[u8],
    ) -> Result<u128> {
        self.check_preconditions(proposal_id, support, num_votes)
            .await?;
        let cap = self
            .eligibility
            .verify_and_cache(self.oracle.as_ref(), caller, proof)
            .await?;
        self.apply(caller, proposal_id, support, num_votes, cap)
            .await
    }

    /// Cast (or extend) a vote reusing a cached eligibility verification
    pub async fn cast_vote_without_proof(
        &self,
        caller: Address,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
    ) -> Result<u128> {
        self.check_preconditions(proposal_id, support, num_votes)
            .await?;
        let cap = self.eligibility.cached_cap(caller).await?;
        self.apply(caller, proposal_id, support, num_votes, cap)
            .await
    }

    async fn check_preconditions(
        &self,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
    ) -> Result<()> {
        let now = self.clock.now();
        if self.config.phase(now) != ContestPhase::Voting {
            return Err(ContestError::NotInVotingWindow);
        }
        if num_votes == 0 {
            return Err(ContestError::ZeroAmount);
        }
        if support == VoteSupport::Against && !self.config.allow_downvoting {
            return Err(ContestError::DownvotingDisabled);
        }
        if !self.registry.exists(&proposal_id).await {
            return Err(ContestError::UnknownProposal(hex::encode(
                &proposal_id[..8],
            )));
        }
        Ok(())
    }

    async fn apply(
        &self,
        caller: Address,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
        cap: u64,
    ) -> Result<u128> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let previous = state.records.get(&(proposal_id, caller)).copied();
        if let Some(record) = previous {
            if record.support != support {
                return Err(ContestError::VoteDirectionMismatch(caller.to_string()));
            }
        }

        let prev_raw = previous.map(|r| r.raw_votes).unwrap_or(0);
        let prev_applied = previous.map(|r| r.applied_weight).unwrap_or(0);

        let new_raw = prev_raw
            .checked_add(num_votes)
            .ok_or(ContestError::Overflow("raw vote accumulation"))?;
        if new_raw > cap {
            return Err(ContestError::Unauthorized(format!(
                "committed weight {} exceeds cap {} for {}",
                new_raw, cap, caller
            )));
        }

        // Re-scale the voter's entire commitment at the current decay
        // factor: subtract the previously applied weight, apply the new one.
        let applied = self.decayed_weight(new_raw, now);

        let tally = state.tallies.entry(proposal_id).or_default();
        let side = match support {
            VoteSupport::For => &mut tally.for_votes,
            VoteSupport::Against => &mut tally.against_votes,
        };
        *side = side
            .checked_sub(prev_applied)
            .and_then(|t| t.checked_add(applied))
            .ok_or(ContestError::Overflow("tally adjustment"))?;
        let for_votes = tally.for_votes;

        state.records.insert(
            (proposal_id, caller),
            VoteRecord {
                support,
                raw_votes: new_raw,
                applied_weight: applied,
                last_cast_at: now,
            },
        );
        drop(state);

        crate::metrics::VOTES_CAST
            .with_label_values(&[support.as_str()])
            .inc();
        crate::metrics::VOTE_WEIGHT.observe(applied as f64);

        info!(
            proposal_id = hex::encode(&proposal_id[..8]),
            voter = %caller,
            support = support.as_str(),
            raw_votes = new_raw,
            applied_weight = applied,
            for_votes,
            "🗳️ Vote cast"
        );

        Ok(for_votes)
    }

    /// Decay-weighted value of a raw commitment cast at `now`
    ///
    /// With linear decay, `raw * (vote_end - now) / voting_period` using
    /// floor division; a vote at the opening second carries full weight and
    /// any instant at or past the window end weighs zero. Without decay the
    /// raw commitment counts unchanged.
    pub fn decayed_weight(&self, raw: u64, now: i64) -> u128 {
        if !self.config.use_linear_vote_decay {
            return raw as u128;
        }
        let remaining = self.config.vote_end().saturating_sub(now);
        (raw as u128) * (remaining as u128) / (self.config.voting_period as u128)
    }

    /// Current tally for a proposal (zero if never voted on)
    pub async fn tally(&self, proposal_id: &Hash) -> ProposalTally {
        let state = self.state.read().await;
        state
            .tallies
            .get(proposal_id)
            .copied()
            .unwrap_or_default()
    }

    /// A voter's record on a proposal
    pub async fn vote_record(&self, proposal_id: &Hash, voter: &Address) -> Option<VoteRecord> {
        let state = self.state.read().await;
        state.records.get(&(*proposal_id, *voter)).copied()
    }
}
