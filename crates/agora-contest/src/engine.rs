use crate::config::{ContestConfig, ContestPhase};
use crate::eligibility::{EligibilityCache, EligibilityOracle};
use crate::ranking::RankingResolver;
use crate::registry::ProposalRegistry;
use crate::types::{Proposal, ProposalContent, ProposalTally, VoteSupport};
use crate::voting::VotingEngine;
use crate::Result;
use agora_types::{Address, ContestClock, Hash};
use std::sync::Arc;

/// One complete contest
///
/// A single governance state object composed of explicitly wired policy
/// modules: the proposal registry (submission policy), the voting engine
/// (counting policy), the ranking resolver, and the shared clock. Callers
/// and downstream components interact with this facade; the reward ledger
/// holds it read-only.
pub struct ContestEngine {
    config: Arc<ContestConfig>,
    clock: Arc<dyn ContestClock>,
    registry: Arc<ProposalRegistry>,
    voting: Arc<VotingEngine>,
    ranking: RankingResolver,
}

impl ContestEngine {
    /// Build a contest from its immutable configuration
    ///
    /// Fails with `InvalidConfig` on a degenerate parameter vector.
    pub fn new(
        config: ContestConfig,
        oracle: Arc<dyn EligibilityOracle>,
        clock: Arc<dyn ContestClock>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let eligibility = EligibilityCache::new();

        let registry = Arc::new(ProposalRegistry::new(
            config.clone(),
            clock.clone(),
            oracle.clone(),
            eligibility.clone(),
        ));
        let voting = Arc::new(VotingEngine::new(
            config.clone(),
            clock.clone(),
            oracle,
            eligibility,
            registry.clone(),
        ));
        let ranking = RankingResolver::new(
            config.clone(),
            clock.clone(),
            registry.clone(),
            voting.clone(),
        );

        Ok(Self {
            config,
            clock,
            registry,
            voting,
            ranking,
        })
    }

    pub fn config(&self) -> &ContestConfig {
        &self.config
    }

    pub fn creator(&self) -> Address {
        self.config.creator
    }

    /// Current phase per the shared clock
    pub fn phase(&self) -> ContestPhase {
        self.config.phase(self.clock.now())
    }

    /// Completion predicate queried by the reward ledger on every payout
    pub fn is_completed(&self) -> bool {
        self.phase() == ContestPhase::Completed
    }

    pub async fn submit(
        &self,
        caller: Address,
        content: ProposalContent,
        proof: &[u8],
    ) -> Result<Hash> {
        self.registry.submit(caller, content, proof).await
    }

    pub async fn submit_without_proof(
        &self,
        caller: Address,
        content: ProposalContent,
    ) -> Result<Hash> {
        self.registry.submit_without_proof(caller, content).await
    }

    pub async fn cast_vote(
        &self,
        caller: Address,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
        proof: &[u8],
    ) -> Result<u128> {
        self.voting
            .cast_vote(caller, proposal_id, support, num_votes, proof)
            .await
    }

    pub async fn cast_vote_without_proof(
        &self,
        caller: Address,
        proposal_id: Hash,
        support: VoteSupport,
        num_votes: u64,
    ) -> Result<u128> {
        self.voting
            .cast_vote_without_proof(caller, proposal_id, support, num_votes)
            .await
    }

    pub async fn proposal(&self, id: &Hash) -> Option<Proposal> {
        self.registry.proposal(id).await
    }

    pub async fn proposal_count(&self) -> usize {
        self.registry.proposal_count().await
    }

    pub async fn tally(&self, proposal_id: &Hash) -> ProposalTally {
        self.voting.tally(proposal_id).await
    }

    /// Final ranking, callable only once the contest has completed
    pub async fn ranked_proposals(&self) -> Result<Vec<Hash>> {
        self.ranking.ranked_proposals().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::StaticOracle;
    use crate::types::{SafeMetadata, TargetMetadata};
    use crate::ContestError;
    use agora_types::ManualClock;

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = ContestConfig {
            voting_period: 0,
            ..Default::default()
        };
        let result = ContestEngine::new(
            config,
            Arc::new(StaticOracle::new()),
            Arc::new(ManualClock::new(0)),
        );
        assert!(matches!(result, Err(ContestError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_full_cycle_through_facade() {
        let author = Address::from_bytes([1; 32]);
        let config = ContestConfig {
            contest_start: 1000,
            voting_delay: 100,
            voting_period: 200,
            ..Default::default()
        };
        let clock = Arc::new(ManualClock::new(1001));
        let engine = ContestEngine::new(
            config,
            Arc::new(StaticOracle::new().with_cap(author, 100)),
            clock.clone(),
        )
        .unwrap();

        assert_eq!(engine.phase(), ContestPhase::Submission);

        let id = engine
            .submit(
                author,
                ProposalContent {
                    author,
                    description: "proposal".to_string(),
                    target: TargetMetadata {
                        target_address: Address::from_bytes([0xEE; 32]),
                    },
                    safe: SafeMetadata::default(),
                    nonce: 0,
                },
                b"proof",
            )
            .await
            .unwrap();

        clock.set(1101);
        assert_eq!(engine.phase(), ContestPhase::Voting);
        let total = engine
            .cast_vote(author, id, VoteSupport::For, 5, b"proof")
            .await
            .unwrap();
        assert_eq!(total, 5);

        clock.set(1300);
        assert!(engine.is_completed());
        assert_eq!(engine.ranked_proposals().await.unwrap(), vec![id]);
        assert_eq!(engine.tally(&id).await.for_votes, 5);
    }
}
