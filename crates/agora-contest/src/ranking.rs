use crate::config::{ContestConfig, ContestPhase};
use crate::registry::ProposalRegistry;
use crate::voting::VotingEngine;
use crate::{ContestError, Result};
use agora_types::{ContestClock, Hash};
use std::sync::Arc;
use tracing::info;

/// Ranking resolver
///
/// Produces the deterministic total order of proposals once the voting
/// window has closed: `for_votes` descending, ties broken by ascending
/// numeric id (big-endian byte order of the hash). The order is a pure
/// function of the final tallies and independent of storage order.
pub struct RankingResolver {
    config: Arc<ContestConfig>,
    clock: Arc<dyn ContestClock>,
    registry: Arc<ProposalRegistry>,
    voting: Arc<VotingEngine>,
}

impl RankingResolver {
    pub fn new(
        config: Arc<ContestConfig>,
        clock: Arc<dyn ContestClock>,
        registry: Arc<ProposalRegistry>,
        voting: Arc<VotingEngine>,
    ) -> Self {
        Self {
            config,
            clock,
            registry,
            voting,
        }
    }

    /// Proposal ids ordered best-first
    ///
    /// Fails with `ContestNotCompleted` before the end of the voting window.
    pub async fn ranked_proposals(&self) -> Result<Vec<Hash>> {
        let now = self.clock.now();
        if self.config.phase(now) != ContestPhase::Completed {
            return Err(ContestError::ContestNotCompleted);
        }

        let ids = self.registry.proposal_ids().await;
        let mut scored: Vec<(Hash, u128)> = Vec::with_capacity(ids.len());
        for id in ids {
            let tally = self.voting.tally(&id).await;
            scored.push((id, tally.for_votes));
        }

        scored.sort_by(|(id_a, votes_a), (id_b, votes_b)| {
            votes_b.cmp(votes_a).then_with(|| id_a.cmp(id_b))
        });

        let ranking: Vec<Hash> = scored.into_iter().map(|(id, _)| id).collect();

        info!(
            proposals = ranking.len(),
            winner = ranking.first().map(|id| hex::encode(&id[..8])),
            "🏆 Ranking resolved"
        );

        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{EligibilityCache, EligibilityOracle, StaticOracle};
    use crate::types::{ProposalContent, SafeMetadata, TargetMetadata, VoteSupport};
    use agora_types::{Address, ManualClock};

    const START: i64 = 1000;
    const DELAY: i64 = 100;
    const PERIOD: i64 = 200;

    async fn contest_with_votes(votes: &[u64]) -> (RankingResolver, Vec<Hash>, Arc<ManualClock>) {
        let config = Arc::new(ContestConfig {
            contest_start: START,
            voting_delay: DELAY,
            voting_period: PERIOD,
            proposal_threshold: 1,
            num_allowed_proposal_submissions: 10,
            ..Default::default()
        });
        let clock = Arc::new(ManualClock::new(START + 1));
        let author = Address::from_bytes([1; 32]);
        let oracle: Arc<dyn EligibilityOracle> =
            Arc::new(StaticOracle::new().with_cap(author, 1_000));
        let cache = EligibilityCache::new();
        let registry = Arc::new(ProposalRegistry::new(
            config.clone(),
            clock.clone(),
            oracle.clone(),
            cache.clone(),
        ));
        let voting = Arc::new(VotingEngine::new(
            config.clone(),
            clock.clone(),
            oracle,
            cache,
            registry.clone(),
        ));

        let mut ids = Vec::new();
        for nonce in 0..votes.len() as u64 {
            let id = registry
                .submit(
                    author,
                    ProposalContent {
                        author,
                        description: format!("proposal {}", nonce),
                        target: TargetMetadata {
                            target_address: Address::from_bytes([0xEE; 32]),
                        },
                        safe: SafeMetadata::default(),
                        nonce,
                    },
                    b"proof",
                )
                .await
                .unwrap();
            ids.push(id);
        }

        clock.set(START + DELAY + 1);
        for (id, &n) in ids.iter().zip(votes) {
            if n > 0 {
                voting
                    .cast_vote_without_proof(author, *id, VoteSupport::For, n)
                    .await
                    .unwrap();
            }
        }

        let resolver = RankingResolver::new(config, clock.clone(), registry, voting);
        (resolver, ids, clock)
    }

    #[tokio::test]
    async fn test_not_completed_before_window_end() {
        let (resolver, _ids, clock) = contest_with_votes(&[5, 3]).await;

        assert!(matches!(
            resolver.ranked_proposals().await,
            Err(ContestError::ContestNotCompleted)
        ));

        clock.set(START + DELAY + PERIOD);
        assert!(resolver.ranked_proposals().await.is_ok());
    }

    #[tokio::test]
    async fn test_order_by_votes_descending() {
        let (resolver, ids, clock) = contest_with_votes(&[3, 9, 6]).await;
        clock.set(START + DELAY + PERIOD);

        let ranking = resolver.ranked_proposals().await.unwrap();
        assert_eq!(ranking, vec![ids[1], ids[2], ids[0]]);
    }

    #[tokio::test]
    async fn test_ties_broken_by_ascending_id() {
        let (resolver, ids, clock) = contest_with_votes(&[4, 4, 4]).await;
        clock.set(START + DELAY + PERIOD);

        let ranking = resolver.ranked_proposals().await.unwrap();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(ranking, expected);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let (resolver, _ids, clock) = contest_with_votes(&[2, 7, 7, 1]).await;
        clock.set(START + DELAY + PERIOD + 500);

        let first = resolver.ranked_proposals().await.unwrap();
        for _ in 0..5 {
            assert_eq!(resolver.ranked_proposals().await.unwrap(), first);
        }
    }
}
