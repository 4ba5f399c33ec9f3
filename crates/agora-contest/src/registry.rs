use crate::config::{ContestConfig, ContestPhase};
use crate::eligibility::{EligibilityCache, EligibilityOracle};
use crate::types::{Proposal, ProposalContent};
use crate::{ContestError, Result};
use agora_types::{Address, ContestClock, Hash};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Stored proposal set plus per-author submission accounting
#[derive(Default)]
struct RegistryState {
    proposals: HashMap<Hash, Proposal>,
    /// Insertion order, for stable enumeration
    order: Vec<Hash>,
    submissions_by_author: HashMap<Address, u32>,
}

/// Proposal registry
///
/// Exclusively owns proposal storage. Enforces the submission window,
/// per-author allowance, and the registry capacity, and assigns the
/// deterministic content-addressed id.
pub struct ProposalRegistry {
    config: Arc<ContestConfig>,
    clock: Arc<dyn ContestClock>,
    oracle: Arc<dyn EligibilityOracle>,
    eligibility: EligibilityCache,
    state: Arc<RwLock<RegistryState>>,
}

impl ProposalRegistry {
    pub fn new(
        config: Arc<ContestConfig>,
        clock: Arc<dyn ContestClock>,
        oracle: Arc<dyn EligibilityOracle>,
        eligibility: EligibilityCache,
    ) -> Self {
        Self {
            config,
            clock,
            oracle,
            eligibility,
            state: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    /// Submit a proposal with an eligibility proof
    pub async fn submit(
        &self,
        caller: Address,
        content: ProposalContent,
        proof: &[u8],
    ) -> Result<Hash> {
        self.check_window()?;
        self.check_author(caller, &content)?;

        let cap = self
            .eligibility
            .verify_and_cache(self.oracle.as_ref(), caller, proof)
            .await?;

        self.store(caller, content, cap).await
    }

    /// Submit a proposal reusing a previously cached eligibility verification
    pub async fn submit_without_proof(
        &self,
        caller: Address,
        content: ProposalContent,
    ) -> Result<Hash> {
        self.check_window()?;
        self.check_author(caller, &content)?;

        let cap = self.eligibility.cached_cap(caller).await?;

        self.store(caller, content, cap).await
    }

    fn check_window(&self) -> Result<()> {
        let now = self.clock.now();
        if self.config.phase(now) != ContestPhase::Submission {
            return Err(ContestError::NotInSubmissionWindow);
        }
        Ok(())
    }

    fn check_author(&self, caller: Address, content: &ProposalContent) -> Result<()> {
        if content.author != caller {
            return Err(ContestError::Unauthorized(format!(
                "author {} does not match caller {}",
                content.author, caller
            )));
        }
        Ok(())
    }

    async fn store(&self, caller: Address, content: ProposalContent, cap: u64) -> Result<Hash> {
        if cap < self.config.proposal_threshold {
            return Err(ContestError::Unauthorized(format!(
                "weight cap {} below proposal threshold {}",
                cap, self.config.proposal_threshold
            )));
        }

        let id = content.compute_id()?;

        let mut state = self.state.write().await;

        let submitted = state
            .submissions_by_author
            .get(&caller)
            .copied()
            .unwrap_or(0);
        if submitted >= self.config.num_allowed_proposal_submissions {
            return Err(ContestError::SubmissionLimitExceeded {
                limit: self.config.num_allowed_proposal_submissions,
            });
        }

        if state.proposals.len() as u32 >= self.config.max_proposal_count {
            return Err(ContestError::RegistryFull {
                max: self.config.max_proposal_count,
            });
        }

        if state.proposals.contains_key(&id) {
            return Err(ContestError::DuplicateProposal(hex::encode(&id[..8])));
        }

        let proposal = Proposal::from_content(id, content);
        state.proposals.insert(id, proposal);
        state.order.push(id);
        state.submissions_by_author.insert(caller, submitted + 1);
        let total = state.proposals.len();
        drop(state);

        crate::metrics::PROPOSALS_SUBMITTED.inc();

        info!(
            proposal_id = hex::encode(&id[..8]),
            author = %caller,
            total_proposals = total,
            "📜 Proposal submitted"
        );

        Ok(id)
    }

    /// Look up a proposal by id
    pub async fn proposal(&self, id: &Hash) -> Option<Proposal> {
        let state = self.state.read().await;
        state.proposals.get(id).cloned()
    }

    pub async fn exists(&self, id: &Hash) -> bool {
        let state = self.state.read().await;
        state.proposals.get(id).map(|p| p.exists).unwrap_or(false)
    }

    pub async fn proposal_count(&self) -> usize {
        let state = self.state.read().await;
        state.proposals.len()
    }

    /// All proposal ids in submission order
    pub async fn proposal_ids(&self) -> Vec<Hash> {
        let state = self.state.read().await;
        state.order.clone()
    }
}
