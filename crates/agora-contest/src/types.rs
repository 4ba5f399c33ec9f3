use crate::Result;
use agora_types::{canonical_hash, Address, Hash};
use serde::{Deserialize, Serialize};

/// Reward recipient override for a proposal
///
/// When the reward ledger runs in pay-target mode, payouts go to
/// `target_address` instead of the proposal author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMetadata {
    pub target_address: Address,
}

/// Optional multi-signer metadata attached to a proposal
///
/// Part of the proposal's content identity; not exercised by the reward
/// ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeMetadata {
    pub signers: Vec<Address>,
    pub threshold: u32,
}

impl Default for SafeMetadata {
    fn default() -> Self {
        Self {
            signers: Vec::new(),
            threshold: 0,
        }
    }
}

/// Submitter-supplied proposal payload
///
/// The proposal id is the canonical Blake3 hash of this content, so clients
/// can predict the id before submitting. Proof-checked and proof-skipped
/// submission paths hash through the same function and therefore always
/// agree on the id for the same logical content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalContent {
    pub author: Address,
    pub description: String,
    pub target: TargetMetadata,
    pub safe: SafeMetadata,
    /// Submitter nonce, distinguishes otherwise-identical content
    pub nonce: u64,
}

impl ProposalContent {
    /// Content-addressed proposal id
    pub fn compute_id(&self) -> Result<Hash> {
        let hash = canonical_hash(self)?;
        crate::metrics::PROPOSAL_ID_COMPUTATIONS.inc();
        Ok(hash)
    }
}

/// Stored proposal
///
/// Created once during the submission window, immutable thereafter, never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: Hash,
    pub author: Address,
    pub description: String,
    pub target: TargetMetadata,
    pub safe: SafeMetadata,
    pub exists: bool,
}

impl Proposal {
    pub fn from_content(id: Hash, content: ProposalContent) -> Self {
        Self {
            id,
            author: content.author,
            description: content.description,
            target: content.target,
            safe: content.safe,
            exists: true,
        }
    }
}

/// Vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteSupport {
    For,
    Against,
}

impl VoteSupport {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteSupport::For => "for",
            VoteSupport::Against => "against",
        }
    }
}

/// Per-(proposal, voter) vote state
///
/// `raw_votes` is the cumulative undecayed commitment; `applied_weight` is
/// the decayed weight currently counted in the tally. Keeping both lets a
/// recast subtract the old contribution and re-apply the whole commitment
/// at the new decay factor without double counting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoteRecord {
    pub support: VoteSupport,
    pub raw_votes: u64,
    pub applied_weight: u128,
    pub last_cast_at: i64,
}

/// Per-proposal vote totals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProposalTally {
    pub for_votes: u128,
    pub against_votes: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(nonce: u64) -> ProposalContent {
        ProposalContent {
            author: Address::from_bytes([1; 32]),
            description: "Fund the aqueduct".to_string(),
            target: TargetMetadata {
                target_address: Address::from_bytes([2; 32]),
            },
            safe: SafeMetadata::default(),
            nonce,
        }
    }

    #[test]
    fn test_id_is_reproducible() {
        let a = content(0).compute_id().unwrap();
        let b = content(0).compute_id().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nonce_distinguishes_identical_content() {
        let a = content(0).compute_id().unwrap();
        let b = content(1).compute_id().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_depends_on_every_field() {
        let base = content(0).compute_id().unwrap();

        let mut changed = content(0);
        changed.description = "Fund the forum".to_string();
        assert_ne!(changed.compute_id().unwrap(), base);

        let mut changed = content(0);
        changed.target.target_address = Address::from_bytes([3; 32]);
        assert_ne!(changed.compute_id().unwrap(), base);

        let mut changed = content(0);
        changed.safe.threshold = 2;
        assert_ne!(changed.compute_id().unwrap(), base);
    }
}
