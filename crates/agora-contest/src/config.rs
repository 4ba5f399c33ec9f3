use crate::{ContestError, Result};
use agora_types::Address;
use serde::{Deserialize, Serialize};

/// Contest lifecycle phase, derived purely from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestPhase {
    /// Before `contest_start`
    NotStarted,
    /// Submission window: `[contest_start, vote_start)`
    Submission,
    /// Voting window: `[vote_start, vote_end)`
    Voting,
    /// At or after `vote_end`
    Completed,
}

/// Immutable contest parameters
///
/// Window bounds never change after construction. The numeric parameter
/// vector mirrors the construction-time interface:
/// `[contest_start, voting_delay, voting_period, proposal_threshold,
/// num_allowed_proposal_submissions, max_proposal_count]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestConfig {
    /// Contest start, unix seconds
    pub contest_start: i64,
    /// Seconds between contest start and the opening of voting
    pub voting_delay: i64,
    /// Voting window duration in seconds
    pub voting_period: i64,
    /// Minimum eligibility weight cap required to submit a proposal
    pub proposal_threshold: u64,
    /// Per-author submission allowance
    pub num_allowed_proposal_submissions: u32,
    /// Hard cap on total stored proposals
    pub max_proposal_count: u32,
    /// Scale vote weight linearly by remaining voting time
    pub use_linear_vote_decay: bool,
    /// Allow Against votes
    pub allow_downvoting: bool,
    /// Contest creator, the only identity allowed to sweep rewards
    pub creator: Address,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            contest_start: 0,
            voting_delay: 24 * 3600,
            voting_period: 7 * 24 * 3600,
            proposal_threshold: 1,
            num_allowed_proposal_submissions: 1,
            max_proposal_count: 100,
            use_linear_vote_decay: false,
            allow_downvoting: false,
            creator: Address::ZERO,
        }
    }
}

impl ContestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.voting_period <= 0 {
            return Err(ContestError::InvalidConfig(
                "voting_period must be positive".to_string(),
            ));
        }
        if self.voting_delay < 0 {
            return Err(ContestError::InvalidConfig(
                "voting_delay must not be negative".to_string(),
            ));
        }
        if self.max_proposal_count == 0 {
            return Err(ContestError::InvalidConfig(
                "max_proposal_count must be positive".to_string(),
            ));
        }
        if self.num_allowed_proposal_submissions == 0 {
            return Err(ContestError::InvalidConfig(
                "num_allowed_proposal_submissions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// First second of the voting window
    pub fn vote_start(&self) -> i64 {
        self.contest_start + self.voting_delay
    }

    /// First second after the voting window
    pub fn vote_end(&self) -> i64 {
        self.vote_start() + self.voting_period
    }

    /// Phase at `now`; windows are half-open on the right
    pub fn phase(&self, now: i64) -> ContestPhase {
        if now < self.contest_start {
            ContestPhase::NotStarted
        } else if now < self.vote_start() {
            ContestPhase::Submission
        } else if now < self.vote_end() {
            ContestPhase::Voting
        } else {
            ContestPhase::Completed
        }
    }
}
