use thiserror::Error;

/// Reward ledger result type
pub type Result<T> = std::result::Result<T, RewardsError>;

/// Reward ledger errors
#[derive(Debug, Error)]
pub enum RewardsError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Contest not completed")]
    ContestNotCompleted,

    #[error("No shares assigned to rank {rank}")]
    NoShares { rank: u32 },

    #[error("Nothing releasable")]
    ZeroPayment,

    #[error("Rank {rank} out of bounds: {ranked} proposals ranked")]
    RankOutOfBounds { rank: u32, ranked: usize },

    #[error("Proposal not found for rank {0}")]
    ProposalNotFound(u32),

    #[error("Resolved recipient is the zero address")]
    ZeroAddressRecipient,

    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("Invalid share table: {0}")]
    InvalidShares(String),

    #[error("Vault error: {0}")]
    Vault(String),

    #[error("Contest error: {0}")]
    Contest(#[from] agora_contest::ContestError),
}
