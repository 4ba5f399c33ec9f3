use thiserror::Error;

/// Contest operation result type
pub type Result<T> = std::result::Result<T, ContestError>;

/// Contest errors
///
/// Every failure aborts the triggering call; no partial state is retained
/// and nothing is retried internally.
#[derive(Debug, Error)]
pub enum ContestError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not in submission window")]
    NotInSubmissionWindow,

    #[error("Not in voting window")]
    NotInVotingWindow,

    #[error("Unknown proposal: {0}")]
    UnknownProposal(String),

    #[error("Submission limit exceeded: max {limit} per author")]
    SubmissionLimitExceeded { limit: u32 },

    #[error("Registry full: max {max} proposals")]
    RegistryFull { max: u32 },

    #[error("Duplicate proposal: {0}")]
    DuplicateProposal(String),

    #[error("Contest not completed")]
    ContestNotCompleted,

    #[error("Downvoting is not enabled for this contest")]
    DownvotingDisabled,

    #[error("Vote direction mismatch for voter {0}")]
    VoteDirectionMismatch(String),

    #[error("Zero amount")]
    ZeroAmount,

    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Eligibility oracle error: {0}")]
    Oracle(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] agora_types::CanonicalJsonError),
}
