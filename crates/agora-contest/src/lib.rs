/*!
# Agora Contest Engine

Governance state machine for one contest cycle:

- Permissioned, window-bounded proposal submission with deterministic
  content-addressed ids
- Time-windowed voting with optional linear decay weighting and
  cumulative per-voter weight caps
- Deterministic post-contest ranking by vote total, ties broken by
  ascending id

## Design

The execution environment is serial and atomic per call: every operation
is a synchronous function of current state, caller-supplied input, and a
global clock. Windows are enforced by comparing the clock against the
immutable bounds in `ContestConfig` at call time; there is no background
scheduling and no internal retry.

Eligibility is delegated to an external oracle behind the
`EligibilityOracle` trait. A successful verification is cached for the
contest lifetime so the proof-skipped submission and voting variants can
elide re-verification.

## Module Structure

- **config**: immutable contest parameters and the phase function
- **eligibility**: oracle trait, static test oracle, verification cache
- **registry**: proposal storage and submission policy
- **voting**: decay-aware vote accounting
- **ranking**: deterministic final ordering
- **engine**: `ContestEngine` facade wiring the policy modules together
- **error**: contest-specific errors
- **metrics**: prometheus counters
*/

pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod registry;
pub mod types;
pub mod voting;

pub use config::{ContestConfig, ContestPhase};
pub use eligibility::{Eligibility, EligibilityCache, EligibilityOracle, StaticOracle};
pub use engine::ContestEngine;
pub use error::{ContestError, Result};
pub use ranking::RankingResolver;
pub use registry::ProposalRegistry;
pub use types::{
    Proposal, ProposalContent, ProposalTally, SafeMetadata, TargetMetadata, VoteRecord,
    VoteSupport,
};
pub use voting::VotingEngine;
