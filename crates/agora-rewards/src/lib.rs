/*!
# Agora Rewards

Rank-keyed proportional reward payout over a completed contest:

- Immutable `ShareTable` mapping ranks to share units
- Pull-based `RankedRewardSplitter` that pays each rank its proportional
  cut of everything the ledger has ever received, per asset, with dust
  from floor division retained in the vault
- Creator-only `withdraw_rewards` sweep that bypasses the accounting

## Design

The splitter never pushes funds on its own: every payout is a pull
against the release ledger. Release accounting is committed before the
vault transfer runs, so recipient code invoked by the transfer cannot
double-claim by re-entering; a failed transfer rolls the accounting
back. The contest's completion predicate is re-queried on every payout
call, while the final ranking is computed once and cached.
*/

pub mod error;
pub mod metrics;
pub mod shares;
pub mod splitter;

pub use error::{Result, RewardsError};
pub use shares::ShareTable;
pub use splitter::RankedRewardSplitter;
