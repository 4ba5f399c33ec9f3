/*!
# Agora Shared Types

Primitives shared across the contest governance and reward crates:

- **address**: 32-byte participant identity with hex display
- **canonical_json**: deterministic serialization and Blake3 hashing for
  content-addressed identifiers
- **clock**: the global time source abstraction used to enforce contest
  windows

## Module Structure

- **address**: `Address` newtype
- **canonical_json**: `to_canonical_json`, `canonical_hash`
- **clock**: `ContestClock` trait, `SystemClock`, `ManualClock`
*/

pub mod address;
pub mod canonical_json;
pub mod clock;

pub use address::Address;
pub use canonical_json::{canonical_hash, to_canonical_json, CanonicalJsonError};
pub use clock::{ContestClock, ManualClock, SystemClock};

/// Hash type for contest artifacts (proposal ids)
pub type Hash = [u8; 32];
