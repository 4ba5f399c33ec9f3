/*!
# Agora Assets

Multi-asset accounting primitives and the external transfer capability used
by the reward ledger:

- **types**: `AssetId` (native currency or fungible token) and `AssetAmount`
  (base-unit integer amount with checked arithmetic)
- **vault**: the `AssetVault` capability trait plus `MemoryVault`, an
  in-memory implementation for tests and local runs

The vault is deliberately opaque: the reward ledger only knows its own
balance per asset and how to push funds out. A transfer may re-enter the
caller, which is why the reward ledger commits its accounting before
invoking the vault.
*/

pub mod types;
pub mod vault;

pub use types::{AssetAmount, AssetId};
pub use vault::{AssetVault, MemoryVault};
