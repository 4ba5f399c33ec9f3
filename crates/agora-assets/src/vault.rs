use crate::types::{AssetAmount, AssetId};
use agora_types::Address;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// External transfer capability held by the reward ledger
///
/// `balance` reports the ledger's own current holdings of an asset;
/// `transfer` pushes funds out to a recipient and fails loudly. A transfer
/// may invoke arbitrary recipient code before returning, including calls
/// back into the ledger that triggered it.
#[async_trait]
pub trait AssetVault: Send + Sync {
    async fn balance(&self, asset: AssetId) -> Result<AssetAmount>;
    async fn transfer(&self, asset: AssetId, to: Address, amount: AssetAmount) -> Result<()>;
}

type AssetBook = HashMap<AssetId, AssetAmount>;

/// In-memory vault
///
/// Tracks the vault's own holdings plus a book of recipient balances so
/// tests can assert where funds ended up.
pub struct MemoryVault {
    holdings: Arc<RwLock<AssetBook>>,
    accounts: Arc<RwLock<HashMap<(Address, AssetId), AssetAmount>>>,
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            holdings: Arc::new(RwLock::new(HashMap::new())),
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Credit the vault's own holdings (funds arriving at the ledger)
    pub async fn deposit(&self, asset: AssetId, amount: AssetAmount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }

        let mut holdings = self.holdings.write().await;
        let current = holdings.get(&asset).copied().unwrap_or(AssetAmount::ZERO);
        let new_balance = current
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Vault balance overflow for {}", asset))?;
        holdings.insert(asset, new_balance);

        info!(
            asset = %asset,
            amount = %amount,
            balance_before = %current,
            balance_after = %new_balance,
            "💰 Vault deposit"
        );
        Ok(())
    }

    /// Recipient-side balance, for test assertions
    pub async fn balance_of(&self, owner: Address, asset: AssetId) -> AssetAmount {
        let accounts = self.accounts.read().await;
        accounts
            .get(&(owner, asset))
            .copied()
            .unwrap_or(AssetAmount::ZERO)
    }
}

#[async_trait]
impl AssetVault for MemoryVault {
    async fn balance(&self, asset: AssetId) -> Result<AssetAmount> {
        let holdings = self.holdings.read().await;
        Ok(holdings.get(&asset).copied().unwrap_or(AssetAmount::ZERO))
    }

    async fn transfer(&self, asset: AssetId, to: Address, amount: AssetAmount) -> Result<()> {
        if amount.is_zero() {
            bail!("Cannot transfer zero amount");
        }

        let mut holdings = self.holdings.write().await;
        let current = holdings.get(&asset).copied().unwrap_or(AssetAmount::ZERO);
        let remaining = current.checked_sub(amount).ok_or_else(|| {
            anyhow::anyhow!(
                "Insufficient vault balance for {}: has {}, needs {}",
                asset,
                current,
                amount
            )
        })?;
        holdings.insert(asset, remaining);
        drop(holdings);

        let mut accounts = self.accounts.write().await;
        let entry = accounts
            .entry((to, asset))
            .or_insert(AssetAmount::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Recipient balance overflow"))?;
        let recipient_balance = *entry;
        drop(accounts);

        info!(
            asset = %asset,
            to = %to,
            amount = %amount,
            vault_remaining = %remaining,
            recipient_balance = %recipient_balance,
            "💸 Vault transfer"
        );
        Ok(())
    }
}
