use crate::shares::ShareTable;
use crate::{Result, RewardsError};
use agora_assets::{AssetAmount, AssetId, AssetVault};
use agora_contest::ContestEngine;
use agora_types::{Address, Hash};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Per-asset release accounting
///
/// `total_released[asset]` always equals the sum of `released[(asset, r)]`
/// over all ranks, and every per-rank entry only grows.
#[derive(Default)]
struct ReleaseLedger {
    total_released: HashMap<AssetId, AssetAmount>,
    released: HashMap<(AssetId, u32), AssetAmount>,
}

impl ReleaseLedger {
    fn total_released(&self, asset: AssetId) -> AssetAmount {
        self.total_released
            .get(&asset)
            .copied()
            .unwrap_or(AssetAmount::ZERO)
    }

    fn released(&self, asset: AssetId, rank: u32) -> AssetAmount {
        self.released
            .get(&(asset, rank))
            .copied()
            .unwrap_or(AssetAmount::ZERO)
    }
}

/// Rank-keyed proportional reward splitter
///
/// Pull-based payout ledger over a completed contest. Shares are keyed by
/// rank, not identity; the rank → recipient resolution happens against the
/// contest's final ranking, materialized lazily and cached exactly once.
/// Completion itself is never cached: every payout call re-queries the
/// contest's completion predicate.
///
/// Release accounting is committed *before* the vault transfer is invoked
/// (checks-effects-interactions), so a transfer that re-enters the splitter
/// observes the incremented ledger and cannot double-claim. If the transfer
/// itself fails, the increments are rolled back and the failure propagates.
pub struct RankedRewardSplitter {
    shares: ShareTable,
    contest: Arc<ContestEngine>,
    vault: Arc<dyn AssetVault>,
    /// Pay the proposal's configured target instead of its author
    pay_target: bool,
    ledger: Arc<RwLock<ReleaseLedger>>,
    ranking: Arc<RwLock<Option<Vec<Hash>>>>,
}

impl RankedRewardSplitter {
    pub fn new(
        shares: ShareTable,
        contest: Arc<ContestEngine>,
        vault: Arc<dyn AssetVault>,
        pay_target: bool,
    ) -> Self {
        Self {
            shares,
            contest,
            vault,
            pay_target,
            ledger: Arc::new(RwLock::new(ReleaseLedger::default())),
            ranking: Arc::new(RwLock::new(None)),
        }
    }

    pub fn share_table(&self) -> &ShareTable {
        &self.shares
    }

    /// Everything the ledger has ever received for an asset:
    /// current vault balance plus everything already paid out.
    async fn total_received(&self, asset: AssetId, ledger: &ReleaseLedger) -> Result<AssetAmount> {
        let balance = self
            .vault
            .balance(asset)
            .await
            .map_err(|e| RewardsError::Vault(e.to_string()))?;
        balance
            .checked_add(ledger.total_released(asset))
            .ok_or(RewardsError::Overflow("total received"))
    }

    fn pending(
        &self,
        asset: AssetId,
        rank: u32,
        total_received: AssetAmount,
        ledger: &ReleaseLedger,
    ) -> Result<AssetAmount> {
        let share = self.shares.shares(rank);
        if share == 0 {
            return Ok(AssetAmount::ZERO);
        }

        let entitled = total_received
            .mul_div(share, self.shares.total_shares())
            .ok_or(RewardsError::Overflow("rank entitlement"))?;

        // Floor division keeps entitlement monotone in total_received, so
        // the released amount can never exceed it.
        entitled
            .checked_sub(ledger.released(asset, rank))
            .ok_or(RewardsError::Overflow("release ledger exceeds entitlement"))
    }

    /// Amount currently claimable for a rank; zero for unassigned ranks
    pub async fn releasable(&self, asset: AssetId, rank: u32) -> Result<AssetAmount> {
        let ledger = self.ledger.read().await;
        let total_received = self.total_received(asset, &ledger).await?;
        self.pending(asset, rank, total_received, &ledger)
    }

    /// Materialize and cache the contest ranking on first use
    async fn ranking(&self) -> Result<Vec<Hash>> {
        {
            let cached = self.ranking.read().await;
            if let Some(ranking) = cached.as_ref() {
                return Ok(ranking.clone());
            }
        }

        let resolved = self.contest.ranked_proposals().await?;

        let mut cached = self.ranking.write().await;
        // Another call may have raced us here; the resolver is
        // deterministic so both computed the same sequence.
        if cached.is_none() {
            info!(proposals = resolved.len(), "🏅 Ranking cached for payouts");
            *cached = Some(resolved.clone());
        }
        Ok(resolved)
    }

    /// Resolve the payout recipient for a rank (1 = best)
    async fn recipient(&self, rank: u32) -> Result<Address> {
        let ranking = self.ranking().await?;
        if rank as usize > ranking.len() {
            return Err(RewardsError::RankOutOfBounds {
                rank,
                ranked: ranking.len(),
            });
        }

        let proposal_id = ranking[rank as usize - 1];
        let proposal = self
            .contest
            .proposal(&proposal_id)
            .await
            .ok_or(RewardsError::ProposalNotFound(rank))?;

        let recipient = if self.pay_target {
            proposal.target.target_address
        } else {
            proposal.author
        };
        if recipient.is_zero() {
            return Err(RewardsError::ZeroAddressRecipient);
        }
        Ok(recipient)
    }

    /// Release the pending share for a rank
    ///
    /// Idempotent up to available balance: with no new funds received, a
    /// second call fails with `ZeroPayment`.
    pub async fn release(&self, asset: AssetId, rank: u32) -> Result<AssetAmount> {
        if !self.contest.is_completed() {
            return Err(RewardsError::ContestNotCompleted);
        }
        if self.shares.shares(rank) == 0 {
            return Err(RewardsError::NoShares { rank });
        }

        // A rank with nothing pending is rejected before the ranking is
        // materialized or the recipient resolved.
        if self.releasable(asset, rank).await?.is_zero() {
            return Err(RewardsError::ZeroPayment);
        }

        let recipient = self.recipient(rank).await?;

        // Effects: commit the release accounting under the write lock and
        // drop it before any external interaction.
        let payment = {
            let mut ledger = self.ledger.write().await;
            let total_received = self.total_received(asset, &ledger).await?;
            let payment = self.pending(asset, rank, total_received, &ledger)?;
            if payment.is_zero() {
                return Err(RewardsError::ZeroPayment);
            }

            let released = ledger
                .released(asset, rank)
                .checked_add(payment)
                .ok_or(RewardsError::Overflow("per-rank released"))?;
            let total_released = ledger
                .total_released(asset)
                .checked_add(payment)
                .ok_or(RewardsError::Overflow("total released"))?;
            ledger.released.insert((asset, rank), released);
            ledger.total_released.insert(asset, total_released);
            payment
        };

        // Interaction: the transfer may re-enter this splitter; any
        // re-entrant release for this (asset, rank) now sees the
        // incremented ledger and gets ZeroPayment.
        if let Err(e) = self.vault.transfer(asset, recipient, payment).await {
            let mut ledger = self.ledger.write().await;
            let released = ledger.released(asset, rank).saturating_sub(payment);
            let total_released = ledger.total_released(asset).saturating_sub(payment);
            ledger.released.insert((asset, rank), released);
            ledger.total_released.insert(asset, total_released);

            warn!(
                asset = %asset,
                rank,
                recipient = %recipient,
                amount = %payment,
                error = %e,
                "❌ Payout transfer failed, release rolled back"
            );
            return Err(RewardsError::Vault(e.to_string()));
        }

        let asset_label = asset.to_string();
        crate::metrics::PAYMENTS_RELEASED
            .with_label_values(&[asset_label.as_str()])
            .inc();

        info!(
            asset = %asset,
            rank,
            recipient = %recipient,
            amount = %payment,
            "💸 Payment released"
        );

        Ok(payment)
    }

    /// Creator-only sweep of the entire vault balance for an asset
    ///
    /// Deliberate administrative override: bypasses the share table and the
    /// release accounting entirely. Only authorization can fail it; sweeping
    /// an empty vault is a no-op that returns zero.
    pub async fn withdraw_rewards(&self, caller: Address, asset: AssetId) -> Result<AssetAmount> {
        let creator = self.contest.creator();
        if caller != creator {
            return Err(RewardsError::Unauthorized(format!(
                "{} is not the contest creator",
                caller
            )));
        }

        let balance = self
            .vault
            .balance(asset)
            .await
            .map_err(|e| RewardsError::Vault(e.to_string()))?;
        if balance.is_zero() {
            return Ok(AssetAmount::ZERO);
        }

        self.vault
            .transfer(asset, creator, balance)
            .await
            .map_err(|e| RewardsError::Vault(e.to_string()))?;

        crate::metrics::REWARDS_WITHDRAWN.inc();

        warn!(
            asset = %asset,
            creator = %creator,
            amount = %balance,
            "🧹 Rewards withdrawn by creator"
        );

        Ok(balance)
    }

    /// Amount already released to a rank for an asset
    pub async fn released(&self, asset: AssetId, rank: u32) -> AssetAmount {
        let ledger = self.ledger.read().await;
        ledger.released(asset, rank)
    }

    /// Total released for an asset across all ranks
    pub async fn total_released(&self, asset: AssetId) -> AssetAmount {
        let ledger = self.ledger.read().await;
        ledger.total_released(asset)
    }
}
