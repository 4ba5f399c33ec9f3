use crate::{Result, RewardsError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Immutable rank → share-units table
///
/// Every rank key is positive and unique with positive shares;
/// `total_shares` is the sum of all entries. Payouts are proportional:
/// rank `r` is entitled to `shares(r) / total_shares` of everything the
/// ledger has ever received per asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareTable {
    shares: HashMap<u32, u64>,
    total_shares: u64,
    ranks: Vec<u32>,
}

impl ShareTable {
    pub fn new(ranks: Vec<u32>, shares: Vec<u64>) -> Result<Self> {
        if ranks.len() != shares.len() {
            return Err(RewardsError::InvalidShares(format!(
                "{} ranks but {} share entries",
                ranks.len(),
                shares.len()
            )));
        }
        if ranks.is_empty() {
            return Err(RewardsError::InvalidShares("empty share table".to_string()));
        }

        let mut table = HashMap::with_capacity(ranks.len());
        let mut total: u64 = 0;
        for (&rank, &share) in ranks.iter().zip(shares.iter()) {
            if rank == 0 {
                return Err(RewardsError::InvalidShares(
                    "rank 0 is not a valid rank".to_string(),
                ));
            }
            if share == 0 {
                return Err(RewardsError::InvalidShares(format!(
                    "rank {} has zero shares",
                    rank
                )));
            }
            if table.insert(rank, share).is_some() {
                return Err(RewardsError::InvalidShares(format!(
                    "rank {} assigned twice",
                    rank
                )));
            }
            total = total
                .checked_add(share)
                .ok_or(RewardsError::Overflow("total shares"))?;
        }

        for &rank in &ranks {
            info!(rank, shares = table[&rank], "🏆 Rank share assigned");
        }

        Ok(Self {
            shares: table,
            total_shares: total,
            ranks,
        })
    }

    /// Share units for a rank, zero if unassigned
    pub fn shares(&self, rank: u32) -> u64 {
        self.shares.get(&rank).copied().unwrap_or(0)
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Ranks in construction order
    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table() {
        let table = ShareTable::new(vec![1, 2, 3], vec![3, 2, 1]).unwrap();
        assert_eq!(table.total_shares(), 6);
        assert_eq!(table.shares(1), 3);
        assert_eq!(table.shares(2), 2);
        assert_eq!(table.shares(3), 1);
        assert_eq!(table.shares(4), 0);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(ShareTable::new(vec![1, 2], vec![3]).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(ShareTable::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_rejects_rank_zero() {
        assert!(ShareTable::new(vec![0, 1], vec![1, 1]).is_err());
    }

    #[test]
    fn test_rejects_zero_shares() {
        assert!(ShareTable::new(vec![1, 2], vec![1, 0]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_rank() {
        assert!(ShareTable::new(vec![1, 1], vec![1, 2]).is_err());
    }

    #[test]
    fn test_rejects_share_sum_overflow() {
        assert!(ShareTable::new(vec![1, 2], vec![u64::MAX, 1]).is_err());
    }
}
