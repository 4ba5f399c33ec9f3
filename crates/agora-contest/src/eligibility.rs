use crate::{ContestError, Result};
use agora_types::Address;
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Oracle verdict for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    /// Maximum raw weight the address may commit
    pub weight_cap: u64,
}

/// External permission-proof verifier
///
/// Proof semantics are opaque to the contest; the oracle only reports
/// whether the address may participate and with what weight cap.
#[async_trait]
pub trait EligibilityOracle: Send + Sync {
    async fn verify(&self, address: Address, proof: &[u8]) -> AnyResult<Eligibility>;
}

/// Map-backed oracle for tests and fixed allowlists
#[derive(Debug, Default)]
pub struct StaticOracle {
    caps: HashMap<Address, u64>,
}

impl StaticOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, address: Address, weight_cap: u64) -> Self {
        self.caps.insert(address, weight_cap);
        self
    }
}

#[async_trait]
impl EligibilityOracle for StaticOracle {
    async fn verify(&self, address: Address, _proof: &[u8]) -> AnyResult<Eligibility> {
        Ok(match self.caps.get(&address) {
            Some(&weight_cap) => Eligibility {
                eligible: true,
                weight_cap,
            },
            None => Eligibility {
                eligible: false,
                weight_cap: 0,
            },
        })
    }
}

/// Per-contest cache of successful verifications
///
/// A caller who has proven eligibility once in this contest lifecycle may
/// use the proof-skipped submission and voting variants; the cached weight
/// cap is reused instead of re-running the oracle.
#[derive(Clone, Default)]
pub struct EligibilityCache {
    verified: Arc<RwLock<HashMap<Address, u64>>>,
}

impl EligibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap from the cache, or `Unauthorized` if never verified
    pub async fn cached_cap(&self, address: Address) -> Result<u64> {
        let verified = self.verified.read().await;
        verified.get(&address).copied().ok_or_else(|| {
            ContestError::Unauthorized(format!("{} has no cached eligibility", address))
        })
    }

    /// Verify through the oracle, caching the cap on success
    pub async fn verify_and_cache(
        &self,
        oracle: &dyn EligibilityOracle,
        address: Address,
        proof: &[u8],
    ) -> Result<u64> {
        {
            let verified = self.verified.read().await;
            if let Some(&cap) = verified.get(&address) {
                debug!(address = %address, weight_cap = cap, "Eligibility cache hit");
                return Ok(cap);
            }
        }

        let verdict = oracle
            .verify(address, proof)
            .await
            .map_err(|e| ContestError::Oracle(e.to_string()))?;

        if !verdict.eligible {
            return Err(ContestError::Unauthorized(format!(
                "{} failed eligibility proof",
                address
            )));
        }

        let mut verified = self.verified.write().await;
        verified.insert(address, verdict.weight_cap);

        debug!(
            address = %address,
            weight_cap = verdict.weight_cap,
            "Eligibility verified and cached"
        );
        Ok(verdict.weight_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_oracle() {
        let addr = Address::from_bytes([1; 32]);
        let stranger = Address::from_bytes([2; 32]);
        let oracle = StaticOracle::new().with_cap(addr, 50);

        let verdict = oracle.verify(addr, b"proof").await.unwrap();
        assert!(verdict.eligible);
        assert_eq!(verdict.weight_cap, 50);

        let verdict = oracle.verify(stranger, b"proof").await.unwrap();
        assert!(!verdict.eligible);
    }

    #[tokio::test]
    async fn test_cache_requires_prior_verification() {
        let addr = Address::from_bytes([1; 32]);
        let cache = EligibilityCache::new();

        assert!(matches!(
            cache.cached_cap(addr).await,
            Err(ContestError::Unauthorized(_))
        ));

        let oracle = StaticOracle::new().with_cap(addr, 10);
        let cap = cache.verify_and_cache(&oracle, addr, b"proof").await.unwrap();
        assert_eq!(cap, 10);

        // Proof-skipped path now succeeds
        assert_eq!(cache.cached_cap(addr).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_ineligible_is_not_cached() {
        let addr = Address::from_bytes([3; 32]);
        let cache = EligibilityCache::new();
        let oracle = StaticOracle::new();

        assert!(cache.verify_and_cache(&oracle, addr, b"x").await.is_err());
        assert!(cache.cached_cap(addr).await.is_err());
    }
}
