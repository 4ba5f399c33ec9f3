use agora_types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset handled by the reward ledger
///
/// Either the environment's native currency or a fungible token identified
/// by its contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Native,
    Token(Address),
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Token(addr) => write!(f, "token:{}", addr),
        }
    }
}

/// Amount in base units
///
/// All reward math is integer math; proportional splits use floor division
/// so rounding dust stays with the ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AssetAmount(u128);

impl AssetAmount {
    pub const ZERO: Self = Self(0);

    pub fn from_units(units: u128) -> Self {
        Self(units)
    }

    pub fn to_units(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(&self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `self * shares / total_shares`, floor division
    ///
    /// Returns None if the intermediate product overflows u128.
    pub fn mul_div(&self, shares: u64, total_shares: u64) -> Option<Self> {
        debug_assert!(total_shares > 0);
        self.0
            .checked_mul(shares as u128)
            .map(|product| Self(product / total_shares as u128))
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
