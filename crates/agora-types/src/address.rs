use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte participant identity
///
/// Plays the role of both caller identity and payout recipient. The all-zero
/// address is the null identity and is never a valid payout target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Address([u8; 32]);

impl Address {
    /// The null identity
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([1; 32]).is_zero());
    }

    #[test]
    fn test_hex_round_trip() {
        let addr = Address::from_bytes([0xAB; 32]);
        let full = format!("0x{}", hex::encode(addr.as_bytes()));
        assert_eq!(Address::from_hex(&full), Some(addr));
        assert_eq!(Address::from_hex("0xdeadbeef"), None);
    }

    #[test]
    fn test_display_truncates() {
        let addr = Address::from_bytes([0xFF; 32]);
        assert_eq!(format!("{}", addr), "0xffffffffffffffff");
    }
}
