//! Prometheus metrics for the reward ledger

use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Successful payouts, by asset
pub static PAYMENTS_RELEASED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "agora_rewards_payments_released_total",
        "Total reward payments released",
        &["asset"]
    )
    .unwrap()
});

/// Creator sweeps of the vault
pub static REWARDS_WITHDRAWN: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "agora_rewards_withdrawn_total",
        "Total creator reward withdrawals"
    )
    .unwrap()
});
