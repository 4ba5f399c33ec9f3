//! Prometheus metrics for the contest engine
//!
//! Tracks proposal submissions, voting activity, and id computations.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

/// Proposals accepted into the registry
pub static PROPOSALS_SUBMITTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "agora_contest_proposals_submitted_total",
        "Total proposals accepted into the registry"
    )
    .unwrap()
});

/// Votes cast, by direction
pub static VOTES_CAST: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "agora_contest_votes_cast_total",
        "Total votes cast",
        &["support"]
    )
    .unwrap()
});

/// Applied (decay-weighted) vote weight distribution
pub static VOTE_WEIGHT: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "agora_contest_vote_weight",
        "Applied vote weight distribution",
        vec![1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0]
    )
    .unwrap()
});

/// Content-addressed proposal id computations
pub static PROPOSAL_ID_COMPUTATIONS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "agora_contest_proposal_id_computations_total",
        "Total canonical proposal id computations"
    )
    .unwrap()
});
