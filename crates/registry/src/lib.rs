// Path: crates/registry/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Agora Registry
//!
//! The synchronization layer over the on-chain proposal registry: range
//! discovery, batched record reads, merging each record with its
//! content-addressed body, client-side filtering, status-vocabulary
//! resolution with a graceful fallback, and the permission gate for status
//! transitions.

/// The registry sync engine.
pub mod engine;
/// Status vocabulary resolution and the fallback snapshot.
pub mod status;
/// The status transition gate and its permission-session role cache.
pub mod transitions;
/// Sequential-numbering discovery against the external vote system.
pub mod votes;

pub use engine::RegistrySyncEngine;
pub use status::{fallback_vocabulary, INITIAL_STATUS_NAME};
pub use transitions::{allowed_targets, RoleCache, TransitionGate};
