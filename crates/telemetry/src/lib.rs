// Path: crates/telemetry/src/lib.rs
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

//! # Agora Telemetry
//!
//! Structured logging initialization shared by every binary embedding the
//! proposal layer.

/// The initialization routine for global structured logging.
pub mod init;

pub use init::init_tracing;
