// Path: crates/rpc/src/lib.rs
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

//! # Agora RPC
//!
//! The concrete JSON-RPC plumbing: a load-balanced, retrying transport
//! over multiple HTTP endpoints, and the typed registry client that maps
//! the proposal registry's entry points onto it.

/// The typed registry client.
pub mod registry;
/// The HTTP JSON-RPC transport.
pub mod transport;

pub use registry::RegistryClient;
pub use transport::HttpTransport;
