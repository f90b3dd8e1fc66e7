// Path: crates/content/src/lib.rs
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

//! # Agora Content
//!
//! The content-addressing pipeline. A proposal's full text lives in a
//! content-addressed store while the on-chain record keeps only a storage
//! address and a content hash; this crate computes both deterministically
//! *before* anything is uploaded, performs the actual store write after the
//! on-chain transaction confirms, and verifies that the realized address
//! matches the precomputed one.

/// Deterministic content-address computation (pure, no I/O).
pub mod cid;
/// Parsing and rendering of the delimited metadata block.
pub mod frontmatter;
/// An IPFS-HTTP-API-backed content store client.
pub mod ipfs;
/// The two-phase publish and verified-fetch pipeline.
pub mod pipeline;

pub use ipfs::IpfsHttpStore;
pub use pipeline::{ContentPipeline, PendingPublish, PublishReport};
