// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Agora API
//!
//! The trait seams of the proposal layer. Concrete I/O lives behind these
//! traits so the sync engine and content pipeline can be exercised against
//! in-memory fakes, and so transports and stores can be swapped without
//! touching the components that use them.

/// The pluggable content-addressed store seam.
pub mod content;
/// The on-chain proposal registry seam.
pub mod registry;
/// The JSON-RPC transport seam.
pub mod transport;
/// The external (off-chain) vote system seam.
pub mod votes;

pub use content::{ContentStore, PutMetadata};
pub use registry::ProposalRegistry;
pub use transport::{RpcCall, RpcTransport};
pub use votes::{ExternalVote, ExternalVoteClient, VoteSpec};
