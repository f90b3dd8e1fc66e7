// Path: crates/api/src/votes.rs

//! The seam over the external off-chain vote system.
//!
//! The proposal layer uses this interface for two things only: creating a
//! vote for a posted proposal, and listing existing votes to discover the
//! highest previously used proposal number for sequential numbering
//! validation. The voting flow itself lives elsewhere.

use agora_types::error::TransportError;
use async_trait::async_trait;

/// The inputs needed to open an external vote for a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteSpec {
    /// The voting space the vote is created in.
    pub space: String,
    /// Vote title; by convention it leads with the proposal number.
    pub title: String,
    /// Vote body text.
    pub body: String,
    /// The selectable choices.
    pub choices: Vec<String>,
}

/// A previously created external vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalVote {
    /// The vote system's identifier.
    pub id: String,
    /// The vote title as created.
    pub title: String,
}

/// Client for the external vote system.
#[async_trait]
pub trait ExternalVoteClient: Send + Sync {
    /// Creates a vote and returns its identifier.
    async fn create_vote(&self, spec: &VoteSpec) -> Result<String, TransportError>;

    /// Lists votes previously created in a space.
    async fn get_votes(&self, space: &str) -> Result<Vec<ExternalVote>, TransportError>;
}
