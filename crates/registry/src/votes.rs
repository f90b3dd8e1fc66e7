// Path: crates/registry/src/votes.rs

//! Sequential-numbering discovery against the external vote system.
//!
//! Numbers are assigned monotonically by the registry, but votes created in
//! the external system before this registry existed also occupy numbers.
//! Before assigning the next number, callers cross-check the highest number
//! already used in the voting space.

use agora_api::votes::ExternalVoteClient;
use agora_types::error::TransportError;

/// Extracts the proposal number from a vote title.
///
/// By convention the title leads with the number (`"212: ..."` or
/// `"PIP-212: ..."`); the first run of digits wins.
pub fn number_in_title(title: &str) -> Option<u64> {
    let start = title.find(|c: char| c.is_ascii_digit())?;
    let digits: String = title
        .get(start..)?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// The highest proposal number already used in a voting space, if any vote
/// titles carry one.
pub async fn highest_used_number<V: ExternalVoteClient + ?Sized>(
    client: &V,
    space: &str,
) -> Result<Option<u64>, TransportError> {
    let votes = client.get_votes(space).await?;
    Ok(votes
        .iter()
        .filter_map(|v| number_in_title(&v.title))
        .max())
}

/// Validates a registry-proposed next number against the voting space,
/// returning the first number that is free on both sides.
pub async fn next_free_number<V: ExternalVoteClient + ?Sized>(
    client: &V,
    space: &str,
    registry_next: u64,
) -> Result<u64, TransportError> {
    let highest = highest_used_number(client, space).await?;
    Ok(match highest {
        Some(h) if h.saturating_add(1) > registry_next => h.saturating_add(1),
        _ => registry_next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_api::votes::{ExternalVote, VoteSpec};
    use async_trait::async_trait;

    struct FixedVotes(Vec<ExternalVote>);

    #[async_trait]
    impl ExternalVoteClient for FixedVotes {
        async fn create_vote(&self, _spec: &VoteSpec) -> Result<String, TransportError> {
            Ok("vote-id".to_string())
        }
        async fn get_votes(&self, _space: &str) -> Result<Vec<ExternalVote>, TransportError> {
            Ok(self.0.clone())
        }
    }

    fn vote(title: &str) -> ExternalVote {
        ExternalVote {
            id: "x".into(),
            title: title.into(),
        }
    }

    #[test]
    fn titles_yield_their_leading_number() {
        assert_eq!(number_in_title("212: Fund the grants round"), Some(212));
        assert_eq!(number_in_title("PIP-209: Treasury"), Some(209));
        assert_eq!(number_in_title("no number here"), None);
    }

    #[tokio::test]
    async fn numbering_respects_the_voting_space() {
        let client = FixedVotes(vec![vote("PIP-210: a"), vote("211: b"), vote("untitled")]);
        assert_eq!(
            highest_used_number(&client, "space").await.unwrap(),
            Some(211)
        );
        // Registry counter lags the voting space.
        assert_eq!(next_free_number(&client, "space", 210).await.unwrap(), 212);
        // Registry counter is already ahead.
        assert_eq!(next_free_number(&client, "space", 300).await.unwrap(), 300);
    }

    #[tokio::test]
    async fn empty_space_defers_to_the_registry() {
        let client = FixedVotes(vec![]);
        assert_eq!(highest_used_number(&client, "space").await.unwrap(), None);
        assert_eq!(next_free_number(&client, "space", 209).await.unwrap(), 209);
    }
}
