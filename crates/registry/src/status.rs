// Path: crates/registry/src/status.rs

//! Status vocabulary resolution.
//!
//! The registry's status set is dynamic: statuses can be registered and
//! removed after deployment, so the vocabulary is data fetched at runtime,
//! not a source-level enum. When the live read fails the engine degrades to
//! a last-known snapshot instead of breaking every caller.

use agora_types::app::StatusVocabulary;

/// The status assigned to every proposal at creation.
pub const INITIAL_STATUS_NAME: &str = "draft";

/// Last-known vocabulary snapshot, in registration order. Used only when
/// the live read fails.
pub const FALLBACK_STATUS_NAMES: [&str; 3] = ["draft", "ready-for-vote", "posted"];

/// Builds the fallback vocabulary snapshot.
pub fn fallback_vocabulary() -> StatusVocabulary {
    StatusVocabulary::from_names(FALLBACK_STATUS_NAMES)
}

/// The transitions an author may request, keyed by the current status's
/// display name. Editors are not subject to this list.
pub fn author_allow_list(current_name: &str) -> &'static [&'static str] {
    match current_name {
        "draft" => &["ready-for-vote"],
        "ready-for-vote" => &["draft"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_three_entries_in_order() {
        let vocab = fallback_vocabulary();
        let names: Vec<&str> = vocab.entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["draft", "ready-for-vote", "posted"]);
        assert_eq!(vocab.entries[0].order, 0);
    }

    #[test]
    fn authors_may_only_shuttle_between_draft_and_ready() {
        assert_eq!(author_allow_list("draft"), ["ready-for-vote"]);
        assert_eq!(author_allow_list("ready-for-vote"), ["draft"]);
        assert!(author_allow_list("posted").is_empty());
        assert!(author_allow_list("anything-else").is_empty());
    }
}
