// Path: crates/types/src/app.rs

//! Core data structures for the proposal registry and its content layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::codec::keccak256;

/// A 20-byte account address rendered as `0x`-prefixed hex.
///
/// The original casing is preserved for display, but equality and hashing are
/// case-insensitive: two addresses that differ only in hex casing are the
/// same account.
#[derive(Clone)]
pub struct Address(String);

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Address {
    /// Number of hex digits in a well-formed address (20 bytes).
    pub const HEX_DIGITS: usize = 40;

    /// Parses an address from a `0x`-prefixed, 40-hex-digit string,
    /// preserving its casing.
    pub fn parse(s: &str) -> Result<Self, crate::error::AddressParseError> {
        use crate::error::AddressParseError;
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressParseError::MissingPrefix(s.to_string()))?;
        if digits.len() != Self::HEX_DIGITS {
            return Err(AddressParseError::WrongLength {
                got: digits.len(),
                expected: Self::HEX_DIGITS,
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidHex(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the address as it was originally written, including casing.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}
impl Eq for Address {}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

/// A 32-byte digest of a proposal body's canonical serialization, stored
/// on-chain so clients can cheaply verify off-chain content.
///
/// Serialized as a `0x`-prefixed hex string on every wire format.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentHash({})", hex::encode(self.0))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 32-byte status identifier, derived deterministically from the status's
/// display name so the same name always yields the same identifier.
///
/// Serialized as a `0x`-prefixed hex string on every wire format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusId(pub [u8; 32]);

impl StatusId {
    /// Derives the identifier for a status display name.
    pub fn derive(name: &str) -> Self {
        Self(keccak256(name.as_bytes()))
    }
}

impl std::fmt::Debug for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StatusId({})", hex::encode(self.0))
    }
}

// Hex-string serde for the two 32-byte identifier newtypes.
macro_rules! hex32_serde {
    ($name:ident) => {
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&format!("0x{}", hex::encode(self.0)))
            }
        }
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                let digits = s.strip_prefix("0x").unwrap_or(&s);
                let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
                let arr: [u8; 32] = bytes.try_into().map_err(|_| {
                    serde::de::Error::custom(concat!(
                        stringify!($name),
                        " must be exactly 32 bytes"
                    ))
                })?;
                Ok(Self(arr))
            }
        }
    };
}

hex32_serde!(ContentHash);
hex32_serde!(StatusId);

/// A content-derived storage address (CID) pointing at a proposal body in
/// the content store.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageAddress(pub String);

impl std::fmt::Display for StorageAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for StorageAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StorageAddress({})", self.0)
    }
}

/// A single registered status: display name plus registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    /// The deterministic identifier (see [`StatusId::derive`]).
    pub id: StatusId,
    /// The human-readable display name.
    pub name: String,
    /// Zero-based registration index. Removal of an earlier status leaves a
    /// hole; indices are never reused.
    pub order: u32,
}

/// The ordered status vocabulary resolved from the registry (or the
/// fallback snapshot when the live read fails).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusVocabulary {
    /// Registered statuses in registration order.
    pub entries: Vec<StatusDefinition>,
}

impl StatusVocabulary {
    /// Builds a vocabulary from display names in registration order,
    /// deriving each identifier from its name.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let entries = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| StatusDefinition {
                id: StatusId::derive(name),
                name: name.to_string(),
                order: i as u32,
            })
            .collect();
        Self { entries }
    }

    /// Resolves an identifier to its display name, if registered.
    pub fn name_of(&self, id: &StatusId) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| &d.id == id)
            .map(|d| d.name.as_str())
    }

    /// Resolves a display name to its identifier, if registered.
    pub fn id_of(&self, name: &str) -> Option<StatusId> {
        self.entries.iter().find(|d| d.name == name).map(|d| d.id)
    }

    /// All registered identifiers, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = StatusId> + '_ {
        self.entries.iter().map(|d| d.id)
    }
}

/// A proposal body split into its delimited metadata block and the remaining
/// free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Key/value pairs extracted from the leading metadata block.
    pub frontmatter: BTreeMap<String, String>,
    /// The body text following the metadata block.
    pub body: String,
}

impl ParsedDocument {
    /// Whether the metadata block's own (informational) `status` field
    /// disagrees with the authoritative on-chain status name.
    ///
    /// The two are never reconciled automatically; an explicit re-publish is
    /// required to bring them back in sync.
    pub fn status_discrepancy(&self, on_chain_name: &str) -> bool {
        match self.frontmatter.get("status") {
            Some(embedded) => !embedded.eq_ignore_ascii_case(on_chain_name),
            None => false,
        }
    }
}

/// An immutable entry in a proposal's version history.
///
/// Appended on every content update; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVersionRecord {
    /// Digest of the canonicalized body at this version.
    pub content_hash: ContentHash,
    /// Storage address of the body at this version.
    pub storage_address: StorageAddress,
    /// Unix timestamp at which the version was recorded.
    pub timestamp: u64,
    /// Free-text note describing the change.
    pub change_note: String,
}

/// The raw on-chain record for one proposal number, exactly as the registry
/// returns it and before any content merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// The proposal number this record was read at.
    pub number: u64,
    /// Proposal title.
    pub title: String,
    /// Free-text chain/network label.
    pub chain: String,
    /// The author's account address.
    pub author: Address,
    /// Free-text implementor field.
    pub implementor: String,
    /// Identifier of the current on-chain status.
    pub status: StatusId,
    /// On-chain digest of the current body.
    pub content_hash: ContentHash,
    /// Current content-store pointer.
    pub storage_address: StorageAddress,
    /// Unix creation timestamp.
    pub created_at: u64,
    /// Unix timestamp of the latest update.
    pub updated_at: u64,
    /// Version counter; starts at 1 and increments on each content update.
    pub version: u32,
    /// Identifier of a linked external vote, when one exists.
    pub external_vote_id: Option<String>,
}

impl RegistryRecord {
    /// Whether the registry returned a present, populated record.
    ///
    /// The registry hands back zeroed records for unused numbers, so an
    /// empty title and a zero creation timestamp mean "no such proposal".
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.created_at == 0
    }
}

/// A proposal as consumed by callers: the authoritative on-chain record
/// merged with its externally stored, parsed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Monotonically assigned proposal number.
    pub number: u64,
    /// Proposal title.
    pub title: String,
    /// Free-text chain/network label.
    pub chain: String,
    /// The author's account address.
    pub author: Address,
    /// Free-text implementor field.
    pub implementor: String,
    /// Identifier of the current on-chain status (authoritative).
    pub status: StatusId,
    /// Resolved display name for [`Proposal::status`].
    pub status_name: String,
    /// On-chain digest of the current body.
    pub content_hash: ContentHash,
    /// Current content-store pointer.
    pub storage_address: StorageAddress,
    /// Unix creation timestamp.
    pub created_at: u64,
    /// Unix timestamp of the latest update.
    pub updated_at: u64,
    /// Version counter; equals the length of the version history.
    pub version: u32,
    /// Identifier of a linked external vote, when one exists.
    pub external_vote_id: Option<String>,
    /// The fetched and parsed body content.
    pub document: ParsedDocument,
}

impl Proposal {
    /// Whether the body's embedded status field disagrees with the
    /// authoritative on-chain status.
    pub fn status_discrepancy(&self) -> bool {
        self.document.status_discrepancy(&self.status_name)
    }
}

/// Client-side filter applied after records are fetched and merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalFilter {
    /// Keep only proposals whose resolved status name matches
    /// (case-insensitive). Compared against the on-chain status, not any
    /// value embedded in the content body.
    pub status: Option<String>,
    /// Keep only proposals by this author (case-insensitive address match).
    pub author: Option<Address>,
    /// Keep only proposals with this chain label (case-insensitive).
    pub chain: Option<String>,
}

impl ProposalFilter {
    /// Whether a merged proposal passes the filter.
    pub fn matches(&self, proposal: &Proposal) -> bool {
        if let Some(status) = &self.status {
            if !proposal.status_name.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if &proposal.author != author {
                return false;
            }
        }
        if let Some(chain) = &self.chain {
            if !proposal.chain.eq_ignore_ascii_case(chain) {
                return false;
            }
        }
        true
    }
}

/// Registry events consumed for optimistic cache invalidation.
///
/// Event delivery is best-effort and not required for correctness; a missed
/// event only delays a refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new proposal was created.
    Created {
        /// The new proposal's number.
        number: u64,
    },
    /// A proposal's content was updated (new version appended).
    Updated {
        /// The updated proposal's number.
        number: u64,
        /// The version counter after the update.
        version: u32,
    },
    /// A proposal's status changed.
    StatusChanged {
        /// The affected proposal's number.
        number: u64,
        /// The status identifier after the change.
        status: StatusId,
    },
}

impl RegistryEvent {
    /// The proposal number the event refers to.
    pub fn number(&self) -> u64 {
        match self {
            Self::Created { number }
            | Self::Updated { number, .. }
            | Self::StatusChanged { number, .. } => *number,
        }
    }
}

/// Permission tier used by the status transition gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The proposal's creator. May only request transitions from the fixed
    /// per-status allow-list.
    Author,
    /// A moderator role that may move any proposal to any registered
    /// status. An escape hatch for correction, not a workflow violation.
    Editor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parse_and_case_insensitive_eq() {
        let a = Address::parse("0xAbCd00000000000000000000000000000000Ef12").unwrap();
        let b = Address::parse("0xabcd00000000000000000000000000000000ef12").unwrap();
        assert_eq!(a, b);
        // Display preserves the original casing.
        assert_eq!(a.to_string(), "0xAbCd00000000000000000000000000000000Ef12");
    }

    #[test]
    fn address_parse_rejects_bad_input() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("abcd00000000000000000000000000000000ef12").is_err());
        assert!(Address::parse("0xzzzz00000000000000000000000000000000ef12").is_err());
    }

    #[test]
    fn status_id_is_deterministic() {
        assert_eq!(StatusId::derive("draft"), StatusId::derive("draft"));
        assert_ne!(StatusId::derive("draft"), StatusId::derive("posted"));
    }

    #[test]
    fn vocabulary_resolution() {
        let vocab = StatusVocabulary::from_names(["draft", "ready-for-vote", "posted"]);
        let id = vocab.id_of("ready-for-vote").unwrap();
        assert_eq!(vocab.name_of(&id), Some("ready-for-vote"));
        assert_eq!(vocab.entries[2].order, 2);
        assert!(vocab.name_of(&StatusId::derive("unknown")).is_none());
    }

    #[test]
    fn document_status_discrepancy() {
        let mut doc = ParsedDocument::default();
        assert!(!doc.status_discrepancy("draft"));
        doc.frontmatter
            .insert("status".to_string(), "Draft".to_string());
        assert!(!doc.status_discrepancy("draft"));
        doc.frontmatter
            .insert("status".to_string(), "posted".to_string());
        assert!(doc.status_discrepancy("draft"));
    }

    #[test]
    fn identifiers_serialize_as_hex_strings() {
        let id = StatusId::derive("draft");
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: StatusId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        assert!(serde_json::from_str::<ContentHash>("\"0x1234\"").is_err());
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let proposal = Proposal {
            number: 209,
            title: "Treasury rebalance".into(),
            chain: "Gnosis".into(),
            author: Address::parse("0xabcd00000000000000000000000000000000ef12").unwrap(),
            implementor: "core team".into(),
            status: StatusId::derive("draft"),
            status_name: "draft".into(),
            content_hash: ContentHash([0u8; 32]),
            storage_address: StorageAddress("QmExample".into()),
            created_at: 1,
            updated_at: 1,
            version: 1,
            external_vote_id: None,
            document: ParsedDocument::default(),
        };
        let filter = ProposalFilter {
            status: Some("DRAFT".into()),
            author: Some(Address::parse("0xABCD00000000000000000000000000000000EF12").unwrap()),
            chain: Some("gnosis".into()),
        };
        assert!(filter.matches(&proposal));

        let miss = ProposalFilter {
            status: Some("posted".into()),
            ..Default::default()
        };
        assert!(!miss.matches(&proposal));
    }
}
