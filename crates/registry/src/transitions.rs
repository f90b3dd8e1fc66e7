// Path: crates/registry/src/transitions.rs

//! The status transition gate.
//!
//! Transitions run under two permission tiers: authors may only request
//! the fixed per-status allow-list, while editors may move a proposal to
//! any registered status. The gate mirrors the registry contract's own
//! enforcement client-side so an unauthorized request fails before any
//! network call; it never replaces the contract as the real boundary.

use std::collections::BTreeSet;
use std::sync::Arc;

use agora_api::registry::ProposalRegistry;
use agora_types::app::{Address, Role, StatusId, StatusVocabulary};
use agora_types::error::TransitionError;
use dashmap::DashMap;

use crate::status::author_allow_list;

/// The set of target statuses a caller may request from the current one.
///
/// Pure: evaluated entirely from the role, the current status name, and
/// the registered vocabulary.
pub fn allowed_targets(
    role: Role,
    current_name: &str,
    vocabulary: &StatusVocabulary,
) -> BTreeSet<StatusId> {
    match role {
        // Editors may correct a proposal into any registered status.
        Role::Editor => vocabulary.ids().collect(),
        Role::Author => author_allow_list(current_name)
            .iter()
            .filter_map(|name| vocabulary.id_of(name))
            .collect(),
    }
}

/// Client-side gate in front of the registry's status-change entry point.
pub struct TransitionGate<R: ?Sized> {
    registry: Arc<R>,
}

impl<R: ProposalRegistry + ?Sized> TransitionGate<R> {
    /// Builds a gate over a shared registry client.
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Requests a status transition.
    ///
    /// The permission check runs first and rejects locally with
    /// [`TransitionError::Unauthorized`]; only a permitted request is
    /// submitted. An on-chain rejection (insufficient role, paused
    /// contract, invalid target) is surfaced verbatim.
    pub async fn request_transition(
        &self,
        role: Role,
        number: u64,
        current: &StatusId,
        target_name: &str,
        vocabulary: &StatusVocabulary,
    ) -> Result<(), TransitionError> {
        let current_name = vocabulary
            .name_of(current)
            .ok_or_else(|| TransitionError::UnknownStatus(format!("{:?}", current)))?;
        let target = vocabulary
            .id_of(target_name)
            .ok_or_else(|| TransitionError::UnknownStatus(target_name.to_string()))?;

        if !allowed_targets(role, current_name, vocabulary).contains(&target) {
            return Err(TransitionError::Unauthorized {
                role,
                from: current_name.to_string(),
                to: target_name.to_string(),
            });
        }

        self.registry
            .request_status_change(number, target_name)
            .await?;
        Ok(())
    }
}

/// Role lookups cached for one permission session (one page view).
///
/// The cache is keyed by account address and scoped to the wallet it was
/// created for; switching wallets starts a fresh scope rather than
/// carrying stale entries across identities.
pub struct RoleCache {
    wallet: Address,
    roles: DashMap<Address, Role>,
}

impl RoleCache {
    /// Opens a permission session for the given wallet.
    pub fn new(wallet: Address) -> Self {
        Self {
            wallet,
            roles: DashMap::new(),
        }
    }

    /// The wallet this session belongs to.
    pub fn wallet(&self) -> &Address {
        &self.wallet
    }

    /// Looks up a cached role.
    pub fn get(&self, address: &Address) -> Option<Role> {
        self.roles.get(address).map(|r| *r.value())
    }

    /// Caches a resolved role.
    pub fn insert(&self, address: Address, role: Role) {
        self.roles.insert(address, role);
    }

    /// Re-scopes the session to a wallet, clearing every cached entry when
    /// the wallet actually changed.
    pub fn rescope(&mut self, wallet: Address) {
        if self.wallet != wallet {
            self.roles.clear();
            self.wallet = wallet;
        }
    }
}
