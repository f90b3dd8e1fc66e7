// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Agora Types
//!
//! This crate is the foundational library for the Agora proposal layer,
//! containing all core data structures, error types, and configuration
//! objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `agora-types` has minimal dependencies and is itself a
//! dependency for almost every other crate in the workspace. This structure
//! prevents circular dependencies and provides a stable, canonical definition
//! for shared types like `Proposal`, `StatusDefinition`, `Address`, and the
//! error enums.

/// The maximum size in bytes accepted for a proposal body fetched from the
/// content store.
pub const MAX_CONTENT_BODY_BYTES: usize = 1024 * 1024; // 1 MiB

/// Core application-level data structures like `Proposal` and `Address`.
pub mod app;
/// The canonical JSON codec and content hashing used for integrity checks.
pub mod codec;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Shared configuration structures (e.g., `SyncConfig`, `TransportConfig`).
pub mod service_configs;
