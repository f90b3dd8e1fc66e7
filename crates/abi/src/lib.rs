// Path: crates/abi/src/lib.rs
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

//! # Agora ABI
//!
//! Pure, stateless parsing, validation, and formatting of contract
//! interface descriptions and embedded call data. Proposals use this to
//! carry arbitrary on-chain actions in their body text: an interface JSON
//! is parsed into typed function descriptions, free-text user input is
//! validated and coerced into typed arguments, and the resulting call is
//! rendered to (and parsed back from) a canonical single-line string.
//!
//! Nothing in this crate performs I/O or holds state.

mod embed;
mod parser;
mod types;
mod validate;

pub use embed::{decode, encode};
pub use parser::parse_interface;
pub use types::{
    Classified, EmbeddedTransaction, FunctionInput, Mutability, ParsedFunction, TypeTag,
    TypedArgument, TypedValue, U256,
};
pub use validate::validate_input;

/// Partitions functions into read-only (pure + view) and state-changing
/// (nonpayable + payable) groups for display filtering.
///
/// The partition is presentational only and carries no validation weight;
/// no function is ever dropped or duplicated.
pub fn classify(functions: Vec<ParsedFunction>) -> Classified {
    let mut out = Classified::default();
    for f in functions {
        if f.mutability.is_read_only() {
            out.read_only.push(f);
        } else {
            out.state_changing.push(f);
        }
    }
    out
}
