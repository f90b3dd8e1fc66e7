// Path: crates/abi/src/types.rs

//! The closed parameter type grammar and its typed value mirror.

use agora_types::app::Address;
use agora_types::error::AbiError;
use serde::{Deserialize, Serialize};

uint::construct_uint! {
    /// A 256-bit unsigned integer, used for bit-width range checks and to
    /// carry integer argument values of any supported width.
    pub struct U256(4);
}

/// A parameter type drawn from the closed grammar: integer widths, address,
/// boolean, string, fixed/variable bytes, and single-level arrays of any of
/// those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(u16),
    /// Signed integer of the given bit width (8..=256, multiple of 8).
    Int(u16),
    /// A 20-byte account address.
    Address,
    /// A boolean.
    Bool,
    /// Free-form text, carried unchanged.
    String,
    /// A byte string of fixed length (1..=32).
    FixedBytes(usize),
    /// A byte string of any length.
    Bytes,
    /// An array of one of the scalar types above.
    Array(Box<TypeTag>),
}

impl TypeTag {
    /// Parses a type name such as `uint8`, `address`, `bytes32`, or
    /// `uint256[]`. Bare `uint`/`int`/arrays of them normalize to the
    /// 256-bit width. Nested arrays are outside the grammar.
    pub fn parse(name: &str) -> Result<Self, AbiError> {
        if let Some(elem) = name.strip_suffix("[]") {
            let inner = Self::parse(elem)?;
            if matches!(inner, Self::Array(_)) {
                return Err(AbiError::UnsupportedType(name.to_string()));
            }
            return Ok(Self::Array(Box::new(inner)));
        }
        match name {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "string" => return Ok(Self::String),
            "bytes" => return Ok(Self::Bytes),
            "uint" => return Ok(Self::Uint(256)),
            "int" => return Ok(Self::Int(256)),
            _ => {}
        }
        if let Some(width) = name.strip_prefix("uint") {
            return parse_int_width(width, name).map(Self::Uint);
        }
        if let Some(width) = name.strip_prefix("int") {
            return parse_int_width(width, name).map(Self::Int);
        }
        if let Some(len) = name.strip_prefix("bytes") {
            let len: usize = len
                .parse()
                .map_err(|_| AbiError::UnsupportedType(name.to_string()))?;
            if len == 0 || len > 32 {
                return Err(AbiError::UnsupportedType(name.to_string()));
            }
            return Ok(Self::FixedBytes(len));
        }
        Err(AbiError::UnsupportedType(name.to_string()))
    }

    /// The canonical type name, with integer widths always spelled out.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Uint(w) => format!("uint{}", w),
            Self::Int(w) => format!("int{}", w),
            Self::Address => "address".to_string(),
            Self::Bool => "bool".to_string(),
            Self::String => "string".to_string(),
            Self::FixedBytes(n) => format!("bytes{}", n),
            Self::Bytes => "bytes".to_string(),
            Self::Array(elem) => format!("{}[]", elem.canonical_name()),
        }
    }
}

fn parse_int_width(width: &str, full: &str) -> Result<u16, AbiError> {
    let w: u16 = width
        .parse()
        .map_err(|_| AbiError::UnsupportedType(full.to_string()))?;
    if w == 0 || w > 256 || w % 8 != 0 {
        return Err(AbiError::UnsupportedType(full.to_string()));
    }
    Ok(w)
}

/// A validated argument value, tagged to mirror [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// An unsigned integer value.
    Uint(U256),
    /// A signed integer value as sign plus magnitude, so widths above 128
    /// bits are representable.
    Int {
        /// Whether the value is negative. Never set for a zero magnitude.
        negative: bool,
        /// The absolute value.
        magnitude: U256,
    },
    /// An address, original casing preserved.
    Address(Address),
    /// A boolean.
    Bool(bool),
    /// Free-form text, unchanged.
    String(String),
    /// Raw bytes (fixed- or variable-length per the tag).
    Bytes(Vec<u8>),
    /// An array of element values.
    Array(Vec<TypedValue>),
}

impl TypedValue {
    /// Renders the value in its canonical textual form: decimal integers,
    /// `0x`-prefixed hex for addresses and bytes, `true`/`false`, raw text
    /// for strings. Arrays are not leaf values and render elementwise in
    /// the embed codec.
    pub fn render_leaf(&self) -> String {
        match self {
            Self::Uint(v) => v.to_string(),
            Self::Int {
                negative,
                magnitude,
            } => {
                if *negative {
                    format!("-{}", magnitude)
                } else {
                    magnitude.to_string()
                }
            }
            Self::Address(a) => a.as_str().to_string(),
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
            Self::Bytes(b) => format!("0x{}", hex::encode(b)),
            Self::Array(_) => String::new(),
        }
    }
}

/// One typed input of a parsed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInput {
    /// The parameter name, when the interface provides one.
    pub name: Option<String>,
    /// The canonical type name (see [`TypeTag::canonical_name`]).
    pub type_name: String,
    #[serde(skip)]
    pub(crate) tag: Option<TypeTag>,
}

impl FunctionInput {
    pub(crate) fn new(name: Option<String>, tag: TypeTag) -> Self {
        Self {
            name,
            type_name: tag.canonical_name(),
            tag: Some(tag),
        }
    }

    /// The parsed type tag for this input.
    pub fn tag(&self) -> Result<TypeTag, AbiError> {
        match &self.tag {
            Some(t) => Ok(t.clone()),
            None => TypeTag::parse(&self.type_name),
        }
    }
}

/// A function's mutability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Reads neither state nor balance.
    Pure,
    /// Reads state, never modifies it.
    View,
    /// Modifies state, rejects attached value.
    Nonpayable,
    /// Modifies state, accepts attached value.
    Payable,
}

impl Mutability {
    /// Whether calls to this function are read-only (pure or view).
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

/// A callable entry parsed from a contract interface description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFunction {
    /// The function name.
    pub name: String,
    /// Ordered, typed inputs.
    pub inputs: Vec<FunctionInput>,
    /// Mutability classification. Presentational; carries no validation
    /// weight.
    pub mutability: Mutability,
}

impl ParsedFunction {
    /// The canonical signature, `name(type1,type2,...)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.inputs.iter().map(|i| i.type_name.clone()).collect();
        format!("{}({})", self.name, params.join(","))
    }
}

/// One argument of an embedded transaction: the declared type plus the
/// validated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedArgument {
    /// The declared parameter type.
    pub tag: TypeTag,
    /// The validated value.
    pub value: TypedValue,
}

/// A complete on-chain action embedded in a proposal body: target chain,
/// contract, function, and typed arguments.
///
/// Equality ignores the advisory ABI fragment — the canonical text encoding
/// cannot carry it, so two transactions that differ only in the fragment are
/// the same action.
#[derive(Debug, Clone)]
pub struct EmbeddedTransaction {
    /// Free-text chain/network label.
    pub chain: String,
    /// The target contract address.
    pub to: Address,
    /// The function name to call.
    pub function: String,
    /// Ordered, typed argument values.
    pub args: Vec<TypedArgument>,
    /// The interface fragment the call was built from, when available.
    pub fragment: Option<ParsedFunction>,
}

impl PartialEq for EmbeddedTransaction {
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain
            && self.to == other.to
            && self.function == other.function
            && self.args == other.args
    }
}
impl Eq for EmbeddedTransaction {}

impl EmbeddedTransaction {
    /// Builds a transaction without an interface fragment.
    pub fn new(
        chain: impl Into<String>,
        to: Address,
        function: impl Into<String>,
        args: Vec<TypedArgument>,
    ) -> Self {
        Self {
            chain: chain.into(),
            to,
            function: function.into(),
            args,
            fragment: None,
        }
    }

    /// Attaches the originating fragment, checking that the argument count
    /// and types exactly match the fragment's input signature.
    pub fn with_fragment(mut self, fragment: ParsedFunction) -> Result<Self, AbiError> {
        if fragment.name != self.function {
            return Err(AbiError::MalformedEncoding(format!(
                "fragment `{}` does not match function `{}`",
                fragment.name, self.function
            )));
        }
        if fragment.inputs.len() != self.args.len() {
            return Err(AbiError::MalformedEncoding(format!(
                "{} arguments given, fragment expects {}",
                self.args.len(),
                fragment.inputs.len()
            )));
        }
        for (input, arg) in fragment.inputs.iter().zip(&self.args) {
            if input.tag()? != arg.tag {
                return Err(AbiError::MalformedEncoding(format!(
                    "argument type `{}` does not match fragment input `{}`",
                    arg.tag.canonical_name(),
                    input.type_name
                )));
            }
        }
        self.fragment = Some(fragment);
        Ok(self)
    }
}

/// The result of partitioning functions by mutability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Functions callable without a transaction (pure + view).
    pub read_only: Vec<ParsedFunction>,
    /// Functions that require a transaction (nonpayable + payable).
    pub state_changing: Vec<ParsedFunction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_parse_canonical() {
        assert_eq!(TypeTag::parse("uint8").unwrap(), TypeTag::Uint(8));
        assert_eq!(TypeTag::parse("uint").unwrap(), TypeTag::Uint(256));
        assert_eq!(TypeTag::parse("int128").unwrap(), TypeTag::Int(128));
        assert_eq!(TypeTag::parse("bytes32").unwrap(), TypeTag::FixedBytes(32));
        assert_eq!(
            TypeTag::parse("address[]").unwrap(),
            TypeTag::Array(Box::new(TypeTag::Address))
        );
        assert_eq!(
            TypeTag::parse("uint").unwrap().canonical_name(),
            "uint256",
            "bare widths normalize"
        );
    }

    #[test]
    fn type_tag_rejects_out_of_grammar() {
        for bad in ["uint7", "uint0", "uint512", "bytes33", "bytes0", "tuple", "uint8[][]", "fixed128x18"] {
            assert!(TypeTag::parse(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn signature_is_canonical() {
        let f = ParsedFunction {
            name: "transfer".into(),
            inputs: vec![
                FunctionInput::new(Some("to".into()), TypeTag::Address),
                FunctionInput::new(Some("amount".into()), TypeTag::Uint(256)),
            ],
            mutability: Mutability::Nonpayable,
        };
        assert_eq!(f.signature(), "transfer(address,uint256)");
    }

    #[test]
    fn fragment_attachment_checks_signature() {
        let to = Address::parse("0x00000000000000000000000000000000000000aa").unwrap();
        let tx = EmbeddedTransaction::new(
            "mainnet",
            to,
            "transfer",
            vec![TypedArgument {
                tag: TypeTag::Uint(256),
                value: TypedValue::Uint(U256::from(7u64)),
            }],
        );
        let fragment = ParsedFunction {
            name: "transfer".into(),
            inputs: vec![FunctionInput::new(None, TypeTag::Address)],
            mutability: Mutability::Nonpayable,
        };
        assert!(tx.with_fragment(fragment).is_err());
    }
}
