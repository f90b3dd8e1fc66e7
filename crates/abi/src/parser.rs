// Path: crates/abi/src/parser.rs

//! Parsing of contract interface descriptions (ABI JSON) into typed
//! function entries.

use agora_types::error::AbiError;
use serde::Deserialize;

use crate::types::{FunctionInput, Mutability, ParsedFunction, TypeTag};

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<RawInput>,
    #[serde(rename = "stateMutability")]
    state_mutability: Option<String>,
    // Legacy pre-mutability interface fields.
    constant: Option<bool>,
    payable: Option<bool>,
}

#[derive(Deserialize)]
struct RawInput {
    name: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
}

/// Parses an interface description into its callable entries.
///
/// Non-function entries (events, errors, constructors, fallback/receive)
/// are skipped, as are functions whose parameter types fall outside the
/// supported grammar — those cannot be built or displayed here. Invalid
/// JSON or entries missing required fields fail with
/// [`AbiError::MalformedInterface`].
pub fn parse_interface(json: &str) -> Result<Vec<ParsedFunction>, AbiError> {
    let entries: Vec<RawEntry> = serde_json::from_str(json)
        .map_err(|e| AbiError::MalformedInterface(e.to_string()))?;

    let mut functions = Vec::new();
    'entries: for entry in entries {
        let kind = entry
            .kind
            .ok_or_else(|| AbiError::MalformedInterface("entry missing `type`".to_string()))?;
        if kind != "function" {
            continue;
        }
        let name = entry.name.ok_or_else(|| {
            AbiError::MalformedInterface("function entry missing `name`".to_string())
        })?;

        let mut inputs = Vec::with_capacity(entry.inputs.len());
        for input in entry.inputs {
            let type_name = input.type_name.ok_or_else(|| {
                AbiError::MalformedInterface(format!("input of `{}` missing `type`", name))
            })?;
            match TypeTag::parse(&type_name) {
                Ok(tag) => inputs.push(FunctionInput::new(input.name, tag)),
                // Out-of-grammar parameter type: the whole function is
                // unbuildable, skip it rather than failing the interface.
                Err(AbiError::UnsupportedType(_)) => continue 'entries,
                Err(e) => return Err(e),
            }
        }

        let mutability = resolve_mutability(
            entry.state_mutability.as_deref(),
            entry.constant,
            entry.payable,
        )?;

        functions.push(ParsedFunction {
            name,
            inputs,
            mutability,
        });
    }
    Ok(functions)
}

fn resolve_mutability(
    state_mutability: Option<&str>,
    constant: Option<bool>,
    payable: Option<bool>,
) -> Result<Mutability, AbiError> {
    if let Some(m) = state_mutability {
        return match m {
            "pure" => Ok(Mutability::Pure),
            "view" => Ok(Mutability::View),
            "nonpayable" => Ok(Mutability::Nonpayable),
            "payable" => Ok(Mutability::Payable),
            other => Err(AbiError::MalformedInterface(format!(
                "unknown stateMutability `{}`",
                other
            ))),
        };
    }
    // Legacy interfaces predate stateMutability.
    if payable == Some(true) {
        return Ok(Mutability::Payable);
    }
    if constant == Some(true) {
        return Ok(Mutability::View);
    }
    Ok(Mutability::Nonpayable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_functions_and_skips_other_entries() {
        let json = r#"[
            {"type":"constructor","inputs":[{"name":"owner","type":"address"}]},
            {"type":"event","name":"Submitted","inputs":[{"name":"id","type":"uint256"}]},
            {"type":"function","name":"submit","stateMutability":"nonpayable",
             "inputs":[{"name":"title","type":"string"},{"name":"hash","type":"bytes32"}]},
            {"type":"function","name":"count","stateMutability":"view","inputs":[]}
        ]"#;
        let functions = parse_interface(json).unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].signature(), "submit(string,bytes32)");
        assert_eq!(functions[1].mutability, Mutability::View);
    }

    #[test]
    fn skips_functions_with_unsupported_parameter_types() {
        let json = r#"[
            {"type":"function","name":"configure","stateMutability":"nonpayable",
             "inputs":[{"name":"params","type":"tuple"}]},
            {"type":"function","name":"ping","stateMutability":"pure","inputs":[]}
        ]"#;
        let functions = parse_interface(json).unwrap();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "ping");
    }

    #[test]
    fn legacy_mutability_fields() {
        let json = r#"[
            {"type":"function","name":"get","constant":true,"inputs":[]},
            {"type":"function","name":"fund","payable":true,"inputs":[]},
            {"type":"function","name":"set","inputs":[{"name":"v","type":"uint256"}]}
        ]"#;
        let functions = parse_interface(json).unwrap();
        assert_eq!(functions[0].mutability, Mutability::View);
        assert_eq!(functions[1].mutability, Mutability::Payable);
        assert_eq!(functions[2].mutability, Mutability::Nonpayable);
    }

    #[test]
    fn malformed_interface_is_a_typed_error() {
        assert!(matches!(
            parse_interface("not json"),
            Err(AbiError::MalformedInterface(_))
        ));
        assert!(matches!(
            parse_interface(r#"[{"name":"orphan"}]"#),
            Err(AbiError::MalformedInterface(_))
        ));
        assert!(matches!(
            parse_interface(r#"[{"type":"function"}]"#),
            Err(AbiError::MalformedInterface(_))
        ));
    }
}
