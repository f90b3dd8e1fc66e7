// Path: crates/abi/src/embed.rs

//! The canonical single-line text encoding for embedded transactions.
//!
//! Grammar: `tx!<chain>|<address>|<function>|<args>`, where `<args>` is a
//! comma-separated list of `<type>:<payload>` pairs. Free-text fields and
//! argument payloads are percent-escaped so the field and argument
//! delimiters can never collide with content. Array payloads carry a
//! `count;` prefix and escape their elements a second time, so element
//! commas survive the outer layer and an empty array stays distinct from
//! an array of one empty string.
//!
//! `decode` is the exact inverse of `encode` for every valid transaction.
//! The advisory ABI fragment is not carried by the encoding.

use agora_types::app::Address;
use agora_types::error::AbiError;

use crate::types::{EmbeddedTransaction, TypeTag, TypedArgument, TypedValue};
use crate::validate::validate_input;

const PREFIX: &str = "tx!";

/// Renders a transaction to its canonical single-line form.
pub fn encode(tx: &EmbeddedTransaction) -> String {
    let args: Vec<String> = tx.args.iter().map(render_argument).collect();
    format!(
        "{}{}|{}|{}|{}",
        PREFIX,
        escape(&tx.chain),
        tx.to.as_str(),
        escape(&tx.function),
        args.join(",")
    )
}

/// Parses a canonical single-line form back into a transaction.
///
/// Malformed input fails with [`AbiError::MalformedEncoding`] so callers
/// can fall back to displaying the raw string.
pub fn decode(s: &str) -> Result<EmbeddedTransaction, AbiError> {
    let body = s
        .strip_prefix(PREFIX)
        .ok_or_else(|| malformed("missing tx! prefix"))?;
    let fields: Vec<&str> = body.split('|').collect();
    let [chain, address, function, args] = fields.as_slice() else {
        return Err(malformed("expected 4 |-separated fields"));
    };

    let to = Address::parse(address).map_err(|e| malformed(&e.to_string()))?;
    let args = if args.is_empty() {
        Vec::new()
    } else {
        args.split(',')
            .map(parse_argument)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(EmbeddedTransaction::new(
        unescape(chain)?,
        to,
        unescape(function)?,
        args,
    ))
}

fn render_argument(arg: &TypedArgument) -> String {
    let payload = match (&arg.tag, &arg.value) {
        (TypeTag::Array(_), TypedValue::Array(elements)) => {
            // Count-prefixed so an empty array and an array of one empty
            // string stay distinguishable after the join.
            let inner: Vec<String> = elements
                .iter()
                .map(|e| escape(&e.render_leaf()))
                .collect();
            escape(&format!("{};{}", elements.len(), inner.join(",")))
        }
        (_, value) => escape(&value.render_leaf()),
    };
    format!("{}:{}", arg.tag.canonical_name(), payload)
}

fn parse_argument(part: &str) -> Result<TypedArgument, AbiError> {
    let (type_name, payload) = part
        .split_once(':')
        .ok_or_else(|| malformed("argument missing `:` separator"))?;
    let tag = TypeTag::parse(type_name)
        .map_err(|e| malformed(&format!("argument type: {}", e)))?;
    let raw = unescape(payload)?;

    let value = match &tag {
        TypeTag::Array(elem) => {
            let (count, rest) = raw
                .split_once(';')
                .ok_or_else(|| malformed("array payload missing element count"))?;
            let count: usize = count
                .parse()
                .map_err(|_| malformed("array payload has a bad element count"))?;
            if count == 0 {
                if !rest.is_empty() {
                    return Err(malformed("empty array carries trailing elements"));
                }
                TypedValue::Array(Vec::new())
            } else {
                let parts: Vec<&str> = rest.split(',').collect();
                if parts.len() != count {
                    return Err(malformed(&format!(
                        "array declares {} elements, found {}",
                        count,
                        parts.len()
                    )));
                }
                let elements = parts
                    .into_iter()
                    .map(|e| {
                        let leaf = unescape(e)?;
                        coerce_leaf(&leaf, elem)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                TypedValue::Array(elements)
            }
        }
        scalar => coerce_leaf(&raw, scalar)?,
    };
    Ok(TypedArgument { tag, value })
}

fn coerce_leaf(raw: &str, tag: &TypeTag) -> Result<TypedValue, AbiError> {
    validate_input(raw, tag)
        .map_err(|e| malformed(&format!("argument value `{}`: {}", raw, e)))
}

fn malformed(msg: &str) -> AbiError {
    AbiError::MalformedEncoding(msg.to_string())
}

// Reserved characters: the escape marker itself, the field and argument
// delimiters, the type separator, and line breaks (the encoding is
// single-line by contract).
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            '|' => out.push_str("%7C"),
            ',' => out.push_str("%2C"),
            ':' => out.push_str("%3A"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(s: &str) -> Result<String, AbiError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let code: String = chars.by_ref().take(2).collect();
        match code.as_str() {
            "25" => out.push('%'),
            "7C" => out.push('|'),
            "2C" => out.push(','),
            "3A" => out.push(':'),
            "0A" => out.push('\n'),
            "0D" => out.push('\r'),
            other => return Err(malformed(&format!("bad escape `%{}`", other))),
        }
    }
    Ok(out)
}
