// Path: crates/abi/src/validate.rs

//! Validation and coercion of free-text user input into typed argument
//! values.

use agora_types::app::Address;
use agora_types::error::ValidationError;

use crate::types::{TypeTag, TypedValue, U256};

/// Validates a raw input string against a parameter type and coerces it
/// into a [`TypedValue`].
///
/// Rules per type:
/// - integers: base-10, optional leading `-` for signed types, bounds
///   checked against the bit width;
/// - address: `0x` + 40 hex digits, casing preserved;
/// - bool: exactly `true` or `false`;
/// - string: any text, unchanged;
/// - bytes / bytesN: hex with optional `0x` prefix, length-checked for
///   fixed sizes;
/// - arrays: the input is split on `,`, each element validated against the
///   element type; the first invalid element fails the whole array with its
///   index in the error.
pub fn validate_input(raw: &str, tag: &TypeTag) -> Result<TypedValue, ValidationError> {
    match tag {
        TypeTag::Uint(width) => validate_uint(raw.trim(), *width, tag),
        TypeTag::Int(width) => validate_int(raw.trim(), *width, tag),
        TypeTag::Address => {
            let addr = Address::parse(raw.trim())?;
            Ok(TypedValue::Address(addr))
        }
        TypeTag::Bool => match raw.trim() {
            "true" => Ok(TypedValue::Bool(true)),
            "false" => Ok(TypedValue::Bool(false)),
            other => Err(ValidationError::NotABoolean {
                raw: other.to_string(),
            }),
        },
        TypeTag::String => Ok(TypedValue::String(raw.to_string())),
        TypeTag::FixedBytes(len) => {
            let bytes = decode_hex(raw.trim())?;
            if bytes.len() != *len {
                return Err(ValidationError::WrongByteLength {
                    got: bytes.len(),
                    expected: *len,
                });
            }
            Ok(TypedValue::Bytes(bytes))
        }
        TypeTag::Bytes => Ok(TypedValue::Bytes(decode_hex(raw.trim())?)),
        TypeTag::Array(elem) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(TypedValue::Array(Vec::new()));
            }
            let mut values = Vec::new();
            for (index, part) in trimmed.split(',').enumerate() {
                let value =
                    validate_input(part, elem).map_err(|source| ValidationError::ArrayElement {
                        index,
                        source: Box::new(source),
                    })?;
                values.push(value);
            }
            Ok(TypedValue::Array(values))
        }
    }
}

fn validate_uint(raw: &str, width: u16, tag: &TypeTag) -> Result<TypedValue, ValidationError> {
    if let Some(stripped) = raw.strip_prefix('-') {
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::UnexpectedSign {
                raw: raw.to_string(),
                type_name: tag.canonical_name(),
            });
        }
    }
    let value = parse_decimal(raw, tag)?;
    if bit_width_of(&value) > u32::from(width) {
        return Err(ValidationError::OutOfRange {
            raw: raw.to_string(),
            type_name: tag.canonical_name(),
        });
    }
    Ok(TypedValue::Uint(value))
}

fn validate_int(raw: &str, width: u16, tag: &TypeTag) -> Result<TypedValue, ValidationError> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let magnitude = parse_decimal(digits, tag)?;

    // Two's complement bounds: [-2^(w-1), 2^(w-1) - 1].
    let half = U256::one() << (u32::from(width) - 1);
    let in_range = if negative {
        magnitude <= half
    } else {
        magnitude < half
    };
    if !in_range {
        return Err(ValidationError::OutOfRange {
            raw: raw.to_string(),
            type_name: tag.canonical_name(),
        });
    }
    Ok(TypedValue::Int {
        negative: negative && !magnitude.is_zero(),
        magnitude,
    })
}

fn parse_decimal(digits: &str, tag: &TypeTag) -> Result<U256, ValidationError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger {
            raw: digits.to_string(),
        });
    }
    U256::from_dec_str(digits).map_err(|_| ValidationError::OutOfRange {
        raw: digits.to_string(),
        type_name: tag.canonical_name(),
    })
}

fn bit_width_of(value: &U256) -> u32 {
    (256 - value.leading_zeros()) as u32
}

fn decode_hex(raw: &str) -> Result<Vec<u8>, ValidationError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.len() % 2 != 0 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::NotHex {
            raw: raw.to_string(),
        });
    }
    hex::decode(digits).map_err(|_| ValidationError::NotHex {
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::error::ErrorCode;

    #[test]
    fn uint8_bounds() {
        assert_eq!(
            validate_input("255", &TypeTag::Uint(8)).unwrap(),
            TypedValue::Uint(U256::from(255u64))
        );
        let err = validate_input("300", &TypeTag::Uint(8)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(err.code(), "VALIDATE_OUT_OF_RANGE");
    }

    #[test]
    fn uint_rejects_sign_and_junk() {
        assert!(matches!(
            validate_input("-1", &TypeTag::Uint(256)).unwrap_err(),
            ValidationError::UnexpectedSign { .. }
        ));
        assert!(matches!(
            validate_input("12.5", &TypeTag::Uint(256)).unwrap_err(),
            ValidationError::NotAnInteger { .. }
        ));
        assert!(matches!(
            validate_input("0x10", &TypeTag::Uint(256)).unwrap_err(),
            ValidationError::NotAnInteger { .. }
        ));
    }

    #[test]
    fn uint256_accepts_max_value() {
        let max = U256::max_value().to_string();
        assert_eq!(
            validate_input(&max, &TypeTag::Uint(256)).unwrap(),
            TypedValue::Uint(U256::max_value())
        );
        // One past the maximum overflows the parse itself.
        let over = format!("{}0", max);
        assert!(matches!(
            validate_input(&over, &TypeTag::Uint(256)).unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
    }

    #[test]
    fn int8_two_complement_bounds() {
        assert!(validate_input("127", &TypeTag::Int(8)).is_ok());
        assert!(validate_input("-128", &TypeTag::Int(8)).is_ok());
        assert!(validate_input("128", &TypeTag::Int(8)).is_err());
        assert!(validate_input("-129", &TypeTag::Int(8)).is_err());
    }

    #[test]
    fn negative_zero_normalizes() {
        let v = validate_input("-0", &TypeTag::Int(8)).unwrap();
        assert_eq!(
            v,
            TypedValue::Int {
                negative: false,
                magnitude: U256::zero()
            }
        );
    }

    #[test]
    fn address_length_checked_case_preserved() {
        assert!(validate_input("0x1234", &TypeTag::Address).is_err());
        let v = validate_input("0xAbCd00000000000000000000000000000000Ef12", &TypeTag::Address)
            .unwrap();
        match v {
            TypedValue::Address(a) => {
                assert_eq!(a.as_str(), "0xAbCd00000000000000000000000000000000Ef12")
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn bool_accepts_only_canonical_spellings() {
        assert_eq!(
            validate_input("true", &TypeTag::Bool).unwrap(),
            TypedValue::Bool(true)
        );
        assert!(validate_input("True", &TypeTag::Bool).is_err());
        assert!(validate_input("1", &TypeTag::Bool).is_err());
    }

    #[test]
    fn bytes_length_rules() {
        assert!(validate_input("0xdeadbeef", &TypeTag::FixedBytes(4)).is_ok());
        assert!(matches!(
            validate_input("0xdeadbe", &TypeTag::FixedBytes(4)).unwrap_err(),
            ValidationError::WrongByteLength {
                got: 3,
                expected: 4
            }
        ));
        assert!(validate_input("deadbeef00", &TypeTag::Bytes).is_ok());
        assert!(validate_input("0xabc", &TypeTag::Bytes).is_err()); // odd length
        assert!(validate_input("0xzz", &TypeTag::Bytes).is_err());
    }

    #[test]
    fn array_reports_failing_index() {
        let tag = TypeTag::Array(Box::new(TypeTag::Uint(8)));
        let ok = validate_input("1, 2, 3", &tag).unwrap();
        assert_eq!(
            ok,
            TypedValue::Array(vec![
                TypedValue::Uint(U256::from(1u64)),
                TypedValue::Uint(U256::from(2u64)),
                TypedValue::Uint(U256::from(3u64)),
            ])
        );
        let err = validate_input("1,2,999", &tag).unwrap_err();
        match err {
            ValidationError::ArrayElement { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {:?}", other),
        }
        // Empty input is an empty array, not a single empty element.
        assert_eq!(validate_input("", &tag).unwrap(), TypedValue::Array(vec![]));
    }
}
