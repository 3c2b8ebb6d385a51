//! Semantic (Cadence) parameter types.
//!
//! Types are carried as tags and handed to the external call untouched. The
//! structure is parsed only so composite types (arrays, optionals,
//! dictionaries) can be encoded and rendered.

use crate::error::{Result, TypesError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const INTEGER_TYPES: &[&str] = &[
    "Int", "Int8", "Int16", "Int32", "Int64", "Int128", "Int256",
    "UInt", "UInt8", "UInt16", "UInt32", "UInt64", "UInt128", "UInt256",
    "Word8", "Word16", "Word32", "Word64", "Word128", "Word256",
];

const FIXED_POINT_TYPES: &[&str] = &["Fix64", "UFix64", "Fix128", "UFix128"];

/// A parameter type as declared by a template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// Named type: `UFix64`, `Address`, `A.0x1.Foo.Bar`, ...
    Named(String),
    /// `T?`
    Optional(Box<SemanticType>),
    /// `[T]`
    Array(Box<SemanticType>),
    /// `[T; N]`
    ConstantArray(Box<SemanticType>, usize),
    /// `{K: V}`
    Dictionary(Box<SemanticType>, Box<SemanticType>),
}

impl SemanticType {
    /// Shorthand for a named type.
    pub fn named(name: impl Into<String>) -> Self {
        SemanticType::Named(name.into())
    }

    /// Parse a type from its Cadence notation.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid(s, "empty type"));
        }

        if let Some(inner) = s.strip_suffix('?') {
            return Ok(SemanticType::Optional(Box::new(Self::parse(inner)?)));
        }

        if let Some(inner) = s.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| invalid(s, "unterminated array"))?;
            return match split_top_level(inner, ';') {
                Some((elem, size)) => {
                    let size = size
                        .trim()
                        .parse::<usize>()
                        .map_err(|e| invalid(s, &e.to_string()))?;
                    Ok(SemanticType::ConstantArray(Box::new(Self::parse(elem)?), size))
                }
                None => Ok(SemanticType::Array(Box::new(Self::parse(inner)?))),
            };
        }

        if let Some(inner) = s.strip_prefix('{') {
            let body = inner
                .strip_suffix('}')
                .ok_or_else(|| invalid(s, "unterminated dictionary"))?;
            // `{Receiver}` is a restricted type, not a dictionary.
            if let Some((key, value)) = split_top_level(body, ':') {
                return Ok(SemanticType::Dictionary(
                    Box::new(Self::parse(key)?),
                    Box::new(Self::parse(value)?),
                ));
            }
        }

        if !balanced(s) {
            return Err(invalid(s, "unbalanced brackets"));
        }

        Ok(SemanticType::Named(s.to_string()))
    }

    /// Name of a named type, `None` for structural types.
    pub fn name(&self) -> Option<&str> {
        match self {
            SemanticType::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Signed, unsigned and word integer families.
    pub fn is_integer(&self) -> bool {
        self.name().map_or(false, |n| INTEGER_TYPES.contains(&n))
    }

    /// `Fix64`/`UFix64` and the 128-bit variants.
    pub fn is_fixed_point(&self) -> bool {
        self.name().map_or(false, |n| FIXED_POINT_TYPES.contains(&n))
    }

    /// Width in bits of a sized numeric type. `None` for `Int` and `UInt`.
    pub fn bit_width(&self) -> Option<u32> {
        let name = self.name()?;
        let digits = ["UInt", "Int", "Word", "UFix", "Fix"]
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))?;
        digits.parse().ok()
    }

    /// Whether negative values are out of range.
    pub fn is_unsigned(&self) -> bool {
        self.name()
            .map_or(false, |n| n.starts_with("UInt") || n.starts_with("Word") || n.starts_with("UFix"))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Named(name) => f.write_str(name),
            SemanticType::Optional(inner) => write!(f, "{}?", inner),
            SemanticType::Array(inner) => write!(f, "[{}]", inner),
            SemanticType::ConstantArray(inner, size) => write!(f, "[{}; {}]", inner, size),
            SemanticType::Dictionary(key, value) => write!(f, "{{{}: {}}}", key, value),
        }
    }
}

impl FromStr for SemanticType {
    type Err = TypesError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemanticType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SemanticType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid(ty: &str, reason: &str) -> TypesError {
    TypesError::InvalidType {
        ty: ty.to_string(),
        reason: reason.to_string(),
    }
}

/// Split at the first `sep` outside any brackets.
fn split_top_level(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '{' | '<' | '(' => depth += 1,
            ']' | '}' | '>' | ')' => depth -= 1,
            c if c == sep && depth == 0 => return Some((&s[..i], &s[i + c.len_utf8()..])),
            _ => {}
        }
    }
    None
}

fn balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '[' | '{' | '<' | '(' => depth += 1,
            ']' | '}' | '>' | ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        let ty = SemanticType::parse("UFix64").unwrap();
        assert_eq!(ty, SemanticType::named("UFix64"));
        assert!(ty.is_fixed_point());
        assert!(ty.is_unsigned());
        assert!(!ty.is_integer());
    }

    #[test]
    fn test_parse_structural() {
        assert_eq!(
            SemanticType::parse("[Address]").unwrap(),
            SemanticType::Array(Box::new(SemanticType::named("Address")))
        );
        assert_eq!(
            SemanticType::parse("[UInt8; 32]").unwrap(),
            SemanticType::ConstantArray(Box::new(SemanticType::named("UInt8")), 32)
        );
        assert_eq!(
            SemanticType::parse("{String: [Int]}").unwrap(),
            SemanticType::Dictionary(
                Box::new(SemanticType::named("String")),
                Box::new(SemanticType::Array(Box::new(SemanticType::named("Int")))),
            )
        );
        assert_eq!(
            SemanticType::parse("[String?]?").unwrap(),
            SemanticType::Optional(Box::new(SemanticType::Array(Box::new(
                SemanticType::Optional(Box::new(SemanticType::named("String")))
            ))))
        );
    }

    #[test]
    fn test_restricted_type_is_named() {
        let ty = SemanticType::parse("{FungibleToken.Receiver}").unwrap();
        assert_eq!(ty.name(), Some("{FungibleToken.Receiver}"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(SemanticType::parse("").is_err());
        assert!(SemanticType::parse("[Int").is_err());
        assert!(SemanticType::parse("[Int; x]").is_err());
        assert!(SemanticType::parse("Int]").is_err());
    }

    #[test]
    fn test_display_keeps_notation() {
        for src in ["UFix64", "[Address]", "[UInt8; 32]", "{String: Int}", "Int?"] {
            assert_eq!(SemanticType::parse(src).unwrap().to_string(), src);
        }
    }

    #[test]
    fn test_integer_families() {
        for name in ["Int", "UInt64", "Word8", "Int256"] {
            assert!(SemanticType::named(name).is_integer(), "{name}");
        }
        assert!(!SemanticType::named("Address").is_integer());
        assert!(!SemanticType::named("Int").is_unsigned());
    }
}
