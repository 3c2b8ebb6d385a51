//! JSON-Cadence value codec.
//!
//! Arguments travel as `{"type": T, "value": v}` objects. Integers and
//! fixed-point numbers are always strings on the wire.

use crate::error::{Result, TypesError};
use crate::semantic_type::SemanticType;
use num_bigint::BigInt;
use serde_json::{json, Map, Value};

/// Maximum fractional digits of a fixed-point value.
pub const FIXED_POINT_SCALE: usize = 8;

/// Hex digits in an account address.
pub const ADDRESS_HEX_DIGITS: usize = 16;

const COMPOSITE_KINDS: &[&str] = &["Struct", "Resource", "Event", "Contract", "Enum"];

/// Encode a plain JSON value as JSON-Cadence of type `ty`.
pub fn encode(value: &Value, ty: &SemanticType) -> Result<Value> {
    match ty {
        SemanticType::Optional(inner) => {
            if value.is_null() {
                Ok(json!({ "type": "Optional", "value": null }))
            } else {
                Ok(json!({ "type": "Optional", "value": encode(value, inner)? }))
            }
        }
        SemanticType::Array(inner) => encode_array(value, inner, ty, None),
        SemanticType::ConstantArray(inner, size) => encode_array(value, inner, ty, Some(*size)),
        SemanticType::Dictionary(key_ty, value_ty) => {
            let entries = value
                .as_object()
                .ok_or_else(|| invalid(ty, "expected an object"))?;
            let encoded = entries
                .iter()
                .map(|(k, v)| {
                    Ok(json!({
                        "key": encode(&Value::String(k.clone()), key_ty)?,
                        "value": encode(v, value_ty)?,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(json!({ "type": "Dictionary", "value": encoded }))
        }
        SemanticType::Named(name) => encode_named(value, ty, name),
    }
}

fn encode_array(value: &Value, inner: &SemanticType, ty: &SemanticType, size: Option<usize>) -> Result<Value> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(ty, "expected an array"))?;
    if let Some(size) = size {
        if items.len() != size {
            return Err(invalid(ty, &format!("expected {} elements, got {}", size, items.len())));
        }
    }
    let encoded = items
        .iter()
        .map(|item| encode(item, inner))
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({ "type": "Array", "value": encoded }))
}

fn encode_named(value: &Value, ty: &SemanticType, name: &str) -> Result<Value> {
    if ty.is_integer() {
        let digits = numeric_text(value, ty)?;
        check_integer(&digits, ty)?;
        if let Some(bits) = ty.bit_width() {
            check_range(&digits, &digits, bits, ty)?;
        }
        return Ok(json!({ "type": name, "value": digits }));
    }

    if ty.is_fixed_point() {
        let text = numeric_text(value, ty)?;
        return Ok(json!({ "type": name, "value": fixed_point(&text, ty)? }));
    }

    match name {
        "Address" => {
            let text = value.as_str().ok_or_else(|| invalid(ty, "expected a string"))?;
            let digits = text.strip_prefix("0x").unwrap_or(text);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid(ty, &format!("{} is not a hex address", text)));
            }
            if digits.len() > ADDRESS_HEX_DIGITS {
                return Err(invalid(ty, &format!("{} is longer than {} hex digits", text, ADDRESS_HEX_DIGITS)));
            }
            Ok(json!({ "type": "Address", "value": format!("0x{}", digits) }))
        }
        "Bool" => {
            let b = value.as_bool().ok_or_else(|| invalid(ty, "expected a boolean"))?;
            Ok(json!({ "type": "Bool", "value": b }))
        }
        "String" => {
            let s = value.as_str().ok_or_else(|| invalid(ty, "expected a string"))?;
            Ok(json!({ "type": "String", "value": s }))
        }
        "Character" => {
            let s = value.as_str().ok_or_else(|| invalid(ty, "expected a string"))?;
            if s.chars().count() != 1 {
                return Err(invalid(ty, "expected a single character"));
            }
            Ok(json!({ "type": "Character", "value": s }))
        }
        _ => {
            // Already encoded values pass through untouched.
            if let Some(obj) = value.as_object() {
                if obj.contains_key("type") && obj.contains_key("value") {
                    return Ok(value.clone());
                }
            }
            Ok(json!({ "type": name, "value": value }))
        }
    }
}

fn numeric_text(value: &Value, ty: &SemanticType) -> Result<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(invalid(ty, "expected a number or numeric string")),
    }
}

fn check_integer(text: &str, ty: &SemanticType) -> Result<()> {
    let digits = match text.strip_prefix('-') {
        Some(_) if ty.is_unsigned() => return Err(invalid(ty, "negative value for unsigned type")),
        Some(rest) => rest,
        None => text,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(ty, &format!("{} is not an integer", text)));
    }
    Ok(())
}

fn fixed_point(text: &str, ty: &SemanticType) -> Result<String> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };
    check_integer(int_part, ty)?;
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(ty, &format!("{} is not a decimal", text)));
    }
    if frac_part.len() > FIXED_POINT_SCALE {
        return Err(invalid(ty, &format!("more than {} fractional digits", FIXED_POINT_SCALE)));
    }
    if ty.bit_width() == Some(64) {
        let scaled = format!("{}{:0<width$}", int_part, frac_part, width = FIXED_POINT_SCALE);
        check_range(&scaled, text, 64, ty)?;
    }
    let frac = if frac_part.is_empty() { "0" } else { frac_part };
    Ok(format!("{}.{}", int_part, frac))
}

/// Fail unless the integer `digits` fits in `bits` (two's complement when
/// signed). `text` is what the caller wrote.
fn check_range(digits: &str, text: &str, bits: u32, ty: &SemanticType) -> Result<()> {
    let value: BigInt = digits
        .parse()
        .map_err(|_| invalid(ty, &format!("{} is not an integer", text)))?;
    let one = BigInt::from(1u8);
    let (min, max) = if ty.is_unsigned() {
        (BigInt::from(0u8), (&one << bits) - &one)
    } else {
        (-(&one << (bits - 1)), (&one << (bits - 1)) - &one)
    };
    if value < min || value > max {
        return Err(invalid(ty, &format!("{} is out of range", text)));
    }
    Ok(())
}

/// Decode a JSON-Cadence value into plain JSON.
///
/// Integers become JSON numbers when they fit in 64 bits, fixed-point values
/// stay strings, composites become objects of their fields.
pub fn decode(value: &Value) -> Result<Value> {
    let obj = value
        .as_object()
        .ok_or_else(|| malformed("expected a JSON-Cadence object"))?;
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing type"))?;
    let inner = obj.get("value").unwrap_or(&Value::Null);

    let ty = SemanticType::named(kind);
    if ty.is_integer() {
        let text = inner.as_str().ok_or_else(|| malformed("integer value must be a string"))?;
        return Ok(text
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| text.parse::<u64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(text.to_string())));
    }

    match kind {
        "Void" => Ok(Value::Null),
        "Optional" => {
            if inner.is_null() {
                Ok(Value::Null)
            } else {
                decode(inner)
            }
        }
        "Array" => {
            let items = inner.as_array().ok_or_else(|| malformed("array value must be a list"))?;
            Ok(Value::Array(items.iter().map(decode).collect::<Result<Vec<_>>>()?))
        }
        "Dictionary" => {
            let entries = inner
                .as_array()
                .ok_or_else(|| malformed("dictionary value must be a list"))?;
            let mut map = Map::new();
            for entry in entries {
                let key = decode(entry.get("key").unwrap_or(&Value::Null))?;
                let value = decode(entry.get("value").unwrap_or(&Value::Null))?;
                let key = match key {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, value);
            }
            Ok(Value::Object(map))
        }
        "Path" => Ok(json!({
            "domain": inner.get("domain").cloned().unwrap_or(Value::Null),
            "identifier": inner.get("identifier").cloned().unwrap_or(Value::Null),
        })),
        "Type" => Ok(inner.get("staticType").cloned().unwrap_or(Value::Null)),
        k if COMPOSITE_KINDS.contains(&k) => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("composite without fields"))?;
            let mut map = Map::new();
            for field in fields {
                let name = field
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| malformed("field without name"))?;
                map.insert(name.to_string(), decode(field.get("value").unwrap_or(&Value::Null))?);
            }
            Ok(Value::Object(map))
        }
        _ => Ok(inner.clone()),
    }
}

fn invalid(ty: &SemanticType, reason: &str) -> TypesError {
    TypesError::InvalidArgument {
        ty: ty.to_string(),
        reason: reason.to_string(),
    }
}

fn malformed(reason: &str) -> TypesError {
    TypesError::InvalidArgument {
        ty: "JSON-Cadence".to_string(),
        reason: reason.to_string(),
    }
}
