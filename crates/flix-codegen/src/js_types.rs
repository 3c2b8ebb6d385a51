//! Cadence to JavaScript type mapping.

use flix_types::SemanticType;

/// JavaScript type a caller passes for a Cadence type.
///
/// FCL takes most scalar values as strings, so anything without a closer
/// match is `string`.
pub fn js_type(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Named(name) => match name.as_str() {
            "Bool" => "boolean".to_string(),
            "Void" => "void".to_string(),
            "Dictionary" | "Struct" | "Enum" => "object".to_string(),
            _ => "string".to_string(),
        },
        SemanticType::Optional(inner) => js_type(inner),
        SemanticType::Array(inner) | SemanticType::ConstantArray(inner, _) => {
            format!("Array<{}>", js_type(inner))
        }
        SemanticType::Dictionary(..) => "object".to_string(),
    }
}

/// FCL type expression used in `arg(value, <expr>)`.
pub fn fcl_type(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Named(name) => format!("t.{}", name),
        SemanticType::Optional(inner) => format!("t.Optional({})", fcl_type(inner)),
        SemanticType::Array(inner) | SemanticType::ConstantArray(inner, _) => {
            format!("t.Array({})", fcl_type(inner))
        }
        SemanticType::Dictionary(key, value) => {
            format!("t.Dictionary({{key: {}, value: {}}})", fcl_type(key), fcl_type(value))
        }
    }
}
