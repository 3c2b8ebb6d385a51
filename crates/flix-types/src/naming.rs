//! Identifier casing for generated function and type names.

use crate::template::{TemplateDescriptor, DEFAULT_TITLE};
use convert_case::{Case, Casing};

/// Case `text` into an identifier usable in generated JavaScript.
///
/// Punctuation separates words, a leading digit gets a `_` prefix, and text
/// with no letters or digits falls back to the default title.
fn identifier(text: &str, case: Case) -> String {
    let words: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let words = if words.trim().is_empty() { DEFAULT_TITLE } else { words.trim() };

    let cased = words.to_case(case);
    if cased.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", cased)
    } else {
        cased
    }
}

/// `"Transfer Tokens"` -> `"TransferTokens"`
pub fn upper_camel_case(text: &str) -> String {
    identifier(text, Case::Pascal)
}

/// `"Transfer Tokens"` -> `"transferTokens"`
pub fn lower_camel_case(text: &str) -> String {
    identifier(text, Case::Camel)
}

impl TemplateDescriptor {
    /// Name of the binding function for this template.
    pub fn function_name(&self) -> String {
        lower_camel_case(&self.title)
    }

    /// Prefix for generated type names (`<Prefix>Params`).
    pub fn type_prefix(&self) -> String {
        upper_camel_case(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(lower_camel_case("Transfer Tokens"), "transferTokens");
        assert_eq!(lower_camel_case("Multiply Two Integers"), "multiplyTwoIntegers");
        assert_eq!(lower_camel_case("FLOW transfer"), "flowTransfer");
        assert_eq!(lower_camel_case("get-balance_v2"), "getBalanceV2");
        assert_eq!(lower_camel_case("Request"), "request");
    }

    #[test]
    fn test_upper_camel_case() {
        assert_eq!(upper_camel_case("Transfer Tokens"), "TransferTokens");
        assert_eq!(upper_camel_case("mintNFT"), "MintNft");
    }

    #[test]
    fn test_identifier_never_starts_with_digit() {
        let name = lower_camel_case("1inch Swap");
        assert!(name.starts_with("_1"));
        assert!(name.ends_with("Swap"));
        assert!(upper_camel_case("2 Step Transfer").starts_with("_2"));
    }

    #[test]
    fn test_punctuation_only_title() {
        assert_eq!(lower_camel_case("!!!"), "request");
        assert_eq!(upper_camel_case(""), "Request");
        assert_eq!(lower_camel_case("Send (FLOW) tokens!"), "sendFlowTokens");
    }
}
