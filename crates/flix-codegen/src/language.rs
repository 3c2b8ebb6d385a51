//! Target languages.

use crate::error::CodegenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
}

impl Language {
    /// File extension of generated bindings, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Language::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::JavaScript => write!(f, "javascript"),
            Language::TypeScript => write!(f, "typescript"),
        }
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Language::JavaScript),
            "ts" | "typescript" => Ok(Language::TypeScript),
            _ => Err(CodegenError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("js".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("TypeScript".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!(
            "go".parse::<Language>(),
            Err(CodegenError::UnsupportedLanguage("go".to_string()))
        );
    }

    #[test]
    fn test_language_display_roundtrip() {
        for lang in [Language::JavaScript, Language::TypeScript] {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
        assert_eq!(Language::TypeScript.extension(), "ts");
    }
}
