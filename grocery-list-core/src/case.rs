//! Case checks and coercions shared by the validator, the selection commands
//! and the presentation layer.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Upper,
    /// First letter uppercase, the rest lowercase.
    Name,
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseStyle::Lower => "lower",
            CaseStyle::Upper => "upper",
            CaseStyle::Name => "name",
        };
        f.write_str(s)
    }
}

impl FromStr for CaseStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(CaseStyle::Lower),
            "upper" => Ok(CaseStyle::Upper),
            "name" | "name_case" => Ok(CaseStyle::Name),
            other => Err(ConfigError::UnknownCaseStyle(other.to_string())),
        }
    }
}

/// A word that does not satisfy the requested case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Case: {word}")]
pub struct CaseViolation {
    pub word: String,
    pub style: CaseStyle,
}

/// Capitalises the first character and lowercases the rest.
pub fn name_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn coerce(word: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Lower => word.to_lowercase(),
        CaseStyle::Upper => word.to_uppercase(),
        CaseStyle::Name => name_case(word),
    }
}

/// Reports whether `word` already satisfies `style`, without changing it.
pub fn check_case(word: &str, style: CaseStyle) -> Result<(), CaseViolation> {
    if coerce(word, style) == word {
        Ok(())
    } else {
        Err(CaseViolation {
            word: word.to_string(),
            style,
        })
    }
}

/// Returns `word` unchanged if it satisfies `style`, otherwise the coerced form.
pub fn lint_case(word: &str, style: CaseStyle) -> String {
    match check_case(word, style) {
        Ok(()) => word.to_string(),
        Err(_) => coerce(word, style),
    }
}
