//! Project variants
//!
//! A variant picks which staged files land in the root and whether the
//! native-extension subtree survives initialization.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

/// Project flavor selected once per initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Pure Python project
    Vanilla,
    /// Project with a C++ torch extension
    Cpp,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Vanilla, Variant::Cpp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Vanilla => "vanilla",
            Variant::Cpp => "cpp",
        }
    }

    /// Whether the native-extension subtree and its test are kept
    pub fn keeps_cpp_extras(&self) -> bool {
        matches!(self, Variant::Cpp)
    }

    /// Comma-separated list of accepted names, for prompts and errors
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vanilla" => Ok(Variant::Vanilla),
            "cpp" => Ok(Variant::Cpp),
            other => anyhow::bail!(
                "Invalid project type: '{}'. Must be one of: {}",
                other,
                Self::choices()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_variants() {
        assert_eq!("vanilla".parse::<Variant>().unwrap(), Variant::Vanilla);
        assert_eq!("cpp".parse::<Variant>().unwrap(), Variant::Cpp);
        assert_eq!(" CPP ".parse::<Variant>().unwrap(), Variant::Cpp);
    }

    #[test]
    fn test_parse_unknown_variant() {
        let err = "rust".parse::<Variant>().unwrap_err();
        assert!(err.to_string().contains("vanilla, cpp"));
    }

    #[test]
    fn test_cpp_extras() {
        assert!(Variant::Cpp.keeps_cpp_extras());
        assert!(!Variant::Vanilla.keeps_cpp_extras());
    }
}
