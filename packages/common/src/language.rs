use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A programming language supported by the platform.
///
/// Each variant carries its editor and starter-code metadata as data, so
/// callers never dispatch on raw language strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    JavaScript,
}

impl Language {
    /// All supported languages, in selector order.
    pub const ALL: &'static [Language] = &[Self::Java, Self::Python, Self::JavaScript];

    /// Wire identifier used by the judge and catalog APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
            Self::JavaScript => "javascript",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
        }
    }

    /// Identifier understood by the editor's syntax highlighter.
    pub fn highlighter(&self) -> &'static str {
        self.as_str()
    }

    /// Source file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "py",
            Self::JavaScript => "js",
        }
    }

    /// Editor placeholder shown when a problem has no starter template.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Java => "// Write your Java code here\n",
            Self::Python => "# Write your Python code here\n",
            Self::JavaScript => "// Write your JavaScript code here\n",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unsupported language identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language '{0}'. Valid values: java, python, javascript")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "python" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::JavaScript),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}
