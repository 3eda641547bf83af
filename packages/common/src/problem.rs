use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Language;

/// Difficulty rating assigned by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Starter templates, one optional entry per supported language.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterCode {
    pub java: Option<String>,
    pub python: Option<String>,
    pub javascript: Option<String>,
}

impl StarterCode {
    pub fn for_language(&self, language: Language) -> Option<&str> {
        match language {
            Language::Java => self.java.as_deref(),
            Language::Python => self.python.as_deref(),
            Language::JavaScript => self.javascript.as_deref(),
        }
    }
}

/// A catalog problem as served to the workspace. Immutable from the
/// client's point of view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub constraints: Option<String>,
    pub difficulty: Difficulty,
    /// Time limit in milliseconds.
    pub time_limit_ms: i32,
    /// Memory limit in megabytes.
    pub memory_limit_mb: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub starter_code: StarterCode,
}

impl Problem {
    /// The starter template for `language`, if the problem carries one.
    pub fn starter_for(&self, language: Language) -> Option<&str> {
        self.starter_code.for_language(language)
    }
}
