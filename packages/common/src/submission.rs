use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::test_case::TestCaseKey;
use crate::Language;

/// Status of a submission after (or during) judging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Waiting to be picked up by the judge.
    Pending,
    /// Currently running test cases.
    Running,
    /// All test cases passed.
    Accepted,
    /// Output did not match expected output.
    WrongAnswer,
    /// Exceeded the problem's time limit.
    TimeLimitExceeded,
    /// Exceeded the problem's memory limit.
    MemoryLimitExceeded,
    /// Program crashed or exited with a non-zero code.
    RuntimeError,
    /// Failed to compile.
    CompilationError,
    /// Internal judge error.
    Error,
}

impl SubmissionStatus {
    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Running,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
        Self::Error,
    ];

    /// Returns true if judging is complete.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the wire representation (SCREAMING_SNAKE_CASE).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Accepted => "ACCEPTED",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Self::MemoryLimitExceeded => "MEMORY_LIMIT_EXCEEDED",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::CompilationError => "COMPILATION_ERROR",
            Self::Error => "ERROR",
        }
    }

    /// Human-readable label ("WRONG_ANSWER" -> "Wrong Answer").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::CompilationError => "Compilation Error",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| ParseStatusError {
                invalid: s.to_string(),
            })
    }
}

/// Outcome of one test case, as reported by the judge. Never persisted by
/// the client; replaced wholesale on the next execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_case_id: i32,
    #[serde(default)]
    pub is_custom: bool,
    pub passed: bool,
    #[serde(default)]
    pub actual_output: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub runtime_ms: Option<i32>,
}

impl TestResult {
    /// Identity of the test case this result belongs to.
    pub fn key(&self) -> TestCaseKey {
        TestCaseKey {
            test_case_id: self.test_case_id,
            is_custom: self.is_custom,
        }
    }
}

/// A persisted full-evaluation record. Created only by the submit flow and
/// owned by the platform backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i32,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub runtime_ms: Option<i32>,
    #[serde(default)]
    pub memory_kb: Option<i32>,
    pub language: Language,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

impl Submission {
    /// Number of passed test cases out of the total reported.
    pub fn passed_counts(&self) -> (usize, usize) {
        let passed = self.test_results.iter().filter(|r| r.passed).count();
        (passed, self.test_results.len())
    }
}
