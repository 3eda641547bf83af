use serde::{Deserialize, Serialize};

use crate::{Language, TestResult};

/// Body for both the run and submit endpoints. The dispatch token stays on
/// the client; the judge never sees it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub problem_id: i32,
    pub code: String,
    pub language: Language,
}

/// Response from the run endpoint: sample-case results only, no persisted
/// record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

/// Body for creating or updating a custom test case.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestCaseRequest {
    pub input: String,
    pub expected_output: String,
}

/// Structured error body returned by the platform API on failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
