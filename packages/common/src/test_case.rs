use serde::{Deserialize, Serialize};

/// A test case shown in the workspace. Default cases belong to the problem;
/// custom cases are authored by the current user and may be edited or
/// deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: i32,
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub is_sample: bool,
    #[serde(default)]
    pub is_custom: bool,
}

impl TestCase {
    /// Identity used to match judge results back onto displayed cases.
    ///
    /// Default and custom cases live in separate id spaces, so the pair is
    /// needed; the numeric id alone is ambiguous.
    pub fn key(&self) -> TestCaseKey {
        TestCaseKey {
            test_case_id: self.id,
            is_custom: self.is_custom,
        }
    }
}

/// Composite identity of a test case across the two collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TestCaseKey {
    pub test_case_id: i32,
    pub is_custom: bool,
}

/// The two disjoint collections returned by the catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TestCases {
    #[serde(default)]
    pub default: Vec<TestCase>,
    #[serde(default)]
    pub custom: Vec<TestCase>,
}

impl TestCases {
    /// Default cases flagged as samples, in catalog order.
    pub fn samples(&self) -> impl Iterator<Item = &TestCase> {
        self.default.iter().filter(|tc| tc.is_sample)
    }

    /// Everything the workspace test panel displays: samples first, then
    /// the user's custom cases.
    pub fn displayed(&self) -> impl Iterator<Item = &TestCase> {
        self.samples().chain(self.custom.iter())
    }
}
