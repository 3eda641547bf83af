use std::collections::HashMap;

use common::{TestCase, TestCaseKey, TestResult};

/// Per-case view state after matching judge results onto displayed cases.
///
/// `NotRun` is distinct from `Failed`: a case the judge did not report on
/// renders as "not yet run", never as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseState {
    NotRun,
    Passed,
    Failed,
}

/// A displayed test case joined with its judge result, if any.
#[derive(Clone, Debug)]
pub struct CaseOutcome {
    pub test_case: TestCase,
    pub result: Option<TestResult>,
}

impl CaseOutcome {
    pub fn state(&self) -> CaseState {
        match &self.result {
            None => CaseState::NotRun,
            Some(result) if result.passed => CaseState::Passed,
            Some(_) => CaseState::Failed,
        }
    }
}

/// Match judge results onto displayed test cases by (test_case_id,
/// is_custom).
///
/// Builds the lookup in O(m) and probes once per case. Each case matches at
/// most one result; when the judge returns two results for the same key the
/// later one in the supplied ordering wins; a data-quality concern
/// upstream, not a correlation failure here.
pub fn correlate(test_cases: &[TestCase], results: &[TestResult]) -> Vec<CaseOutcome> {
    let mut by_key: HashMap<TestCaseKey, &TestResult> = HashMap::with_capacity(results.len());
    for result in results {
        by_key.insert(result.key(), result);
    }

    test_cases
        .iter()
        .map(|test_case| CaseOutcome {
            test_case: test_case.clone(),
            result: by_key.get(&test_case.key()).map(|r| (*r).clone()),
        })
        .collect()
}
