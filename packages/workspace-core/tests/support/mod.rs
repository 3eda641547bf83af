//! In-memory fakes of the workspace's collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use common::api::{ExecutionRequest, NewTestCaseRequest};
use common::{
    Difficulty, Language, Problem, StarterCode, Submission, SubmissionStatus, TestCase,
    TestCases, TestResult,
};
use workspace_core::api::{JudgeService, ProblemCatalog};
use workspace_core::WorkspaceError;

pub fn sample_problem() -> Problem {
    Problem {
        id: 42,
        title: "Two Sum".to_string(),
        description: "Find two numbers that add up to a target.".to_string(),
        constraints: Some("2 <= n <= 10^4".to_string()),
        difficulty: Difficulty::Easy,
        time_limit_ms: 2000,
        memory_limit_mb: 256,
        tags: vec!["arrays".to_string()],
        starter_code: StarterCode {
            java: Some("class Solution {}".to_string()),
            python: None,
            javascript: Some("function solve() {}".to_string()),
        },
    }
}

pub fn sample_case(id: i32) -> TestCase {
    TestCase {
        id,
        input: format!("input {id}"),
        expected_output: format!("output {id}"),
        explanation: None,
        is_sample: true,
        is_custom: false,
    }
}

pub fn passed(test_case_id: i32) -> TestResult {
    TestResult {
        test_case_id,
        is_custom: false,
        passed: true,
        actual_output: Some(format!("output {test_case_id}")),
        error_message: None,
        runtime_ms: Some(3),
    }
}

pub fn failed(test_case_id: i32) -> TestResult {
    TestResult {
        test_case_id,
        is_custom: false,
        passed: false,
        actual_output: Some("garbage".to_string()),
        error_message: None,
        runtime_ms: Some(3),
    }
}

pub fn accepted_submission(id: i32, results: Vec<TestResult>) -> Submission {
    Submission {
        id,
        status: SubmissionStatus::Accepted,
        runtime_ms: Some(12),
        memory_kb: Some(20_480),
        language: Language::Java,
        created_at: chrono::Utc::now(),
        test_results: results,
    }
}

/// Judge fake: hands out queued responses and counts dispatches.
#[derive(Default)]
pub struct FakeJudge {
    run_queue: Mutex<VecDeque<Result<Vec<TestResult>, WorkspaceError>>>,
    submit_queue: Mutex<VecDeque<Result<Submission, WorkspaceError>>>,
    pub run_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
}

impl FakeJudge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_run(&self, outcome: Result<Vec<TestResult>, WorkspaceError>) {
        self.run_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    pub fn queue_submit(&self, outcome: Result<Submission, WorkspaceError>) {
        self.submit_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    pub fn run_count(&self) -> usize {
        self.run_calls.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeService for FakeJudge {
    async fn run(&self, _request: ExecutionRequest) -> Result<Vec<TestResult>, WorkspaceError> {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        self.run_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn submit(&self, _request: ExecutionRequest) -> Result<Submission, WorkspaceError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(accepted_submission(1, vec![])))
    }
}

/// Catalog fake: serves one problem and keeps custom cases in memory.
pub struct FakeCatalog {
    problem: Problem,
    test_cases: Mutex<TestCases>,
    next_custom_id: AtomicI32,
}

impl FakeCatalog {
    pub fn new(problem: Problem, default_cases: Vec<TestCase>) -> Self {
        Self {
            problem,
            test_cases: Mutex::new(TestCases {
                default: default_cases,
                custom: vec![],
            }),
            next_custom_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ProblemCatalog for FakeCatalog {
    async fn problem(&self, problem_id: i32) -> Result<Problem, WorkspaceError> {
        if problem_id != self.problem.id {
            return Err(WorkspaceError::server(
                Some("NOT_FOUND".to_string()),
                Some(format!("Problem {problem_id} not found")),
            ));
        }
        Ok(self.problem.clone())
    }

    async fn test_cases(&self, _problem_id: i32) -> Result<TestCases, WorkspaceError> {
        Ok(self
            .test_cases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn add_custom_test_case(
        &self,
        _problem_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError> {
        let id = self.next_custom_id.fetch_add(1, Ordering::SeqCst);
        let created = TestCase {
            id,
            input: test_case.input,
            expected_output: test_case.expected_output,
            explanation: None,
            is_sample: false,
            is_custom: true,
        };
        self.test_cases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .custom
            .push(created.clone());
        Ok(created)
    }

    async fn update_test_case(
        &self,
        test_case_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError> {
        let mut cases = self
            .test_cases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let existing = cases
            .custom
            .iter_mut()
            .find(|tc| tc.id == test_case_id)
            .ok_or_else(|| {
                WorkspaceError::server(
                    Some("NOT_FOUND".to_string()),
                    Some(format!("Test case {test_case_id} not found")),
                )
            })?;
        existing.input = test_case.input;
        existing.expected_output = test_case.expected_output;
        Ok(existing.clone())
    }

    async fn delete_test_case(&self, test_case_id: i32) -> Result<(), WorkspaceError> {
        self.test_cases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .custom
            .retain(|tc| tc.id != test_case_id);
        Ok(())
    }
}
