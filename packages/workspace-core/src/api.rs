use async_trait::async_trait;
use common::api::{ExecutionRequest, NewTestCaseRequest};
use common::{Problem, Submission, TestCase, TestCases, TestResult};

use crate::error::WorkspaceError;

/// The judge/execution service the workspace dispatches code to.
#[async_trait]
pub trait JudgeService: Send + Sync {
    /// Evaluate against sample test cases only. Creates no persisted record.
    async fn run(&self, request: ExecutionRequest) -> Result<Vec<TestResult>, WorkspaceError>;

    /// Full evaluation producing a persisted submission.
    async fn submit(&self, request: ExecutionRequest) -> Result<Submission, WorkspaceError>;
}

/// The problem catalog the workspace reads problems and test cases from.
/// Custom test cases are created and mutated here too; the catalog owns
/// their persistence and the workspace refetches after each change.
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    async fn problem(&self, problem_id: i32) -> Result<Problem, WorkspaceError>;

    async fn test_cases(&self, problem_id: i32) -> Result<TestCases, WorkspaceError>;

    async fn add_custom_test_case(
        &self,
        problem_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError>;

    async fn update_test_case(
        &self,
        test_case_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError>;

    async fn delete_test_case(&self, test_case_id: i32) -> Result<(), WorkspaceError>;
}
