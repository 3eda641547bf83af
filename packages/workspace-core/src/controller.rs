use std::sync::Arc;

use common::api::{ExecutionRequest, NewTestCaseRequest};
use common::{Language, Problem, Submission, TestCases};
use tracing::info;

use crate::api::{JudgeService, ProblemCatalog};
use crate::coordinator::{
    Applied, DispatchGuard, ExecutionCoordinator, ExecutionKind, ExecutionPhase,
};
use crate::correlate::{correlate, CaseOutcome};
use crate::draft::{DraftAutosave, DraftStore};
use crate::error::WorkspaceError;
use crate::starter::starter_code;
use crate::store::KeyValueStore;

/// What a run or submit attempt turned into. Validation failures are the
/// only `Err` path; asynchronous failures land in [`AttemptOutcome::Failed`]
/// with the error held as a dismissible message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Results were applied to the view.
    Applied,
    /// The other flow was in flight; nothing was dispatched.
    Busy,
    /// The response arrived for a superseded dispatch and was discarded.
    Discarded,
    /// The execution failed; prior results are retained.
    Failed,
}

/// The problem workspace: one problem, one editor, the judged result view,
/// and the locally persisted drafts: everything behind the Run and Submit
/// buttons.
///
/// Layout and tab state are orthogonal concerns on the same screen; see
/// [`crate::layout::SplitLayout`] and [`crate::tabs::TabSync`].
pub struct ProblemWorkspace {
    judge: Arc<dyn JudgeService>,
    catalog: Arc<dyn ProblemCatalog>,
    coordinator: ExecutionCoordinator,
    autosave: DraftAutosave,
    problem: Problem,
    test_cases: TestCases,
    language: Language,
    code: String,
}

impl ProblemWorkspace {
    /// Fetch the problem and its test cases, restoring the saved draft for
    /// the pair or resolving starter code when none exists.
    pub async fn open(
        judge: Arc<dyn JudgeService>,
        catalog: Arc<dyn ProblemCatalog>,
        store: Arc<dyn KeyValueStore>,
        problem_id: i32,
        language: Language,
    ) -> Result<Self, WorkspaceError> {
        let problem = catalog.problem(problem_id).await?;
        let test_cases = catalog.test_cases(problem_id).await?;

        let drafts = DraftStore::new(store);
        let code = drafts
            .load(problem_id, language)
            .unwrap_or_else(|| starter_code(&problem, language));

        info!(problem_id, language = %language, "Opened problem workspace");
        Ok(Self {
            judge,
            catalog,
            coordinator: ExecutionCoordinator::new(),
            autosave: DraftAutosave::new(drafts),
            problem,
            test_cases,
            language,
            code,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn test_cases(&self) -> &TestCases {
        &self.test_cases
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.coordinator.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn submission(&self) -> Option<Submission> {
        self.coordinator.submission()
    }

    pub fn last_error(&self) -> Option<WorkspaceError> {
        self.coordinator.last_error()
    }

    pub fn dismiss_error(&self) {
        self.coordinator.dismiss_error();
    }

    /// The coordinator backing this workspace, for shells that need to
    /// observe dispatch state directly.
    pub fn coordinator(&self) -> &ExecutionCoordinator {
        &self.coordinator
    }

    /// Record an editor edit. Written through to the draft store, throttled.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.autosave
            .record(self.problem.id, self.language, &self.code);
    }

    /// The editor lost focus; push any held draft write.
    pub fn blur(&mut self) {
        self.autosave.flush();
    }

    /// Switch the editor language.
    ///
    /// The current draft is flushed first, any in-flight execution becomes
    /// stale, and the result view is cleared. The new language's draft is
    /// restored, or its starter code when no draft exists, never the
    /// previous language's text.
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.autosave.flush();
        self.coordinator.invalidate();
        self.coordinator.clear_view();
        self.language = language;
        self.code = self
            .autosave
            .drafts()
            .load(self.problem.id, language)
            .unwrap_or_else(|| starter_code(&self.problem, language));
        info!(problem_id = self.problem.id, language = %language, "Switched language");
    }

    /// Execute the current code against the sample test cases. Never
    /// creates a submission.
    pub async fn run(&mut self) -> Result<AttemptOutcome, WorkspaceError> {
        self.autosave.flush();
        let Some(dispatch) = self.coordinator.begin(ExecutionKind::Run, &self.code)? else {
            return Ok(AttemptOutcome::Busy);
        };

        let request = self.execution_request();
        let mut guard = DispatchGuard::new(&self.coordinator, dispatch);
        let outcome = self.judge.run(request).await;
        guard.defuse();
        drop(guard);

        let failed = outcome.is_err();
        Ok(match self.coordinator.complete_run(dispatch, outcome) {
            Applied::Stale => AttemptOutcome::Discarded,
            Applied::Applied if failed => AttemptOutcome::Failed,
            Applied::Applied => AttemptOutcome::Applied,
        })
    }

    /// Submit the current code for full evaluation.
    pub async fn submit(&mut self) -> Result<AttemptOutcome, WorkspaceError> {
        self.autosave.flush();
        let Some(dispatch) = self.coordinator.begin(ExecutionKind::Submit, &self.code)? else {
            return Ok(AttemptOutcome::Busy);
        };

        let request = self.execution_request();
        let mut guard = DispatchGuard::new(&self.coordinator, dispatch);
        let outcome = self.judge.submit(request).await;
        guard.defuse();
        drop(guard);

        let failed = outcome.is_err();
        Ok(match self.coordinator.complete_submit(dispatch, outcome) {
            Applied::Stale => AttemptOutcome::Discarded,
            Applied::Applied if failed => AttemptOutcome::Failed,
            Applied::Applied => AttemptOutcome::Applied,
        })
    }

    fn execution_request(&self) -> ExecutionRequest {
        ExecutionRequest {
            problem_id: self.problem.id,
            code: self.code.clone(),
            language: self.language,
        }
    }

    /// The displayed cases (default samples, then custom) joined with the
    /// current results. Cases without a result render as "not yet run".
    pub fn outcomes(&self) -> Vec<CaseOutcome> {
        let displayed: Vec<_> = self.test_cases.displayed().cloned().collect();
        correlate(&displayed, &self.coordinator.results())
    }

    /// Create a custom test case and refetch both collections.
    pub async fn add_custom_test_case(
        &mut self,
        input: &str,
        expected_output: &str,
    ) -> Result<(), WorkspaceError> {
        validate_test_case(input, expected_output)?;
        self.catalog
            .add_custom_test_case(
                self.problem.id,
                NewTestCaseRequest {
                    input: input.to_string(),
                    expected_output: expected_output.to_string(),
                },
            )
            .await?;
        self.refresh_test_cases().await
    }

    /// Update a custom test case and refetch both collections.
    pub async fn update_custom_test_case(
        &mut self,
        test_case_id: i32,
        input: &str,
        expected_output: &str,
    ) -> Result<(), WorkspaceError> {
        validate_test_case(input, expected_output)?;
        self.catalog
            .update_test_case(
                test_case_id,
                NewTestCaseRequest {
                    input: input.to_string(),
                    expected_output: expected_output.to_string(),
                },
            )
            .await?;
        self.refresh_test_cases().await
    }

    /// Delete a custom test case and refetch both collections.
    pub async fn delete_custom_test_case(
        &mut self,
        test_case_id: i32,
    ) -> Result<(), WorkspaceError> {
        self.catalog.delete_test_case(test_case_id).await?;
        self.refresh_test_cases().await
    }

    async fn refresh_test_cases(&mut self) -> Result<(), WorkspaceError> {
        self.test_cases = self.catalog.test_cases(self.problem.id).await?;
        Ok(())
    }
}

fn validate_test_case(input: &str, expected_output: &str) -> Result<(), WorkspaceError> {
    if input.trim().is_empty() || expected_output.trim().is_empty() {
        return Err(WorkspaceError::Validation(
            "Provide both input and expected output".to_string(),
        ));
    }
    Ok(())
}
