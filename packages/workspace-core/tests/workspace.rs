//! End-to-end workspace behavior over in-memory fakes.

mod support;

use std::sync::Arc;

use common::{Language, TestCase};
use support::{FakeCatalog, FakeJudge};
use workspace_core::coordinator::{Applied, ExecutionKind};
use workspace_core::{
    AttemptOutcome, CaseState, MemoryStore, ProblemWorkspace, WorkspaceError,
};

struct Harness {
    judge: Arc<FakeJudge>,
    catalog: Arc<FakeCatalog>,
    store: Arc<MemoryStore>,
}

impl Harness {
    fn new() -> Self {
        Self::with_cases(vec![
            support::sample_case(1),
            support::sample_case(2),
            support::sample_case(3),
        ])
    }

    fn with_cases(default_cases: Vec<TestCase>) -> Self {
        Self {
            judge: Arc::new(FakeJudge::new()),
            catalog: Arc::new(FakeCatalog::new(support::sample_problem(), default_cases)),
            store: Arc::new(MemoryStore::new()),
        }
    }

    async fn open(&self, language: Language) -> ProblemWorkspace {
        ProblemWorkspace::open(
            self.judge.clone(),
            self.catalog.clone(),
            self.store.clone(),
            42,
            language,
        )
        .await
        .expect("workspace should open")
    }
}

#[tokio::test]
async fn starter_code_shown_when_no_draft_exists() {
    let harness = Harness::new();
    let workspace = harness.open(Language::Java).await;
    assert_eq!(workspace.code(), "class Solution {}");
}

#[tokio::test]
async fn placeholder_shown_when_problem_has_no_template() {
    let harness = Harness::new();
    let workspace = harness.open(Language::Python).await;
    assert_eq!(workspace.code(), "# Write your Python code here\n");
}

#[tokio::test]
async fn draft_survives_reload_instead_of_starter() {
    let harness = Harness::new();
    {
        let mut workspace = harness.open(Language::Java).await;
        workspace.set_code("public class Foo{}");
        workspace.blur();
    }

    let workspace = harness.open(Language::Java).await;
    assert_eq!(workspace.code(), "public class Foo{}");
}

#[tokio::test]
async fn language_switch_never_leaks_previous_code() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;
    workspace.set_code("public class Foo{}");

    workspace.set_language(Language::Python);
    assert_eq!(workspace.code(), "# Write your Python code here\n");

    // The Java draft is still there when switching back.
    workspace.set_language(Language::Java);
    assert_eq!(workspace.code(), "public class Foo{}");
}

#[tokio::test]
async fn run_marks_partial_results_and_leaves_rest_unmarked() {
    let harness = Harness::new();
    harness
        .judge
        .queue_run(Ok(vec![support::passed(1), support::failed(2)]));

    let mut workspace = harness.open(Language::Java).await;
    let outcome = workspace.run().await.unwrap();
    assert_eq!(outcome, AttemptOutcome::Applied);

    let outcomes = workspace.outcomes();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].state(), CaseState::Passed);
    assert_eq!(outcomes[1].state(), CaseState::Failed);
    assert_eq!(outcomes[2].state(), CaseState::NotRun);
}

#[tokio::test]
async fn run_never_creates_a_submission() {
    let harness = Harness::new();
    harness.judge.queue_run(Ok(vec![support::passed(1)]));

    let mut workspace = harness.open(Language::Java).await;
    workspace.run().await.unwrap();

    assert!(workspace.submission().is_none());
    assert_eq!(harness.judge.submit_count(), 0);
}

#[tokio::test]
async fn submit_stores_submission_and_derives_same_view() {
    let harness = Harness::new();
    harness.judge.queue_submit(Ok(support::accepted_submission(
        7,
        vec![support::passed(1), support::passed(2), support::passed(3)],
    )));

    let mut workspace = harness.open(Language::Java).await;
    let outcome = workspace.submit().await.unwrap();
    assert_eq!(outcome, AttemptOutcome::Applied);

    let submission = workspace.submission().expect("submission stored");
    assert_eq!(submission.id, 7);
    assert!(workspace
        .outcomes()
        .iter()
        .all(|o| o.state() == CaseState::Passed));
}

#[tokio::test]
async fn run_clears_previous_submission_summary() {
    let harness = Harness::new();
    harness
        .judge
        .queue_submit(Ok(support::accepted_submission(7, vec![support::passed(1)])));
    harness.judge.queue_run(Ok(vec![support::failed(1)]));

    let mut workspace = harness.open(Language::Java).await;
    workspace.submit().await.unwrap();
    assert!(workspace.submission().is_some());

    workspace.run().await.unwrap();
    assert!(workspace.submission().is_none());
    assert_eq!(workspace.outcomes()[0].state(), CaseState::Failed);
}

#[tokio::test]
async fn blank_code_is_rejected_before_any_dispatch() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;
    workspace.set_code("   \n");

    let outcome = workspace.run().await;
    assert!(matches!(outcome, Err(WorkspaceError::Validation(_))));
    assert_eq!(harness.judge.run_count(), 0);

    let outcome = workspace.submit().await;
    assert!(matches!(outcome, Err(WorkspaceError::Validation(_))));
    assert_eq!(harness.judge.submit_count(), 0);
}

#[tokio::test]
async fn submit_while_run_in_flight_is_a_noop() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;

    // Claim the run dispatch slot, as if the response had not landed yet.
    let dispatch = workspace
        .coordinator()
        .begin(ExecutionKind::Run, "class A {}")
        .unwrap()
        .unwrap();

    let outcome = workspace.submit().await.unwrap();
    assert_eq!(outcome, AttemptOutcome::Busy);
    assert_eq!(harness.judge.submit_count(), 0, "no second request dispatched");

    workspace.coordinator().complete_run(dispatch, Ok(vec![]));
    assert!(!workspace.is_busy());
}

#[tokio::test]
async fn response_after_language_switch_is_discarded() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;

    let dispatch = workspace
        .coordinator()
        .begin(ExecutionKind::Run, "class A {}")
        .unwrap()
        .unwrap();

    workspace.set_language(Language::Python);

    let applied = workspace
        .coordinator()
        .complete_run(dispatch, Ok(vec![support::passed(1)]));
    assert_eq!(applied, Applied::Stale);
    assert!(workspace
        .outcomes()
        .iter()
        .all(|o| o.state() == CaseState::NotRun));
}

#[tokio::test]
async fn failed_run_keeps_prior_results_and_recovers() {
    let harness = Harness::new();
    harness.judge.queue_run(Ok(vec![support::passed(1)]));
    harness
        .judge
        .queue_run(Err(WorkspaceError::Network("request timed out".to_string())));

    let mut workspace = harness.open(Language::Java).await;
    workspace.run().await.unwrap();
    assert_eq!(workspace.outcomes()[0].state(), CaseState::Passed);

    let outcome = workspace.run().await.unwrap();
    assert_eq!(outcome, AttemptOutcome::Failed);
    assert_eq!(
        workspace.outcomes()[0].state(),
        CaseState::Passed,
        "failed retry must not erase prior progress"
    );
    assert!(workspace.last_error().is_some());
    assert!(!workspace.is_busy());

    workspace.dismiss_error();
    assert!(workspace.last_error().is_none());
}

#[tokio::test]
async fn custom_test_cases_round_trip_through_the_catalog() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;

    workspace.add_custom_test_case("5 5", "10").await.unwrap();
    assert_eq!(workspace.test_cases().custom.len(), 1);
    let id = workspace.test_cases().custom[0].id;

    workspace
        .update_custom_test_case(id, "6 6", "12")
        .await
        .unwrap();
    assert_eq!(workspace.test_cases().custom[0].input, "6 6");

    workspace.delete_custom_test_case(id).await.unwrap();
    assert!(workspace.test_cases().custom.is_empty());
}

#[tokio::test]
async fn custom_test_case_requires_both_fields() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;

    let outcome = workspace.add_custom_test_case("5 5", "  ").await;
    assert!(matches!(outcome, Err(WorkspaceError::Validation(_))));
    assert!(workspace.test_cases().custom.is_empty());
}

#[tokio::test]
async fn custom_case_results_correlate_by_composite_key() {
    let harness = Harness::new();
    let mut workspace = harness.open(Language::Java).await;
    workspace.add_custom_test_case("1 2", "3").await.unwrap();
    let custom_id = workspace.test_cases().custom[0].id;

    // The judge reports only the custom case; a default case sharing the
    // same numeric id stays unmarked.
    let mut result = support::passed(custom_id);
    result.is_custom = true;
    harness.judge.queue_run(Ok(vec![result]));
    workspace.run().await.unwrap();

    let outcomes = workspace.outcomes();
    let default_outcome = outcomes
        .iter()
        .find(|o| !o.test_case.is_custom && o.test_case.id == custom_id)
        .expect("default case displayed");
    let custom_outcome = outcomes
        .iter()
        .find(|o| o.test_case.is_custom)
        .expect("custom case displayed");
    assert_eq!(default_outcome.state(), CaseState::NotRun);
    assert_eq!(custom_outcome.state(), CaseState::Passed);
}
