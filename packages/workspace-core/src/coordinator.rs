use std::sync::{Mutex, MutexGuard, PoisonError};

use common::{Submission, TestResult};
use tracing::{debug, warn};

use crate::error::WorkspaceError;

/// What the coordinator is currently doing. `Running` and `Submitting` are
/// mutually exclusive; while either is active both affordances are disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionPhase {
    #[default]
    Idle,
    Running,
    Submitting,
    /// An execution failed; the error is held as a dismissible message and
    /// both affordances are enabled again.
    Failed,
}

/// Which flow a dispatch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionKind {
    Run,
    Submit,
}

impl ExecutionKind {
    fn verb(&self) -> &'static str {
        match self {
            Self::Run => "running",
            Self::Submit => "submitting",
        }
    }
}

/// Ticket handed out at dispatch time. The completion must present it; a
/// token older than the current generation marks the response as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: ExecutionKind,
    pub token: u64,
}

/// Whether a completion was applied to the view or discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The response arrived for a superseded dispatch (language or problem
    /// changed, or a newer dispatch took over). Nothing was touched.
    Stale,
}

#[derive(Default)]
struct CoordinatorState {
    phase: ExecutionPhase,
    /// Bumped on every dispatch and every invalidation. Responses carrying
    /// an older token are discarded; this is the entire cancellation
    /// mechanism. The network request itself is never aborted.
    generation: u64,
    inflight: Option<Dispatch>,
    results: Vec<TestResult>,
    submission: Option<Submission>,
    last_error: Option<WorkspaceError>,
}

/// Orchestrates the Run and Submit flows: blank-code validation, mutual
/// exclusion, and generation-token discard of stale responses.
///
/// Dispatch and completion are separate steps. [`Self::begin`] hands out a
/// ticket; the completion presents it and is discarded when the token no
/// longer matches the current generation.
pub struct ExecutionCoordinator {
    state: Mutex<CoordinatorState>,
}

impl ExecutionCoordinator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.lock().phase
    }

    /// True while a dispatch is outstanding; both affordances are disabled.
    pub fn is_busy(&self) -> bool {
        self.lock().inflight.is_some()
    }

    /// The per-test results currently displayed.
    pub fn results(&self) -> Vec<TestResult> {
        self.lock().results.clone()
    }

    /// The submission summary from the latest applied submit, if any.
    pub fn submission(&self) -> Option<Submission> {
        self.lock().submission.clone()
    }

    /// The dismissible error from the latest failed execution, if any.
    pub fn last_error(&self) -> Option<WorkspaceError> {
        self.lock().last_error.clone()
    }

    pub fn dismiss_error(&self) {
        let mut state = self.lock();
        state.last_error = None;
        if state.phase == ExecutionPhase::Failed {
            state.phase = ExecutionPhase::Idle;
        }
    }

    /// Mark any in-flight response stale. Called on every language and
    /// problem switch.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.generation += 1;
    }

    /// Drop the displayed results and submission summary.
    pub fn clear_view(&self) {
        let mut state = self.lock();
        state.results.clear();
        state.submission = None;
    }

    /// Validate and claim a dispatch slot.
    ///
    /// Returns `Ok(None)` when another execution is in flight; the attempt
    /// is a no-op, not queued. Blank code is rejected before any dispatch.
    pub fn begin(
        &self,
        kind: ExecutionKind,
        code: &str,
    ) -> Result<Option<Dispatch>, WorkspaceError> {
        if code.trim().is_empty() {
            return Err(WorkspaceError::Validation(format!(
                "Write some code before {}",
                kind.verb()
            )));
        }

        let mut state = self.lock();
        if state.inflight.is_some() {
            debug!(kind = ?kind, "Execution already in flight, ignoring");
            return Ok(None);
        }

        state.generation += 1;
        let dispatch = Dispatch {
            kind,
            token: state.generation,
        };
        state.inflight = Some(dispatch);
        state.phase = match kind {
            ExecutionKind::Run => ExecutionPhase::Running,
            ExecutionKind::Submit => ExecutionPhase::Submitting,
        };
        state.last_error = None;
        Ok(Some(dispatch))
    }

    /// Apply a run outcome if its token is still current.
    ///
    /// On success the results replace the view and any prior submission
    /// summary is cleared; a run never shows submission-level status. On
    /// failure the previous results are retained and the error is held as a
    /// dismissible message.
    pub fn complete_run(
        &self,
        dispatch: Dispatch,
        outcome: Result<Vec<TestResult>, WorkspaceError>,
    ) -> Applied {
        let mut state = self.lock();
        let owned = Self::settle(&mut state, dispatch);

        if dispatch.token != state.generation {
            debug!(
                token = dispatch.token,
                current = state.generation,
                "Discarding stale run response"
            );
            return Applied::Stale;
        }

        match outcome {
            Ok(results) => {
                state.results = results;
                state.submission = None;
                state.phase = ExecutionPhase::Idle;
            }
            Err(error) => {
                warn!(%error, "Run failed");
                state.last_error = Some(error);
                if owned {
                    state.phase = ExecutionPhase::Failed;
                }
            }
        }
        Applied::Applied
    }

    /// Apply a submit outcome if its token is still current. The stored
    /// submission's per-test results become the displayed view, so the test
    /// panel shows identical affordances regardless of path.
    pub fn complete_submit(
        &self,
        dispatch: Dispatch,
        outcome: Result<Submission, WorkspaceError>,
    ) -> Applied {
        let mut state = self.lock();
        let owned = Self::settle(&mut state, dispatch);

        if dispatch.token != state.generation {
            debug!(
                token = dispatch.token,
                current = state.generation,
                "Discarding stale submit response"
            );
            return Applied::Stale;
        }

        match outcome {
            Ok(submission) => {
                state.results = submission.test_results.clone();
                state.submission = Some(submission);
                state.phase = ExecutionPhase::Idle;
            }
            Err(error) => {
                warn!(%error, "Submit failed");
                state.last_error = Some(error);
                if owned {
                    state.phase = ExecutionPhase::Failed;
                }
            }
        }
        Applied::Applied
    }

    /// Resolve the in-flight slot for a settling dispatch. Returns whether
    /// the dispatch owned the slot; a stale owner still frees the phase so
    /// the affordances come back.
    fn settle(state: &mut CoordinatorState, dispatch: Dispatch) -> bool {
        if state.inflight.map(|d| d.token) == Some(dispatch.token) {
            state.inflight = None;
            if dispatch.token != state.generation {
                state.phase = ExecutionPhase::Idle;
            }
            true
        } else {
            false
        }
    }

    /// Abandon a dispatch whose completion will never arrive.
    fn release(&self, dispatch: Dispatch) {
        let mut state = self.lock();
        if state.inflight.map(|d| d.token) == Some(dispatch.token) {
            state.inflight = None;
            state.phase = ExecutionPhase::Idle;
        }
    }
}

impl Default for ExecutionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that frees the in-flight slot if a dispatch is dropped without
/// settling, so the Run/Submit affordances can never wedge disabled.
pub struct DispatchGuard<'a> {
    coordinator: &'a ExecutionCoordinator,
    dispatch: Dispatch,
    defused: bool,
}

impl<'a> DispatchGuard<'a> {
    pub fn new(coordinator: &'a ExecutionCoordinator, dispatch: Dispatch) -> Self {
        Self {
            coordinator,
            dispatch,
            defused: false,
        }
    }

    /// Defuse the guard (call this once the completion has been delivered).
    pub fn defuse(&mut self) {
        self.defused = true;
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if !self.defused {
            self.coordinator.release(self.dispatch);
        }
    }
}
