use std::sync::Arc;
use std::time::{Duration, Instant};

use common::Language;
use tracing::warn;

use crate::store::KeyValueStore;

/// Storage key for a (problem, language) draft.
fn draft_key(problem_id: i32, language: Language) -> String {
    format!("{problem_id}_{language}")
}

/// Per-problem, per-language code drafts backed by the persistence port.
///
/// Drafts survive reloads, are scoped to this client, and are never deleted
/// automatically.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved draft for the pair, or `None` when starter code should be
    /// resolved instead.
    pub fn load(&self, problem_id: i32, language: Language) -> Option<String> {
        self.store.get(&draft_key(problem_id, language))
    }

    /// Write-through save. A failed write is logged and dropped; local
    /// persistence is a convenience, not a guarantee.
    pub fn save(&self, problem_id: i32, language: Language, code: &str) {
        if let Err(error) = self.store.set(&draft_key(problem_id, language), code) {
            warn!(problem_id, language = %language, %error, "Dropped draft write");
        }
    }

    pub fn clear(&self, problem_id: i32, language: Language) {
        self.store.remove(&draft_key(problem_id, language));
    }
}

/// Throttles draft writes so fast typing does not hit the store on every
/// keystroke.
///
/// The first write in a quiet period goes straight through. Writes arriving
/// within `min_interval` of the last stored one are held in a single pending
/// slot (latest edit wins) until [`DraftAutosave::flush`] runs: on blur,
/// language switch, run, or submit.
pub struct DraftAutosave {
    drafts: DraftStore,
    min_interval: Duration,
    last_write: Option<Instant>,
    pending: Option<PendingDraft>,
}

struct PendingDraft {
    problem_id: i32,
    language: Language,
    code: String,
}

impl DraftAutosave {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300);

    pub fn new(drafts: DraftStore) -> Self {
        Self::with_interval(drafts, Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(drafts: DraftStore, min_interval: Duration) -> Self {
        Self {
            drafts,
            min_interval,
            last_write: None,
            pending: None,
        }
    }

    /// Record an edit, writing through unless the previous write was too
    /// recent.
    pub fn record(&mut self, problem_id: i32, language: Language, code: &str) {
        let now = Instant::now();
        let too_soon = self
            .last_write
            .is_some_and(|last| now.duration_since(last) < self.min_interval);

        if too_soon {
            self.pending = Some(PendingDraft {
                problem_id,
                language,
                code: code.to_string(),
            });
        } else {
            self.drafts.save(problem_id, language, code);
            self.last_write = Some(now);
            self.pending = None;
        }
    }

    /// Write any held draft immediately.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.drafts
                .save(pending.problem_id, pending.language, &pending.code);
            self.last_write = Some(Instant::now());
        }
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }
}
