use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Query parameter the active tab is mirrored into.
pub const TAB_PARAM: &str = "tab";

/// Tabs of the problem workspace. The navigable location is the source of
/// truth, so back/forward and shared links restore the selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkspaceTab {
    #[default]
    Description,
    Solutions,
    Submissions,
}

impl WorkspaceTab {
    /// All tabs, in display order.
    pub const ALL: &'static [WorkspaceTab] =
        &[Self::Description, Self::Solutions, Self::Submissions];

    /// Value written to the query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Solutions => "solutions",
            Self::Submissions => "submissions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Solutions => "Solutions",
            Self::Submissions => "Submissions",
        }
    }

    fn from_param(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(value))
            .copied()
    }
}

impl fmt::Display for WorkspaceTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The navigable location the workspace reflects its tab into. Writes
/// replace the query parameter without a full reload.
pub trait Location: Send + Sync {
    fn query(&self, key: &str) -> Option<String>;
    fn set_query(&self, key: &str, value: &str);
}

/// Keeps the active workspace tab and the location in sync.
pub struct TabSync {
    location: Arc<dyn Location>,
}

impl TabSync {
    pub fn new(location: Arc<dyn Location>) -> Self {
        Self { location }
    }

    /// The current tab. Absent or unrecognized parameters fall back to
    /// Description.
    pub fn active_tab(&self) -> WorkspaceTab {
        self.location
            .query(TAB_PARAM)
            .and_then(|value| WorkspaceTab::from_param(&value))
            .unwrap_or_default()
    }

    /// Select a tab. Writing the already-active tab is a no-op, so no
    /// redundant navigation entry is created.
    pub fn set_tab(&self, tab: WorkspaceTab) {
        if self.active_tab() == tab {
            return;
        }
        self.location.set_query(TAB_PARAM, tab.as_str());
    }
}

/// In-process location for tests and the terminal shell.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    params: Mutex<HashMap<String, String>>,
    writes: Mutex<u32>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(key: &str, value: &str) -> Self {
        let location = Self::new();
        location.set_query(key, value);
        *location.writes.lock().unwrap_or_else(PoisonError::into_inner) = 0;
        location
    }

    /// Number of query writes, for asserting on redundant navigation.
    pub fn write_count(&self) -> u32 {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Location for MemoryLocation {
    fn query(&self, key: &str) -> Option<String> {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_query(&self, key: &str, value: &str) {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}
