pub mod api;
pub mod controller;
pub mod coordinator;
pub mod correlate;
pub mod draft;
pub mod error;
pub mod layout;
pub mod starter;
pub mod store;
pub mod tabs;

pub use controller::{AttemptOutcome, ProblemWorkspace};
pub use coordinator::{ExecutionCoordinator, ExecutionKind, ExecutionPhase};
pub use correlate::{correlate, CaseOutcome, CaseState};
pub use error::WorkspaceError;
pub use layout::SplitLayout;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use tabs::{Location, MemoryLocation, TabSync, WorkspaceTab};
