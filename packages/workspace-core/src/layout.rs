use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::KeyValueStore;

/// Smallest width a pane may occupy, in percent.
pub const MIN_PANE_PCT: f64 = 20.0;
/// Largest width a pane may occupy, in percent.
pub const MAX_PANE_PCT: f64 = 80.0;
/// Split used when nothing valid is stored.
pub const DEFAULT_SPLIT: [f64; 2] = [50.0, 50.0];
/// Below this viewport width the panes stack vertically and the split ratio
/// is ignored.
pub const STACK_BREAKPOINT_PX: u32 = 768;

fn layout_key(problem_id: i32) -> String {
    format!("split-sizes-{problem_id}")
}

fn clamp_sizes(sizes: [f64; 2]) -> [f64; 2] {
    sizes.map(|pct| pct.clamp(MIN_PANE_PCT, MAX_PANE_PCT))
}

/// Persisted description/editor split for a problem workspace, keyed per
/// problem.
#[derive(Clone)]
pub struct SplitLayout {
    store: Arc<dyn KeyValueStore>,
}

impl SplitLayout {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored split, clamped into range. Missing or malformed data
    /// yields the default without raising.
    pub fn load(&self, problem_id: i32) -> [f64; 2] {
        let Some(raw) = self.store.get(&layout_key(problem_id)) else {
            return DEFAULT_SPLIT;
        };
        match serde_json::from_str::<[f64; 2]>(&raw) {
            Ok(sizes) => clamp_sizes(sizes),
            Err(error) => {
                debug!(problem_id, %error, "Ignoring malformed stored split sizes");
                DEFAULT_SPLIT
            }
        }
    }

    /// Clamp and persist the split. Called on drag release only, not per
    /// pointer move.
    pub fn on_drag_end(&self, problem_id: i32, sizes: [f64; 2]) -> [f64; 2] {
        let clamped = clamp_sizes(sizes);
        match serde_json::to_string(&clamped) {
            Ok(json) => {
                if let Err(error) = self.store.set(&layout_key(problem_id), &json) {
                    warn!(problem_id, %error, "Dropped split layout write");
                }
            }
            Err(error) => warn!(problem_id, %error, "Failed to encode split layout"),
        }
        clamped
    }

    /// Forget the stored split for a problem.
    pub fn reset(&self, problem_id: i32) {
        self.store.remove(&layout_key(problem_id));
    }

    /// Stacked layout below the breakpoint: panes render vertically, full
    /// width each.
    pub fn is_stacked(viewport_width: u32) -> bool {
        viewport_width < STACK_BREAKPOINT_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn layout() -> (Arc<MemoryStore>, SplitLayout) {
        let store = Arc::new(MemoryStore::new());
        let layout = SplitLayout::new(store.clone());
        (store, layout)
    }

    #[test]
    fn test_default_when_nothing_stored() {
        let (_store, layout) = layout();
        assert_eq!(layout.load(1), DEFAULT_SPLIT);
    }

    #[test]
    fn test_round_trip_on_drag_end() {
        let (store, layout) = layout();
        layout.on_drag_end(1, [65.0, 35.0]);
        assert_eq!(layout.load(1), [65.0, 35.0]);
        assert_eq!(store.get("split-sizes-1"), Some("[65.0,35.0]".to_string()));
    }

    #[test]
    fn test_stored_values_clamped_on_load() {
        let (store, layout) = layout();
        store.set("split-sizes-1", "[95.0, 5.0]").unwrap();
        assert_eq!(layout.load(1), [80.0, 20.0]);
    }

    #[test]
    fn test_clamped_before_persisting() {
        let (_store, layout) = layout();
        assert_eq!(layout.on_drag_end(1, [10.0, 90.0]), [20.0, 80.0]);
        assert_eq!(layout.load(1), [20.0, 80.0]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_default() {
        let (store, layout) = layout();
        store.set("split-sizes-1", "{not json").unwrap();
        assert_eq!(layout.load(1), DEFAULT_SPLIT);
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let (store, layout) = layout();
        store.set("split-sizes-1", "[50.0]").unwrap();
        assert_eq!(layout.load(1), DEFAULT_SPLIT);
    }

    #[test]
    fn test_layouts_keyed_per_problem() {
        let (_store, layout) = layout();
        layout.on_drag_end(1, [70.0, 30.0]);
        assert_eq!(layout.load(2), DEFAULT_SPLIT);
    }

    #[test]
    fn test_reset_forgets_stored_split() {
        let (_store, layout) = layout();
        layout.on_drag_end(1, [70.0, 30.0]);
        layout.reset(1);
        assert_eq!(layout.load(1), DEFAULT_SPLIT);
    }

    #[test]
    fn test_stacked_below_breakpoint() {
        assert!(SplitLayout::is_stacked(767));
        assert!(!SplitLayout::is_stacked(768));
        assert!(!SplitLayout::is_stacked(1920));
    }
}
