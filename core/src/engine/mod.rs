//! Grid engine port.
//!
//! The layout engine (placement, compaction, pointer physics) is an external
//! collaborator. `GridEngine` is the surface the core consumes and
//! `EngineProvider` is how a host supplies one. Engines queue lifecycle
//! events in firing order; the core drains and handles them synchronously
//! after every engine call.

pub mod headless;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::record::LayoutRecord;
use crate::types::config::GridConfig;
use crate::types::item::{GridNode, ItemId};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Added,
    Removed,
    Change,
    ResizeStart,
    Resize,
    ResizeStop,
    DragStart,
    DragStop,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::Added,
        EventKind::Removed,
        EventKind::Change,
        EventKind::ResizeStart,
        EventKind::Resize,
        EventKind::ResizeStop,
        EventKind::DragStart,
        EventKind::DragStop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Removed => "removed",
            EventKind::Change => "change",
            EventKind::ResizeStart => "resizestart",
            EventKind::Resize => "resize",
            EventKind::ResizeStop => "resizestop",
            EventKind::DragStart => "dragstart",
            EventKind::DragStop => "dragstop",
        }
    }

    /// Structural mutations after which the engine is asked to compact.
    pub fn triggers_compaction(&self) -> bool {
        matches!(self, EventKind::Added | EventKind::Change)
    }
}


/// A lifecycle event fired by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEvent {
    pub kind: EventKind,
    pub items: Vec<ItemId>,
}


pub trait GridEngine: Send {
    /// Register interest in event kinds. Only registered kinds are queued.
    fn on(&mut self, kinds: &[EventKind]);

    /// Insert an item, placing it when the record carries no `y`.
    ///
    /// Fails without changing anything when an unplaced item does not fit
    /// below the existing items.
    fn add_widget(&mut self, record: LayoutRecord) -> Result<ItemId>;

    fn remove_widget(&mut self, id: ItemId) -> Result<()>;

    fn movable(&mut self, id: ItemId, movable: bool) -> Result<()>;

    fn resizable(&mut self, id: ItemId, resizable: bool) -> Result<()>;

    /// Ask the engine to close gaps between items.
    fn compact(&mut self);

    /// Snapshot every item, in the same order as `nodes()`.
    fn save(&self, include_content: bool) -> Vec<LayoutRecord>;

    /// Replace all items with the given records. Unplaced records with no
    /// room left are dropped.
    fn load(&mut self, layout: Vec<LayoutRecord>);

    fn node(&self, id: ItemId) -> Option<&GridNode>;

    fn nodes(&self) -> Vec<&GridNode>;

    /// Take queued events, oldest first.
    fn drain_events(&mut self) -> Vec<GridEvent>;

    fn start_drag(&mut self, id: ItemId) -> Result<()>;

    fn stop_drag(&mut self, id: ItemId, x: u32, y: u32) -> Result<()>;

    fn start_resize(&mut self, id: ItemId) -> Result<()>;

    fn resize_to(&mut self, id: ItemId, w: u32, h: u32) -> Result<()>;

    fn stop_resize(&mut self, id: ItemId) -> Result<()>;
}


/// Creates an engine bound to a container, or reports the library missing.
pub trait EngineProvider {
    fn init(&self, config: &GridConfig, selector: &str) -> Result<Box<dyn GridEngine>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_engine_vocabulary() {
        let names: Vec<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "added",
                "removed",
                "change",
                "resizestart",
                "resize",
                "resizestop",
                "dragstart",
                "dragstop"
            ]
        );
    }

    #[test]
    fn only_add_and_change_compact() {
        let compacting: Vec<EventKind> = EventKind::ALL
            .iter()
            .copied()
            .filter(|k| k.triggers_compaction())
            .collect();
        assert_eq!(compacting, vec![EventKind::Added, EventKind::Change]);
    }
}
