//! Headless engine: an in-memory `GridEngine` with no renderer.
//!
//! Stores geometry in insertion order, clamps sizes to the item minimums and
//! keeps every item inside the column and row bounds, honours move/resize-disable flags, and queues lifecycle
//! events. It does not pack or resolve collisions: `compact()` is recorded
//! and positions stay where they were put. New items without a `y` go below
//! the lowest existing item, or are refused when that runs past the last row.

use tracing::{debug, warn};

use super::{EngineProvider, EventKind, GridEngine, GridEvent};
use crate::error::{GridError, Result};
use crate::layout::record::LayoutRecord;
use crate::types::config::GridConfig;
use crate::types::item::{GridNode, ItemId};


pub struct HeadlessEngine {
    columns: u32,
    rows: u32,
    nodes: Vec<GridNode>,
    next_id: u64,
    listening: Vec<EventKind>,
    events: Vec<GridEvent>,
    compactions: usize,
}


impl HeadlessEngine {
    pub fn new(config: &GridConfig) -> HeadlessEngine {
        HeadlessEngine {
            columns: config.column.max(1),
            rows: config.row.max(1),
            nodes: Vec::new(),
            next_id: 1,
            listening: Vec::new(),
            events: Vec::new(),
            compactions: 0,
        }
    }

    /// Number of compaction requests received so far.
    pub fn compactions(&self) -> usize {
        self.compactions
    }

    fn emit(&mut self, kind: EventKind, items: Vec<ItemId>) {
        if items.is_empty() || !self.listening.contains(&kind) {
            return;
        }
        debug!(event = kind.as_str(), ?items, "engine event queued");
        self.events.push(GridEvent { kind, items });
    }

    fn index_of(&self, id: ItemId) -> Result<usize> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(GridError::UnknownItem(id))
    }

    fn node_mut(&mut self, id: ItemId) -> Result<&mut GridNode> {
        let idx = self.index_of(id)?;
        Ok(&mut self.nodes[idx])
    }

    /// First free row below every existing item.
    fn bottom(&self) -> u32 {
        self.nodes
            .iter()
            .map(|n| n.y.saturating_add(n.h))
            .max()
            .unwrap_or(0)
    }

    fn insert(&mut self, record: LayoutRecord) -> Result<ItemId> {
        let placed = record.y;
        let mut node = GridNode {
            id: ItemId(self.next_id),
            x: record.x,
            y: placed.unwrap_or(0),
            w: record.w,
            h: record.h,
            min_w: record.min_w.unwrap_or(1),
            min_h: record.min_h.unwrap_or(1),
            content: record.content.unwrap_or_default(),
            no_move: record.no_move.unwrap_or(false),
            no_resize: record.no_resize.unwrap_or(false),
        };
        clamp(&mut node, self.columns, self.rows);
        if placed.is_none() {
            let y = self.bottom();
            if y.saturating_add(node.h) > self.rows {
                return Err(GridError::GridFull {
                    rows: self.rows,
                    h: node.h,
                });
            }
            node.y = y;
        }
        self.next_id += 1;
        let id = node.id;
        self.nodes.push(node);
        Ok(id)
    }

    fn check_movable(&self, id: ItemId) -> Result<usize> {
        let idx = self.index_of(id)?;
        if self.nodes[idx].no_move {
            return Err(GridError::ItemLocked(id));
        }
        Ok(idx)
    }

    fn check_resizable(&self, id: ItemId) -> Result<usize> {
        let idx = self.index_of(id)?;
        if self.nodes[idx].no_resize {
            return Err(GridError::ItemLocked(id));
        }
        Ok(idx)
    }
}


/// Enforce minimum size and keep the item inside the columns and rows.
fn clamp(node: &mut GridNode, columns: u32, rows: u32) {
    node.min_w = node.min_w.clamp(1, columns);
    node.min_h = node.min_h.clamp(1, rows);
    node.w = node.w.max(node.min_w).min(columns);
    node.h = node.h.max(node.min_h).min(rows);
    node.x = node.x.min(columns - node.w);
    node.y = node.y.min(rows - node.h);
}


impl GridEngine for HeadlessEngine {
    fn on(&mut self, kinds: &[EventKind]) {
        for kind in kinds {
            if !self.listening.contains(kind) {
                self.listening.push(*kind);
            }
        }
    }

    fn add_widget(&mut self, record: LayoutRecord) -> Result<ItemId> {
        let id = self.insert(record)?;
        self.emit(EventKind::Added, vec![id]);
        Ok(id)
    }

    fn remove_widget(&mut self, id: ItemId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.nodes.remove(idx);
        self.emit(EventKind::Removed, vec![id]);
        Ok(())
    }

    fn movable(&mut self, id: ItemId, movable: bool) -> Result<()> {
        self.node_mut(id)?.no_move = !movable;
        Ok(())
    }

    fn resizable(&mut self, id: ItemId, resizable: bool) -> Result<()> {
        self.node_mut(id)?.no_resize = !resizable;
        Ok(())
    }

    fn compact(&mut self) {
        self.compactions += 1;
    }

    fn save(&self, include_content: bool) -> Vec<LayoutRecord> {
        self.nodes
            .iter()
            .map(|n| LayoutRecord {
                x: n.x,
                y: Some(n.y),
                w: n.w,
                h: n.h,
                content: include_content.then(|| n.content.clone()),
                min_w: Some(n.min_w),
                min_h: Some(n.min_h),
                locked: false,
                no_move: n.no_move.then_some(true),
                no_resize: n.no_resize.then_some(true),
            })
            .collect()
    }

    fn load(&mut self, layout: Vec<LayoutRecord>) {
        let removed: Vec<ItemId> = self.nodes.drain(..).map(|n| n.id).collect();
        self.emit(EventKind::Removed, removed);
        let mut added = Vec::new();
        for record in layout {
            match self.insert(record) {
                Ok(id) => added.push(id),
                Err(e) => warn!(error = %e, "layout item dropped"),
            }
        }
        self.emit(EventKind::Added, added);
    }

    fn node(&self, id: ItemId) -> Option<&GridNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn nodes(&self) -> Vec<&GridNode> {
        self.nodes.iter().collect()
    }

    fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_drag(&mut self, id: ItemId) -> Result<()> {
        self.check_movable(id)?;
        self.emit(EventKind::DragStart, vec![id]);
        Ok(())
    }

    fn stop_drag(&mut self, id: ItemId, x: u32, y: u32) -> Result<()> {
        let idx = self.check_movable(id)?;
        let (columns, rows) = (self.columns, self.rows);
        let node = &mut self.nodes[idx];
        let before = (node.x, node.y);
        node.x = x;
        node.y = y;
        clamp(node, columns, rows);
        let moved = (node.x, node.y) != before;
        self.emit(EventKind::DragStop, vec![id]);
        if moved {
            self.emit(EventKind::Change, vec![id]);
        }
        Ok(())
    }

    fn start_resize(&mut self, id: ItemId) -> Result<()> {
        self.check_resizable(id)?;
        self.emit(EventKind::ResizeStart, vec![id]);
        Ok(())
    }

    fn resize_to(&mut self, id: ItemId, w: u32, h: u32) -> Result<()> {
        let idx = self.check_resizable(id)?;
        let (columns, rows) = (self.columns, self.rows);
        let node = &mut self.nodes[idx];
        node.w = w;
        node.h = h;
        clamp(node, columns, rows);
        self.emit(EventKind::Resize, vec![id]);
        Ok(())
    }

    fn stop_resize(&mut self, id: ItemId) -> Result<()> {
        self.check_resizable(id)?;
        self.emit(EventKind::ResizeStop, vec![id]);
        self.emit(EventKind::Change, vec![id]);
        Ok(())
    }
}


/// Provider for `HeadlessEngine`. Always available.
pub struct HeadlessProvider;

impl EngineProvider for HeadlessProvider {
    fn init(&self, config: &GridConfig, selector: &str) -> Result<Box<dyn GridEngine>> {
        debug!(selector, columns = config.column, rows = config.row, "headless engine bound");
        Ok(Box::new(HeadlessEngine::new(config)))
    }
}
