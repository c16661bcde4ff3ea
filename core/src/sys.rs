use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::engine::{EngineProvider, EventKind, GridEngine, GridEvent};
use crate::error::{GridError, Result};
use crate::grid::adapter::GridAdapter;
use crate::grid::labels;
use crate::grid::lock::LockState;
use crate::grid::selection::{ClickTarget, Selection};
use crate::layout::bridge;
use crate::layout::record::LayoutRecord;
use crate::response::{Action, Response};
use crate::types::config::GridSettings;
use crate::types::item::{Interaction, ItemId, ItemView};


/// Central runtime for adgrid. Owns the grid, the selection and the lock
/// state; dispatches commands and reacts to engine events.
pub struct Sys {
    settings: GridSettings,
    adapter: GridAdapter,
    selection: Selection,
    locks: LockState,
    interaction: Option<(ItemId, Interaction)>,
    actions: Vec<Action>,
}


impl Sys {
    pub fn new(settings: GridSettings) -> Sys {
        let adapter = GridAdapter::new(settings.grid.clone());
        Sys {
            settings,
            adapter,
            selection: Selection::new(),
            locks: LockState::new(),
            interaction: None,
            actions: Vec::new(),
        }
    }

    /// Return a reference to the current settings.
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Bind the grid engine. Safe to call more than once.
    pub fn initialize(&mut self, provider: &dyn EngineProvider) -> bool {
        let ready = self.adapter.initialize(provider);
        self.pump();
        ready
    }

    pub fn is_initialized(&self) -> bool {
        self.adapter.is_initialized()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selection.current()
    }

    pub fn is_locked(&self, id: ItemId) -> bool {
        self.locks.is_locked(id)
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        self.actions.clear();
        let result = match cmd {
            Command::LoadLayout { data } => self.cmd_load_layout(&data),
            Command::SaveLayout => self.cmd_save_layout(),
            Command::AddItem => self.cmd_add_item(),
            Command::RemoveSelected => self.cmd_remove_selected(),
            Command::ToggleLock => self.cmd_toggle_lock(),
            Command::Click { target } => self.cmd_click(target),
            Command::DragStart { id } => self.cmd_drag_start(id),
            Command::DragStop { id, x, y } => self.cmd_drag_stop(id, x, y),
            Command::ResizeStart { id } => self.cmd_resize_start(id),
            Command::Resize { id, w, h } => self.cmd_resize(id, w, h),
            Command::ResizeStop { id } => self.cmd_resize_stop(id),
            Command::Status => self.cmd_status(),
            Command::View => self.cmd_view(),
            Command::Help { topic } => Ok(crate::help::help_text(topic.as_deref())),
        };
        match result {
            Ok(output) => Response::Ok { output },
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        }
    }

    /// Actions emitted during the last execute() call.
    pub fn pending_actions(&self) -> &[Action] {
        &self.actions
    }

    /// Take and clear accumulated actions.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    /// Current view of every item, in engine order.
    pub fn views(&self) -> Vec<ItemView> {
        match self.adapter.engine() {
            Ok(engine) => engine
                .nodes()
                .into_iter()
                .filter_map(|node| self.view_of(node.id, labels::label_for(node)))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Layout persistence
    // -----------------------------------------------------------------------

    fn cmd_load_layout(&mut self, data: &str) -> Result<String> {
        self.require_grid("load layout")?;
        if data.trim().is_empty() {
            info!("empty layout payload, nothing to load");
            return Ok("No layout data".into());
        }
        let records = bridge::prepare_import(data, &self.settings.item).map_err(|e| {
            error!(error = %e, "rejected layout payload");
            e
        })?;
        let count = records.len();
        self.adapter.engine_mut()?.load(records);
        self.pump();
        self.reconcile_locks()?;
        info!(items = count, "layout loaded");
        Ok(format!("Loaded {} items", count))
    }

    fn cmd_save_layout(&mut self) -> Result<String> {
        self.require_grid("save layout")?;
        let engine = self.adapter.engine()?;
        let records = bridge::export_records(engine, &self.locks);
        let data = bridge::encode(&records)?;
        info!(items = records.len(), "layout saved");
        self.actions.push(Action::LayoutSaved { data: data.clone() });
        Ok(data)
    }

    fn cmd_add_item(&mut self) -> Result<String> {
        self.require_grid("add ad space")?;
        let record = LayoutRecord::new_item(&self.settings.item);
        let id = self.adapter.engine_mut()?.add_widget(record).map_err(|e| {
            warn!(error = %e, "new ad space refused");
            e
        })?;
        self.pump();
        self.refresh(&[id]);
        info!(%id, "new ad space added");
        Ok(format!("Added ad space {}", id))
    }

    fn cmd_remove_selected(&mut self) -> Result<String> {
        self.require_grid("remove ad space")?;
        let Some(id) = self.selection.current() else {
            info!("no ad space selected to remove");
            return Ok("No ad space selected".into());
        };
        self.adapter.engine_mut()?.remove_widget(id)?;
        self.selection.deselect();
        self.pump();
        info!(%id, "selected ad space removed");
        Ok(format!("Removed ad space {}", id))
    }

    // -----------------------------------------------------------------------
    // Lock state
    // -----------------------------------------------------------------------

    fn cmd_toggle_lock(&mut self) -> Result<String> {
        self.require_grid("toggle lock")?;
        let Some(id) = self.selection.current() else {
            info!("no ad space selected to toggle lock state");
            return Ok("No ad space selected".into());
        };
        let engine = self.adapter.engine_mut()?;
        let locked = self.locks.toggle(engine, id)?;
        self.pump();
        self.refresh(&[id]);
        if locked {
            info!(%id, "ad space locked");
            Ok(format!("Locked ad space {}", id))
        } else {
            info!(%id, "ad space unlocked");
            Ok(format!("Unlocked ad space {}", id))
        }
    }

    fn reconcile_locks(&mut self) -> Result<()> {
        let engine = self.adapter.engine_mut()?;
        let ids = self.locks.reconcile(engine)?;
        self.pump();
        self.refresh(&ids);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn cmd_click(&mut self, target: ClickTarget) -> Result<String> {
        match target {
            ClickTarget::Item(id) => {
                if self.adapter.engine()?.node(id).is_none() {
                    warn!(%id, "click on unknown item ignored");
                    return Ok("No such ad space".into());
                }
                let previous = self.selection.select(id);
                if let Some(prev) = previous {
                    self.refresh(&[prev]);
                }
                self.refresh(&[id]);
                info!(%id, "ad space selected");
                Ok(format!("Selected ad space {}", id))
            }
            ClickTarget::GridBackground | ClickTarget::Canvas => {
                if let Some(prev) = self.selection.deselect() {
                    self.refresh(&[prev]);
                    info!(id = %prev, "ad space deselected");
                }
                Ok("Selection cleared".into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Pointer gestures
    // -----------------------------------------------------------------------

    fn cmd_drag_start(&mut self, id: ItemId) -> Result<String> {
        self.gesture(id, |engine| engine.start_drag(id))?;
        Ok(format!("Dragging ad space {}", id))
    }

    fn cmd_drag_stop(&mut self, id: ItemId, x: u32, y: u32) -> Result<String> {
        self.gesture(id, |engine| engine.stop_drag(id, x, y))?;
        Ok(format!("Moved ad space {}", id))
    }

    fn cmd_resize_start(&mut self, id: ItemId) -> Result<String> {
        self.gesture(id, |engine| engine.start_resize(id))?;
        Ok(format!("Resizing ad space {}", id))
    }

    fn cmd_resize(&mut self, id: ItemId, w: u32, h: u32) -> Result<String> {
        self.gesture(id, |engine| engine.resize_to(id, w, h))?;
        Ok(format!("Resized ad space {}", id))
    }

    fn cmd_resize_stop(&mut self, id: ItemId) -> Result<String> {
        self.gesture(id, |engine| engine.stop_resize(id))?;
        Ok(format!("Resized ad space {}", id))
    }

    fn gesture<F>(&mut self, id: ItemId, op: F) -> Result<()>
    where
        F: FnOnce(&mut dyn GridEngine) -> Result<()>,
    {
        let engine = self.adapter.engine_mut()?;
        if let Err(e) = op(engine) {
            warn!(%id, error = %e, "gesture rejected");
            return Err(e);
        }
        self.pump();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn cmd_status(&self) -> Result<String> {
        if !self.adapter.is_initialized() {
            return Ok("adgrid: grid not initialized".into());
        }
        let items = self.adapter.engine()?.nodes().len();
        let selected = match self.selection.current() {
            Some(id) => id.to_string(),
            None => "none".into(),
        };
        Ok(format!(
            "adgrid: {} items, {} locked, selected: {}",
            items,
            self.locks.locked_items().count(),
            selected
        ))
    }

    fn cmd_view(&self) -> Result<String> {
        self.adapter.engine()?;
        serde_json::to_string(&self.views()).map_err(GridError::Encode)
    }

    // -----------------------------------------------------------------------
    // Engine events
    // -----------------------------------------------------------------------

    fn require_grid(&self, operation: &str) -> Result<()> {
        if self.adapter.is_initialized() {
            Ok(())
        } else {
            error!(operation, "grid is not initialized");
            Err(GridError::NotInitialized)
        }
    }

    /// Deliver queued engine events, in firing order, until none remain.
    fn pump(&mut self) {
        loop {
            let events = match self.adapter.engine_mut() {
                Ok(engine) => engine.drain_events(),
                Err(_) => return,
            };
            if events.is_empty() {
                return;
            }
            for event in events {
                self.on_event(event);
            }
        }
    }

    fn on_event(&mut self, event: GridEvent) {
        debug!(event = event.kind.as_str(), items = ?event.items, "grid event");
        self.adapter.compact_after(event.kind);
        match event.kind {
            EventKind::Removed => {
                for id in &event.items {
                    self.locks.forget(*id);
                    if self.selection.forget(*id) {
                        debug!(%id, "selection cleared by removal");
                    }
                    if matches!(self.interaction, Some((active, _)) if active == *id) {
                        self.interaction = None;
                    }
                    self.actions.push(Action::Remove { id: *id });
                }
            }
            EventKind::ResizeStart | EventKind::DragStart => {
                let kind = if event.kind == EventKind::ResizeStart {
                    Interaction::Resizing
                } else {
                    Interaction::Dragging
                };
                if let Some(id) = event.items.first() {
                    self.interaction = Some((*id, kind));
                }
                self.refresh(&event.items);
            }
            EventKind::ResizeStop | EventKind::DragStop => {
                self.interaction = None;
                self.refresh(&event.items);
            }
            EventKind::Added | EventKind::Change | EventKind::Resize => {
                self.refresh(&event.items);
            }
        }
        self.actions.push(Action::Event { event });
    }

    /// Re-render the given items with freshly computed labels.
    fn refresh(&mut self, ids: &[ItemId]) {
        let Ok(engine) = self.adapter.engine() else {
            return;
        };
        let views: Vec<ItemView> = labels::refresh(engine, ids)
            .into_iter()
            .filter_map(|(id, label)| self.view_of(id, label))
            .collect();
        self.actions
            .extend(views.into_iter().map(|view| Action::Render { view }));
    }

    fn view_of(&self, id: ItemId, label: String) -> Option<ItemView> {
        let node = self.adapter.engine().ok()?.node(id)?;
        let interaction = self
            .interaction
            .filter(|(active, _)| *active == id)
            .map(|(_, kind)| kind);
        Some(ItemView::project(
            node,
            label,
            self.selection.is_selected(id),
            self.locks.is_locked(id),
            interaction,
        ))
    }
}
