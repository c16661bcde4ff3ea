//! Lock state: the one authoritative record of which items are locked.
//!
//! The engine's move/resize-disable flags, the `locked` class and the
//! `gs-locked` attribute are all derived from this set. Every transition
//! writes the engine flags together with the set.

use std::collections::BTreeSet;

use crate::engine::GridEngine;
use crate::error::{GridError, Result};
use crate::types::item::ItemId;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockState {
    locked: BTreeSet<ItemId>,
}


impl LockState {
    pub fn new() -> LockState {
        LockState::default()
    }

    pub fn is_locked(&self, id: ItemId) -> bool {
        self.locked.contains(&id)
    }

    pub fn locked_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.locked.iter().copied()
    }

    /// Flip `id` between locked and unlocked. Returns the new state.
    pub fn toggle(&mut self, engine: &mut dyn GridEngine, id: ItemId) -> Result<bool> {
        engine.node(id).ok_or(GridError::UnknownItem(id))?;
        let locked = !self.is_locked(id);
        self.apply(engine, id, locked)?;
        Ok(locked)
    }

    /// Rebuild the set from the engine flags: an item is locked iff both
    /// move and resize are disabled. Flags are written back so a half-set
    /// item ends up fully unlocked. Returns every item visited.
    pub fn reconcile(&mut self, engine: &mut dyn GridEngine) -> Result<Vec<ItemId>> {
        let states: Vec<(ItemId, bool)> = engine
            .nodes()
            .iter()
            .map(|n| (n.id, n.no_move && n.no_resize))
            .collect();
        self.locked.clear();
        for (id, locked) in &states {
            self.apply(engine, *id, *locked)?;
        }
        Ok(states.into_iter().map(|(id, _)| id).collect())
    }

    pub fn forget(&mut self, id: ItemId) {
        self.locked.remove(&id);
    }

    fn apply(&mut self, engine: &mut dyn GridEngine, id: ItemId, locked: bool) -> Result<()> {
        engine.movable(id, !locked)?;
        engine.resizable(id, !locked)?;
        if locked {
            self.locked.insert(id);
        } else {
            self.locked.remove(&id);
        }
        Ok(())
    }
}
