//! Selection tracker: at most one selected item, held by id only.

use serde::{Deserialize, Serialize};

use crate::types::item::ItemId;


/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    /// On an item inside the grid area.
    Item(ItemId),
    /// Inside the grid area but not on an item.
    GridBackground,
    /// On the surrounding canvas, outside the grid area.
    Canvas,
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<ItemId>,
}


impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.current == Some(id)
    }

    /// Select `id`, returning the item that lost the selection, if any.
    pub fn select(&mut self, id: ItemId) -> Option<ItemId> {
        self.current.replace(id).filter(|prev| *prev != id)
    }

    /// Clear the selection, returning the item that held it.
    pub fn deselect(&mut self) -> Option<ItemId> {
        self.current.take()
    }

    /// Clear the selection if it refers to `id`.
    pub fn forget(&mut self, id: ItemId) -> bool {
        if self.current == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
