//! Item identity, live geometry, and the render projection handed to hosts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};


/// CSS classes a host applies to rendered items.
pub mod classes {
    pub const ITEM: &str = "grid-stack-item";
    pub const SELECTED: &str = "selected";
    pub const LOCKED: &str = "locked";
    pub const RESIZING: &str = "grid-stack-item-resizing";
    pub const DRAGGING: &str = "grid-stack-item-dragging";
}

/// Element attributes a host applies to rendered items.
pub mod attributes {
    pub const ID: &str = "gs-id";
    pub const LOCKED: &str = "gs-locked";
}


/// Engine-assigned item identifier. Never reused within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// An item as the engine holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNode {
    pub id: ItemId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
    pub content: String,
    pub no_move: bool,
    pub no_resize: bool,
}


/// Pointer gesture currently in progress on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    Dragging,
    Resizing,
}


/// Render projection of one item.
///
/// Derived on read from the engine node plus the selection, lock and
/// interaction state. Nothing here is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub content: String,
    pub label: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
}

impl ItemView {
    pub fn project(
        node: &GridNode,
        label: String,
        selected: bool,
        locked: bool,
        interaction: Option<Interaction>,
    ) -> ItemView {
        let mut class_list = vec![classes::ITEM.to_string()];
        if selected {
            class_list.push(classes::SELECTED.into());
        }
        if locked {
            class_list.push(classes::LOCKED.into());
        }
        match interaction {
            Some(Interaction::Resizing) => class_list.push(classes::RESIZING.into()),
            Some(Interaction::Dragging) => class_list.push(classes::DRAGGING.into()),
            None => {}
        }

        let mut attrs = BTreeMap::new();
        attrs.insert(attributes::ID.to_string(), node.id.to_string());
        if locked {
            attrs.insert(attributes::LOCKED.to_string(), "true".to_string());
        }

        ItemView {
            id: node.id,
            x: node.x,
            y: node.y,
            w: node.w,
            h: node.h,
            content: node.content.clone(),
            label,
            classes: class_list,
            attributes: attrs,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
