//! Command: the typed inbound port for every adgrid operation.
//!
//! The five host boundary functions map onto `layout.load`, `layout.save`,
//! `item.add`, `item.remove` and `item.lock`. The remaining commands carry
//! pointer input and read-only queries from the hosting UI.

use serde::{Deserialize, Serialize};

use crate::grid::selection::ClickTarget;
use crate::types::item::ItemId;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Host boundary functions
    // -----------------------------------------------------------------

    /// `loadSerializedLayout(serializedData)`
    #[serde(rename = "layout.load")]
    LoadLayout {
        data: String,
    },

    /// `saveLayout()`, answered through `onLayoutSaved`.
    #[serde(rename = "layout.save")]
    SaveLayout,

    /// `addNewAdSpace()`
    #[serde(rename = "item.add")]
    AddItem,

    /// `removeSelectedAdSpace()`
    #[serde(rename = "item.remove")]
    RemoveSelected,

    /// `toggleLock()`
    #[serde(rename = "item.lock")]
    ToggleLock,

    // -----------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------

    #[serde(rename = "click")]
    Click {
        target: ClickTarget,
    },

    #[serde(rename = "drag.start")]
    DragStart {
        id: ItemId,
    },

    #[serde(rename = "drag.stop")]
    DragStop {
        id: ItemId,
        x: u32,
        y: u32,
    },

    #[serde(rename = "resize.start")]
    ResizeStart {
        id: ItemId,
    },

    #[serde(rename = "resize")]
    Resize {
        id: ItemId,
        w: u32,
        h: u32,
    },

    #[serde(rename = "resize.stop")]
    ResizeStop {
        id: ItemId,
    },

    // -----------------------------------------------------------------
    // Queries / Help
    // -----------------------------------------------------------------

    #[serde(rename = "status")]
    Status,

    /// Every item's current `ItemView`, as a JSON array.
    #[serde(rename = "view")]
    View,

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}

impl Command {
    /// Whether the command can change the persisted layout.
    pub fn mutates_layout(&self) -> bool {
        matches!(
            self,
            Command::LoadLayout { .. }
                | Command::AddItem
                | Command::RemoveSelected
                | Command::ToggleLock
                | Command::DragStop { .. }
                | Command::Resize { .. }
                | Command::ResizeStop { .. }
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_layout_round_trip() {
        let cmd = Command::LoadLayout {
            data: "[]".into(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"command\":\"layout.load\""));
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn boundary_command_tags() {
        let cases = [
            (Command::SaveLayout, "layout.save"),
            (Command::AddItem, "item.add"),
            (Command::RemoveSelected, "item.remove"),
            (Command::ToggleLock, "item.lock"),
        ];
        for (cmd, tag) in cases {
            let json = serde_json::to_string(&cmd).unwrap();
            assert_eq!(json, format!("{{\"command\":\"{}\"}}", tag));
        }
    }

    #[test]
    fn click_parses_from_host_json() {
        let cmd: Command = serde_json::from_str(r#"{"command":"click","target":{"item":4}}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Click {
                target: ClickTarget::Item(ItemId(4))
            }
        );
        let cmd: Command =
            serde_json::from_str(r#"{"command":"click","target":"grid_background"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Click {
                target: ClickTarget::GridBackground
            }
        );
    }

    #[test]
    fn drag_stop_round_trip() {
        let cmd = Command::DragStop {
            id: ItemId(2),
            x: 5,
            y: 1,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"command\":\"drag.stop\""));
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn help_topic_is_optional() {
        let cmd: Command = serde_json::from_str(r#"{"command":"help"}"#).unwrap();
        assert_eq!(cmd, Command::Help { topic: None });
    }

    #[test]
    fn queries_do_not_mutate() {
        assert!(!Command::Status.mutates_layout());
        assert!(!Command::View.mutates_layout());
        assert!(!Command::SaveLayout.mutates_layout());
        assert!(Command::AddItem.mutates_layout());
    }
}
