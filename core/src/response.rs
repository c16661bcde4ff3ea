//! Response and Action: what a host gets back from `Sys::execute`.
//!
//! `Response` is the synchronous result of one command. `Action`s are side
//! effects the host applies afterwards, in order: re-render an item, drop a
//! removed item, deliver a saved layout to `onLayoutSaved`, or observe a raw
//! engine event.

use serde::{Deserialize, Serialize};

use crate::engine::GridEvent;
use crate::types::item::{ItemId, ItemView};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action")]
pub enum Action {
    /// An item's geometry, label, classes or attributes changed.
    #[serde(rename = "render")]
    Render { view: ItemView },

    #[serde(rename = "remove")]
    Remove { id: ItemId },

    /// The `onLayoutSaved` callback.
    #[serde(rename = "layout.saved")]
    LayoutSaved { data: String },

    #[serde(rename = "event")]
    Event { event: GridEvent },
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EventKind;

    #[test]
    fn response_json_shape() {
        let ok = serde_json::to_string(&Response::Ok { output: "done".into() }).unwrap();
        assert_eq!(ok, r#"{"status":"ok","output":"done"}"#);
        let err = serde_json::to_string(&Response::Error { message: "bad".into() }).unwrap();
        assert_eq!(err, r#"{"status":"error","message":"bad"}"#);
    }

    #[test]
    fn layout_saved_json_shape() {
        let action = Action::LayoutSaved { data: "[]".into() };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"layout.saved","data":"[]"}"#);
    }

    #[test]
    fn event_action_carries_kind() {
        let action = Action::Event {
            event: GridEvent {
                kind: EventKind::DragStop,
                items: vec![ItemId(1)],
            },
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"kind\":\"dragstop\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
