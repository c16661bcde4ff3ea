//! Layout record: one entry of the serialized layout interchange format.
//!
//! A serialized layout is a JSON array of records in item order:
//!
//! ```json
//! [{"x":0,"y":0,"w":3,"h":3,"content":"New Ad Space","minW":3,"minH":3,"locked":false}]
//! ```
//!
//! Missing `x`/`y` mean "let the engine place it"; missing `w`/`h` default to 1.
//! `noMove`/`noResize` are written only when set. Cell values may be any JSON
//! number: fractions round to the nearest cell and negatives read as 0.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::config::ItemDefaults;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    #[serde(default, deserialize_with = "cell")]
    pub x: u32,
    #[serde(default, deserialize_with = "opt_cell", skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    #[serde(default = "default_span", deserialize_with = "cell")]
    pub w: u32,
    #[serde(default = "default_span", deserialize_with = "cell")]
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opt_cell", skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, deserialize_with = "opt_cell", skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_move: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_resize: Option<bool>,
}

fn default_span() -> u32 {
    1
}

/// Float-to-int `as` saturates, so negatives land on 0 and huge values on `u32::MAX`.
fn to_cell(value: f64) -> u32 {
    value.round() as u32
}

fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    f64::deserialize(deserializer).map(to_cell)
}

fn opt_cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Option::<f64>::deserialize(deserializer).map(|v| v.map(to_cell))
}


impl LayoutRecord {
    /// The record for a freshly added, unlocked item.
    pub fn new_item(defaults: &ItemDefaults) -> LayoutRecord {
        LayoutRecord {
            x: 0,
            y: None,
            w: defaults.w,
            h: defaults.h,
            content: Some(defaults.content.clone()),
            min_w: Some(defaults.min_w),
            min_h: Some(defaults.min_h),
            locked: false,
            no_move: None,
            no_resize: None,
        }
    }

    /// Whether the engine should hold this item immovable and fixed-size.
    pub fn is_pinned(&self) -> bool {
        self.no_move.unwrap_or(false) && self.no_resize.unwrap_or(false)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_uses_defaults() {
        let rec: LayoutRecord = serde_json::from_str(r#"{"content":"A"}"#).unwrap();
        assert_eq!(rec.x, 0);
        assert_eq!(rec.y, None);
        assert_eq!((rec.w, rec.h), (1, 1));
        assert!(!rec.locked);
        assert_eq!(rec.no_move, None);
    }

    #[test]
    fn fractional_and_negative_cells_are_normalised() {
        let rec: LayoutRecord =
            serde_json::from_str(r#"{"x":-2,"y":1.4,"w":3.0,"h":2.6,"minW":2.5}"#).unwrap();
        assert_eq!(rec.x, 0);
        assert_eq!(rec.y, Some(1));
        assert_eq!((rec.w, rec.h), (3, 3));
        assert_eq!(rec.min_w, Some(3));
        let rec: LayoutRecord = serde_json::from_str(r#"{"y":null,"w":1e12}"#).unwrap();
        assert_eq!(rec.y, None);
        assert_eq!(rec.w, u32::MAX);
    }

    #[test]
    fn non_numeric_cells_are_rejected() {
        assert!(serde_json::from_str::<LayoutRecord>(r#"{"w":"wide"}"#).is_err());
    }

    #[test]
    fn camel_case_field_names() {
        let rec = LayoutRecord {
            no_move: Some(true),
            no_resize: Some(true),
            locked: true,
            ..LayoutRecord::new_item(&ItemDefaults::default())
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"minW\":3"));
        assert!(json.contains("\"minH\":3"));
        assert!(json.contains("\"noMove\":true"));
        assert!(json.contains("\"noResize\":true"));
        assert!(json.contains("\"locked\":true"));
        assert!(!json.contains("\"y\""));
    }

    #[test]
    fn new_item_matches_defaults() {
        let rec = LayoutRecord::new_item(&ItemDefaults::default());
        assert_eq!(rec.x, 0);
        assert_eq!((rec.w, rec.h), (3, 3));
        assert_eq!(rec.content.as_deref(), Some("New Ad Space"));
        assert!(!rec.locked);
        assert!(!rec.is_pinned());
    }

    #[test]
    fn pinned_needs_both_flags() {
        let mut rec = LayoutRecord::new_item(&ItemDefaults::default());
        rec.no_move = Some(true);
        assert!(!rec.is_pinned());
        rec.no_resize = Some(true);
        assert!(rec.is_pinned());
    }
}
