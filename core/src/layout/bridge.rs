//! Layout bridge: encode and decode the serialized layout.
//!
//! Decoding validates the whole payload before anything touches the engine,
//! so a rejected payload never causes a partial mutation.

use crate::engine::GridEngine;
use crate::error::{GridError, Result};
use crate::grid::lock::LockState;
use crate::layout::record::LayoutRecord;
use crate::types::config::ItemDefaults;


/// Parse layout text into records. The text must be a JSON array.
pub fn parse_layout(data: &str) -> Result<Vec<LayoutRecord>> {
    let value: serde_json::Value = serde_json::from_str(data).map_err(GridError::MalformedLayout)?;
    if !value.is_array() {
        return Err(GridError::NotASequence);
    }
    serde_json::from_value(value).map_err(GridError::MalformedLayout)
}

/// Parse layout text and prepare it for `GridEngine::load`.
///
/// Every record gets the configured minimum size. Records without explicit
/// move/resize flags take them from `locked`.
pub fn prepare_import(data: &str, defaults: &ItemDefaults) -> Result<Vec<LayoutRecord>> {
    let mut records = parse_layout(data)?;
    for record in &mut records {
        record.min_w = Some(defaults.min_w);
        record.min_h = Some(defaults.min_h);
        record.no_move.get_or_insert(record.locked);
        record.no_resize.get_or_insert(record.locked);
    }
    Ok(records)
}

/// Snapshot the engine, including content, with lock flags from `locks`.
pub fn export_records(engine: &dyn GridEngine, locks: &LockState) -> Vec<LayoutRecord> {
    let mut records = engine.save(true);
    for (node, record) in engine.nodes().into_iter().zip(records.iter_mut()) {
        record.locked = locks.is_locked(node.id);
    }
    records
}

pub fn encode(records: &[LayoutRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(GridError::Encode)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::headless::HeadlessEngine;
    use crate::types::config::GridConfig;

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(parse_layout("not json"), Err(GridError::MalformedLayout(_))));
    }

    #[test]
    fn parse_rejects_non_sequence() {
        assert!(matches!(parse_layout(r#"{"x":0}"#), Err(GridError::NotASequence)));
        assert!(matches!(parse_layout("42"), Err(GridError::NotASequence)));
    }

    #[test]
    fn parse_rejects_bad_entries() {
        assert!(matches!(parse_layout(r#"[{"w":"wide"}]"#), Err(GridError::MalformedLayout(_))));
        assert!(matches!(parse_layout("[1, 2]"), Err(GridError::MalformedLayout(_))));
    }

    #[test]
    fn parse_empty_sequence() {
        assert!(parse_layout("[]").unwrap().is_empty());
    }

    #[test]
    fn prepare_import_applies_minimums() {
        let records = prepare_import(r#"[{"x":0,"y":0,"w":2,"h":2,"content":"A"}]"#, &ItemDefaults::default()).unwrap();
        assert_eq!(records[0].min_w, Some(3));
        assert_eq!(records[0].min_h, Some(3));
        assert_eq!(records[0].no_move, Some(false));
    }

    #[test]
    fn prepare_import_derives_flags_from_locked() {
        let records = prepare_import(r#"[{"w":3,"h":3,"locked":true}]"#, &ItemDefaults::default()).unwrap();
        assert!(records[0].is_pinned());
    }

    #[test]
    fn prepare_import_keeps_explicit_flags() {
        let records =
            prepare_import(r#"[{"w":3,"h":3,"locked":true,"noMove":false}]"#, &ItemDefaults::default()).unwrap();
        assert_eq!(records[0].no_move, Some(false));
        assert_eq!(records[0].no_resize, Some(true));
    }

    #[test]
    fn export_marks_locked_items() {
        let mut engine = HeadlessEngine::new(&GridConfig::default());
        let a = engine.add_widget(LayoutRecord::new_item(&ItemDefaults::default())).unwrap();
        engine.add_widget(LayoutRecord::new_item(&ItemDefaults::default())).unwrap();
        let mut locks = LockState::new();
        locks.toggle(&mut engine, a).unwrap();
        let records = export_records(&engine, &locks);
        assert!(records[0].locked);
        assert!(!records[1].locked);
        let text = encode(&records).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("\"locked\":true"));
    }
}
