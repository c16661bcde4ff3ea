//! Label updater: renders each item's size as its display label.

use crate::engine::GridEngine;
use crate::types::item::{GridNode, ItemId};


pub fn label_for(node: &GridNode) -> String {
    format!("Width: {}, Height: {}", node.w, node.h)
}

/// Labels for the given items from their live geometry. Items the engine
/// no longer holds are skipped.
pub fn refresh(engine: &dyn GridEngine, ids: &[ItemId]) -> Vec<(ItemId, String)> {
    ids.iter()
        .filter_map(|id| engine.node(*id).map(|node| (*id, label_for(node))))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::headless::HeadlessEngine;
    use crate::layout::record::LayoutRecord;
    use crate::types::config::{GridConfig, ItemDefaults};

    #[test]
    fn label_reads_live_geometry() {
        let mut engine = HeadlessEngine::new(&GridConfig::default());
        let id = engine.add_widget(LayoutRecord::new_item(&ItemDefaults::default())).unwrap();
        engine.resize_to(id, 5, 4).unwrap();
        let labels = refresh(&engine, &[id]);
        assert_eq!(labels, vec![(id, "Width: 5, Height: 4".to_string())]);
    }

    #[test]
    fn missing_items_are_skipped() {
        let engine = HeadlessEngine::new(&GridConfig::default());
        assert!(refresh(&engine, &[ItemId(1), ItemId(2)]).is_empty());
    }
}
