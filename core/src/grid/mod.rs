//! Grid state around the engine.
//!
//! The `adapter` owns the engine and its event subscription. `selection`
//! and `lock` hold the only state the core keeps of its own, and `labels`
//! derives each item's display label from live geometry.

pub mod adapter;
pub mod labels;
pub mod lock;
pub mod selection;
