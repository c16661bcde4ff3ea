//! Error types for the adgrid core.

use thiserror::Error;

use crate::types::item::ItemId;

/// Unified result type for the adgrid core.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by the grid adapter, the layout bridge and the engine.
///
/// None of these are fatal to a host: `Sys::execute` logs them and turns
/// them into `Response::Error`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid engine library is not available")]
    EngineUnavailable,
    #[error("grid is not initialized")]
    NotInitialized,
    #[error("layout data is not valid JSON: {0}")]
    MalformedLayout(#[source] serde_json::Error),
    #[error("layout data is not a sequence of items")]
    NotASequence,
    #[error("failed to encode layout: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("item {0} not found")]
    UnknownItem(ItemId),
    #[error("item {0} is locked")]
    ItemLocked(ItemId),
    #[error("no room for a {h}-row item below the last row ({rows} rows)")]
    GridFull { rows: u32, h: u32 },
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_yaml::Error),
}
