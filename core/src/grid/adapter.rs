//! Grid adapter: owns the engine handle and binds its lifecycle events.

use tracing::{debug, error, info};

use crate::engine::{EngineProvider, EventKind, GridEngine};
use crate::error::{GridError, Result};
use crate::types::config::GridConfig;


pub struct GridAdapter {
    config: GridConfig,
    engine: Option<Box<dyn GridEngine>>,
}


impl GridAdapter {
    pub fn new(config: GridConfig) -> GridAdapter {
        GridAdapter {
            config,
            engine: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Create the engine and subscribe to every lifecycle event.
    ///
    /// Runs once; later calls are no-ops. A missing engine library is logged
    /// and leaves the adapter uninitialized. Returns whether a grid exists
    /// afterwards.
    pub fn initialize(&mut self, provider: &dyn EngineProvider) -> bool {
        if self.engine.is_some() {
            debug!("grid already initialized");
            return true;
        }
        match provider.init(&self.config, &self.config.selector) {
            Ok(mut engine) => {
                engine.on(&EventKind::ALL);
                info!(
                    selector = %self.config.selector,
                    columns = self.config.column,
                    rows = self.config.row,
                    "grid initialized"
                );
                self.engine = Some(engine);
                true
            }
            Err(e) => {
                error!(error = %e, "grid engine unavailable, continuing without a grid");
                false
            }
        }
    }

    pub fn engine(&self) -> Result<&dyn GridEngine> {
        match self.engine.as_deref() {
            Some(engine) => Ok(engine),
            None => Err(GridError::NotInitialized),
        }
    }

    pub fn engine_mut(&mut self) -> Result<&mut (dyn GridEngine + 'static)> {
        match self.engine.as_deref_mut() {
            Some(engine) => Ok(engine),
            None => Err(GridError::NotInitialized),
        }
    }

    /// Ask the engine to compact when `kind` is a structural mutation.
    pub fn compact_after(&mut self, kind: EventKind) {
        if !kind.triggers_compaction() {
            return;
        }
        if let Some(engine) = self.engine.as_deref_mut() {
            engine.compact();
        }
    }
}
