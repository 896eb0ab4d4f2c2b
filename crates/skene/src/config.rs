#![forbid(unsafe_code)]

//! Configuration for [`StudioSession`](crate::StudioSession).

use skene_playback::EngineConfig;

/// Unified configuration for creating a [`StudioSession`](crate::StudioSession).
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Playback engine configuration (retry pacing, engine event capacity).
    pub engine: EngineConfig,
    /// Capacity of the unified event bus.
    pub bus_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            bus_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Set the playback engine configuration.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the unified bus capacity.
    #[must_use]
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity.max(1);
        self
    }
}
