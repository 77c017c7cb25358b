//! The daemon runtime

use host_api::Duration;
use services_logger::{ConsoleLog, LogSink};
use services_timer_registry::{SlotSnapshot, SlotStore, TimerController, TimerError};
use sim_host::SimScheduler;
use std::sync::Arc;
use thiserror::Error;
use timer_types::{SlotKey, DEFAULT_TICK_PERIOD_MS};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of slots in the registry
    pub slots: usize,
    /// Tick period in milliseconds
    pub period_ms: u64,
    /// Number of periods to simulate before exiting
    pub ticks: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slots: 1,
            period_ms: DEFAULT_TICK_PERIOD_MS,
            ticks: 10,
        }
    }
}

/// Errors the runtime can fail with
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The configuration cannot describe a runnable registry
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The registry rejected a request during bring-up
    #[error(transparent)]
    Timer(#[from] TimerError),
}

/// The daemon runtime
///
/// Wires a simulated host, a timer registry, and a log sink together, then
/// drives the advance/pump loop for the configured number of periods.
pub struct Runtime {
    host: SimScheduler,
    controller: TimerController,
    config: RuntimeConfig,
}

impl Runtime {
    /// Creates a runtime that logs to the console
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        Self::with_sink(config, Arc::new(ConsoleLog::new()))
    }

    /// Creates a runtime with an explicit log sink
    pub fn with_sink(
        config: RuntimeConfig,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self, RuntimeError> {
        if config.slots == 0 {
            return Err(RuntimeError::InvalidConfig(
                "at least one slot is required".to_string(),
            ));
        }
        if config.period_ms == 0 {
            return Err(RuntimeError::InvalidConfig(
                "tick period must be non-zero".to_string(),
            ));
        }

        let controller = TimerController::new(
            SlotStore::with_capacity(config.slots),
            Duration::from_millis(config.period_ms),
            sink,
        );
        Ok(Self {
            host: SimScheduler::new(),
            controller,
            config,
        })
    }

    /// Starts every slot and runs the configured number of periods
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        for key in 0..self.config.slots as u32 {
            self.controller.start(&mut self.host, SlotKey::new(key))?;
        }

        let period = Duration::from_millis(self.config.period_ms);
        for _ in 0..self.config.ticks {
            for event in self.host.advance(period) {
                self.controller.on_expiry(&mut self.host, event.key);
            }
        }
        Ok(())
    }

    /// Final view of every slot, for the end-of-run report
    pub fn snapshots(&self) -> Vec<SlotSnapshot> {
        (0..self.config.slots as u32)
            .filter_map(|key| self.controller.snapshot(SlotKey::new(key)).ok())
            .collect()
    }
}
