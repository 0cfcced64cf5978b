//! # Anima Limbic
//!
//! Runs an [`anima_core::Engine`] as a live background process. The engine
//! itself is deterministic and clock-free; this crate supplies the clock:
//!
//! 1. A heartbeat task ticks the engine with the current context
//! 2. Stimuli are queued over a channel and applied between ticks
//! 3. Each change is published as a snapshot for any number of observers
//!
//! Observers (renderers, NPC logic, robot controllers) subscribe to snapshots
//! and never reach the engine directly.

mod heartbeat;
mod system;

pub use heartbeat::HeartbeatConfig;
pub use system::LimbicSystem;
