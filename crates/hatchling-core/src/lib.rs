//! Orchestration for the Hatchling pet engine.
//!
//! `hatchling-pet` holds the state machine; this crate wires it to the
//! outside world.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration ([`HatchlingConfig`])
//! - [`clock`] -- Wall-clock sources ([`SystemClock`], [`ManualClock`])
//! - [`persistence`] -- Key-value stores and the [`PetRepository`]
//! - [`runner`] -- The async pet loop ([`run_pet_loop`])

pub mod clock;
pub mod config;
pub mod persistence;
pub mod runner;

// Re-export primary types at crate root for convenience.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, HatchlingConfig, LoggingConfig, RuntimeConfig, StorageConfig};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistError, PetRepository};
pub use runner::{Command, RunSummary, RunnerError, StopReason, run_pet_loop};
