//! Side-scrolling arcade shooter core.
//!
//! The simulation is pure in-memory state plus a handful of collaborator
//! ports; all terminal I/O lives in the binary.

pub mod clock;
pub mod combat;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod player;
pub mod ports;
pub mod spawner;

pub use config::GameConfig;
pub use error::ConfigError;
pub use game::{run, RunSummary, Session};
