//! Duplicate-format tournament runner
//!
//! This crate provides infrastructure for:
//! - Scheduling fair four-participant matches from a fixed pool
//! - Playing every match in four rotated seatings over one shared seed list
//! - Collecting engine artifacts into a single match report
//!
//! The games themselves are played by an external simulation engine; see
//! [`arena_core::SimulationEngine`] and [`CommandEngine`].
//!
//! # Usage
//!
//! ```bash
//! # Play one match using the pool and engine from tournament.toml
//! cargo run -p tournament -- --config tournament.toml
//!
//! # Play 25 consecutive matches under a custom run name
//! cargo run -p tournament -- --config tournament.toml --run-name nightly --matches 25
//! ```

mod artifacts;
mod config;
mod process_engine;
mod results;
mod scheduler;

pub use artifacts::*;
pub use config::*;
pub use process_engine::*;
pub use results::*;
pub use scheduler::*;
