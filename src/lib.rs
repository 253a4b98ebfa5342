//! # Ironlog - Personal Workout Tracking
//!
//! A command-line workout tracker for running live gym sessions with
//! durable timers, logged sets, and streak analytics.
//!
//! ## Features
//!
//! - **Live Session Tracking**: Total, set, rest, and cumulative timers driven
//!   by wall-clock timestamps so state survives restarts
//! - **Durable Persistence**: Debounced SQLite writes with an unconditional
//!   flush on teardown
//! - **Set Logging**: Reps, weight, set duration, and retroactive rest patches
//! - **Plan Rotations**: Minimal plan/day/exercise storage with target sets
//! - **Streak Analytics**: Plan-aware grace period and status classification
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ironlog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
