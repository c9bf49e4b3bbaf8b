//! Command implementations for bzrsync-cli

pub mod sync;

pub use sync::{emit, run_sync};
