//! Shared test utilities for the bzr-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fake`] — [`FakeBzr`], an in-memory `bzr` behind the `CommandRunner` seam
//! - [`script`] — a file-backed fake `bzr` executable for end-to-end tests

pub mod fake;
pub mod script;

pub use fake::FakeBzr;
pub use script::{FakeUpstream, dirty_checkout, install_fake_bzr};
