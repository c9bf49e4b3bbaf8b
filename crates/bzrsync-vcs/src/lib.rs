//! Bazaar abstraction for bzr-sync
//!
//! Every interaction with the `bzr` tool goes through a [`CommandRunner`],
//! with the working directory carried by each [`Invocation`].

pub mod bzr;
pub mod error;
pub mod locate;
pub mod runner;
pub mod status;

pub use bzr::Bzr;
pub use error::{Result, VcsError};
pub use locate::locate_executable;
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use status::local_modifications;
