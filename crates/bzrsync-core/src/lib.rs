//! Branch synchronization for bzr-sync
//!
//! Brings a local Bazaar working copy to a requested revision and reports
//! whether anything changed, in the flat record an orchestrator expects.

pub mod error;
pub mod params;
pub mod request;
pub mod response;
pub mod sync;

pub use error::{Error, Result};
pub use params::{SyncParams, parse_bool};
pub use request::{SyncRequest, TargetRevision};
pub use response::{ModuleResponse, SyncResult};
pub use sync::{BranchSynchronizer, LocalCopy};
