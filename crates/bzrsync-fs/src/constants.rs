//! Well-known paths inside a Bazaar working copy.

/// Standard Bazaar filesystem markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchPath {
    /// `.bzr/branch/branch.conf`, present only once a branch has been created
    BranchConf,
}

impl BranchPath {
    /// Get the string representation of the path, relative to the working copy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BranchConf => ".bzr/branch/branch.conf",
        }
    }
}
