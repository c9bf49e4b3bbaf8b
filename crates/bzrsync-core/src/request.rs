//! Sync request types

use bzrsync_fs::NormalizedPath;

/// Sentinel revision meaning the branch tip.
pub const HEAD: &str = "head";

/// The revision a working copy should end up at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetRevision {
    /// Latest revision of the branch
    #[default]
    Head,
    /// An opaque revision identifier passed through to `bzr -r`
    Revision(String),
}

impl TargetRevision {
    /// Parse a version string; `head` is matched case-insensitively.
    pub fn parse(version: &str) -> Self {
        if version.eq_ignore_ascii_case(HEAD) {
            Self::Head
        } else {
            Self::Revision(version.to_string())
        }
    }

    /// The `-r` argument for this target, `None` for the tip.
    pub fn revision(&self) -> Option<&str> {
        match self {
            Self::Head => None,
            Self::Revision(rev) => Some(rev),
        }
    }
}

impl std::fmt::Display for TargetRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Head => write!(f, "{HEAD}"),
            Self::Revision(rev) => write!(f, "{rev}"),
        }
    }
}

/// Everything one sync needs to know. Immutable for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Remote branch location
    pub source: String,
    /// Absolute path of the working copy
    pub destination: NormalizedPath,
    pub target: TargetRevision,
    /// Discard local modifications instead of failing on them
    pub force: bool,
}

impl SyncRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<NormalizedPath>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            target: TargetRevision::Head,
            force: true,
        }
    }

    pub fn with_target(mut self, target: TargetRevision) -> Self {
        self.target = target;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
