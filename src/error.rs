use thiserror::Error;

use crate::scene::NodeId;

/// Setup-time failures. Nothing in the per-tick path returns these; ticks log
/// and fall back to a no-op instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    #[error("scene node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("rig hierarchy is missing its {0} node")]
    MissingNode(&'static str),

    #[error("target ball {0} is not selectable")]
    UnknownTarget(u32),

    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

impl RigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }
}

pub type Result<T> = std::result::Result<T, RigError>;
