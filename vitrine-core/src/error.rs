use thiserror::Error;

/// Failure reported by an external player handle for a single command.
/// These are expected runtime outcomes (autoplay policy, detached
/// embeds), consumed where they occur rather than propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerApiError {
    #[error("player command rejected: {0}")]
    Rejected(String),

    #[error("player handle is detached from its embed")]
    Detached,

    #[error("player platform is unavailable")]
    Unavailable,
}

/// Failure to bind a player handle to the embed surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("external player api has not loaded")]
    ApiUnavailable,

    #[error("embed surface is not showing the expected host")]
    SurfaceMismatch,

    #[error("embed binding rejected: {0}")]
    Rejected(String),
}
