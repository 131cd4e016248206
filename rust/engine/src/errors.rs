use thiserror::Error;

/// Errors raised when textual input cannot be mapped onto engine types.
/// Rules and state-machine operations never fail; they degrade instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown card rank: {0}")]
    UnknownRank(String),
    #[error("Unknown action: {0} (expected hit or stand)")]
    UnknownAction(String),
    #[error("Unknown boss: {0}")]
    UnknownBoss(String),
    #[error("Unknown buff: {0}")]
    UnknownBuff(String),
    #[error("No boss mapped to node {0}")]
    UnknownNode(String),
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
}
