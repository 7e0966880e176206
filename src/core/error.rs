//! Error types for the fallible edges of the engine.
//!
//! Combat itself never fails: invalid transitions are ignored and cost and
//! damage queries fall through to base values. Errors only surface where
//! outside input enters: configuration, item ids, host collaborators.

use thiserror::Error;

/// Result alias for driver operations.
pub type Result<T> = std::result::Result<T, BattleError>;

/// Invalid battle configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse battle config")]
    Parse(#[source] serde_json::Error),
}

/// Errors raised while turning outside identifiers into effects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("unknown effect kind `{0}`")]
    UnknownKind(String),
}

/// Errors surfaced by the async battle driver.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("enemy ai failed: {0}")]
    EnemyAi(String),

    #[error("battle host failed: {0}")]
    Host(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Effect(#[from] EffectError),
}
