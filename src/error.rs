use thiserror::Error;

use crate::ConfigError;

/// Unified error type covering configuration loading and validation.
///
/// Returned by [`RuleEngine::from_json()`](crate::RuleEngine::from_json),
/// [`RuleEngine::from_files()`](crate::RuleEngine::from_files) and the
/// [`config`](crate::config) decoders. Evaluation itself never fails.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid rule configuration payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
