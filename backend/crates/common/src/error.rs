use thiserror::Error;

#[derive(Debug, Error)]
pub enum HunterError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("invalid or unreachable CSV URL")]
    UnreachableSource,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type HunterResult<T> = Result<T, HunterError>;
