use thiserror::Error;

#[derive(Error, Debug)]
pub enum FortuneError {
    #[error("Unsupported algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Cannot choose from an empty list")]
    EmptyChoice,

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid star coin amount: {amount}")]
    InvalidAmount { amount: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FortuneResult<T> = Result<T, FortuneError>;
