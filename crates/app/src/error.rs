use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parser error: {0}")]
    Parser(#[from] engine::ParserError),
    #[error("split error: {0}")]
    Allocation(#[from] engine::AllocationError),
    #[error("amount error: {0}")]
    Amount(#[from] engine::AmountError),
    #[error("currency error: {0}")]
    Currency(#[from] engine::CurrencyError),
    #[error("unknown timezone: {0}")]
    Timezone(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no amount found in \"{0}\"")]
    MissingAmount(String),
    #[error("split does not add up: {0} left to assign")]
    Unbalanced(String),
}
