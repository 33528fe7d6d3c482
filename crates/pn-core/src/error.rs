use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be positive (got {value})")]
    NotPositive { what: &'static str, value: f64 },

    #[error("Identity space exhausted")]
    IdsExhausted,

    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
}
