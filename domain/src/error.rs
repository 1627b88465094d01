use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid account: {0}")]
    InvalidAccount(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
