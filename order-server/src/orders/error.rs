//! Order workflow errors

use thiserror::Error;

use crate::orders::store::StoreError;
use crate::utils::AppError;

/// Errors produced by the order workflow and history engine
#[derive(Debug, Error)]
pub enum OrderError {
    /// Referenced order/buyer/employee absent, or no qualifying snapshot
    #[error("{0}")]
    NotFound(String),

    /// Failed precondition or malformed input
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Directory lookup failed for infrastructure reasons
    #[error("Directory error: {0}")]
    Directory(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(msg) => AppError::not_found(msg),
            OrderError::Invalid(msg) => AppError::invalid(msg),
            OrderError::Store(e) => AppError::database(e.to_string()),
            OrderError::Directory(msg) => AppError::database(msg),
        }
    }
}
