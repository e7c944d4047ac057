use mythmap_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use std::io;
use thiserror::Error;

pub use mythmap_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for BError {
    fn from(s: String) -> Self {
        Self::Internal(s)
    }
}

impl AppError {
    /// The use case error, if the request was rejected by a business rule.
    pub fn as_parameter_error(&self) -> Option<&ParameterError> {
        match self {
            Self::Business(BError::Parameter(err)) => Some(err),
            _ => None,
        }
    }
}
