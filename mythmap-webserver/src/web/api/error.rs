use super::json_error_response;
use anyhow::anyhow;
use mythmap_application::error::{AppError, BError};
pub use mythmap_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

fn parameter_status(err: &ParameterError) -> Status {
    match err {
        ParameterError::Unauthorized | ParameterError::TokenInvalid => Status::Unauthorized,
        ParameterError::Forbidden => Status::Forbidden,
        ParameterError::Repo(RepoError::NotFound) | ParameterError::UserDoesNotExist => {
            Status::NotFound
        }
        ParameterError::Repo(_) | ParameterError::Media(_) => Status::InternalServerError,
        _ => Status::BadRequest,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let AppError::Business(err) = &err {
                    match err {
                        BError::Parameter(ref err) => {
                            let status = parameter_status(err);
                            if status == Status::InternalServerError {
                                error!("Error: {err}");
                            }
                            return json_error_response(req, err, status);
                        }
                        BError::Repo(RepoError::NotFound) => {
                            return json_error_response(req, err, Status::NotFound);
                        }
                        _ => {}
                    }
                }
                error!("Error: {err}");
                json_error_response(req, &err, Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(req, &err, Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_of_parameter_errors() {
        assert_eq!(Status::Unauthorized, parameter_status(&ParameterError::Unauthorized));
        assert_eq!(Status::Unauthorized, parameter_status(&ParameterError::TokenInvalid));
        assert_eq!(Status::Forbidden, parameter_status(&ParameterError::Forbidden));
        assert_eq!(
            Status::NotFound,
            parameter_status(&ParameterError::Repo(RepoError::NotFound))
        );
        assert_eq!(Status::BadRequest, parameter_status(&ParameterError::Credentials));
        assert_eq!(
            Status::BadRequest,
            parameter_status(&ParameterError::InvalidCoordinates)
        );
        assert_eq!(
            Status::InternalServerError,
            parameter_status(&ParameterError::Repo(RepoError::AlreadyExists))
        );
    }
}
