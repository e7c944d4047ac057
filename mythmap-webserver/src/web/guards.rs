use core::ops::Deref;

use rocket::{
    self,
    request::{FromRequest, Outcome, Request},
};

use crate::core::{prelude::*, usecases};
use mythmap_application::error::AppError;
use mythmap_core::usecases::Error as ParameterError;

type Result<T> = std::result::Result<T, AppError>;

const AUTH_SCHEMES: [&str; 2] = ["Token", "Bearer"];

fn get_token(auth_header_val: &str) -> Option<&str> {
    let (scheme, token) = auth_header_val.trim().split_once(' ')?;
    let token = token.trim();
    (AUTH_SCHEMES.contains(&scheme) && !token.is_empty()).then_some(token)
}

/// The token of the `Authorization` header, if any.
///
/// The token is resolved into a user on demand, because
/// that requires a database connection.
#[derive(Debug)]
pub struct Auth {
    token: Option<String>,
}

impl Auth {
    /// The authenticated user or `None` for anonymous requests.
    ///
    /// An unknown token is an error instead of an anonymous request.
    pub fn user<R>(&self, repo: &R) -> Result<Option<User>>
    where
        R: UserRepo + AuthTokenRepo,
    {
        let Some(token) = &self.token else {
            return Ok(None);
        };
        Ok(Some(usecases::authorize_by_token(repo, token)?))
    }

    pub fn account<R>(&self, repo: &R) -> Result<User>
    where
        R: UserRepo + AuthTokenRepo,
    {
        self.user(repo)?
            .ok_or_else(|| ParameterError::Unauthorized.into())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = request
            .headers()
            .get("Authorization")
            .find_map(get_token)
            .map(ToOwned::to_owned);
        Outcome::Success(Self { token })
    }
}

pub struct Media(pub Box<dyn MediaStore + Send + Sync>);

impl Deref for Media {
    type Target = dyn MediaStore;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct Version(pub &'static str);
