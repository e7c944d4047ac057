use super::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

pub fn get_or_create_auth_token<R: AuthTokenRepo>(repo: &R, user_id: &Id) -> Result<AuthToken> {
    if let Some(token) = repo.try_get_auth_token_of_user(user_id.as_str())? {
        return Ok(token);
    }
    let token = AuthToken::generate(user_id.clone());
    repo.create_auth_token(&token)?;
    Ok(token)
}

/// Verify the credentials and return the (existing) token of the user.
pub fn login<R>(repo: &R, credentials: &Credentials) -> Result<(User, AuthToken)>
where
    R: UserRepo + AuthTokenRepo,
{
    let user = repo
        .try_get_user_by_username(credentials.username.trim())?
        .filter(|u| u.password.verify(credentials.password))
        .ok_or(Error::Credentials)?;
    let token = get_or_create_auth_token(repo, &user.id)?;
    Ok((user, token))
}

/// Invalidate the token of the requester, if any.
pub fn logout<R: AuthTokenRepo>(repo: &R, requester: Option<&User>) -> Result<()> {
    let user = super::authenticated(requester)?;
    let count = repo.delete_auth_tokens_of_user(user.id.as_str())?;
    log::debug!("Deleted {} token(s) of user {}", count, user.username);
    Ok(())
}

pub fn authorize_by_token<R>(repo: &R, key: &str) -> Result<User>
where
    R: UserRepo + AuthTokenRepo,
{
    let token = match repo.get_auth_token(key) {
        Err(RepoError::NotFound) => return Err(Error::TokenInvalid),
        res => res?,
    };
    match repo.get_user(token.user_id.as_str()) {
        Err(RepoError::NotFound) => Err(Error::TokenInvalid),
        res => Ok(res?),
    }
}
