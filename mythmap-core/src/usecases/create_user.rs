use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username : String,
    pub email    : Option<String>,
    pub password : String,
    pub role     : Role,
}

pub fn create_new_user<R: UserRepo>(repo: &R, new_user: NewUser) -> Result<User> {
    let NewUser {
        username,
        email,
        password,
        role,
    } = new_user;
    let username = username.trim().to_owned();
    if !User::is_valid_username(&username) {
        return Err(Error::Username);
    }
    let email = super::non_empty(email);
    if let Some(email) = &email {
        if !fast_chemail::is_valid_email(email) {
            return Err(Error::Email);
        }
    }
    if repo.try_get_user_by_username(&username)?.is_some() {
        return Err(Error::UserExists);
    }
    let password = password.parse::<Password>()?;
    let user = User {
        id: Id::new(),
        username,
        email,
        password,
        role,
    };
    log::debug!("Creating new user {} with role {}", user.username, user.role);
    match repo.create_user(&user) {
        Err(RepoError::AlreadyExists) => return Err(Error::UserExists),
        res => res?,
    }
    Ok(user)
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username : String,
    pub email    : Option<String>,
    pub password : String,
}

/// Register a regular user and hand out an auth token.
pub fn register<R>(repo: &R, registration: Registration) -> Result<(User, AuthToken)>
where
    R: UserRepo + AuthTokenRepo,
{
    let Registration {
        username,
        email,
        password,
    } = registration;
    let user = create_new_user(
        repo,
        NewUser {
            username,
            email,
            password,
            role: Role::User,
        },
    )?;
    let token = super::get_or_create_auth_token(repo, &user.id)?;
    log::info!("Registered new user {}", user.username);
    Ok((user, token))
}
