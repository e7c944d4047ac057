use super::prelude::*;

/// The requester's role must be above both the current
/// and the new role of the user.
pub fn change_user_role<R: UserRepo>(
    repo: &R,
    requester: Option<&User>,
    username: &str,
    role: Role,
) -> Result<User> {
    let account = super::authenticated(requester)?;
    log::info!("Changing role to {} for {}", role, username);
    let mut user = repo
        .try_get_user_by_username(username)?
        .ok_or(Error::UserDoesNotExist)?;
    if account.role > user.role && role < account.role {
        user.role = role;
        repo.update_user(&user)?;
        Ok(user)
    } else {
        Err(Error::Forbidden)
    }
}
