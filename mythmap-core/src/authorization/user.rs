use mythmap_entities::{
    id::Id,
    user::{Role, User},
};

use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unauthorized role")]
    UnauthorizedRole,
    #[error("not the owner")]
    NotOwner,
}

pub type Result<T> = StdResult<T, Error>;

pub fn authorize_role(user: &User, min_required_role: Role) -> Result<()> {
    if user.role < min_required_role {
        return Err(Error::UnauthorizedRole);
    }
    Ok(())
}

/// Only the owner of an item or an admin may modify or delete it.
pub fn authorize_owner_or_admin(user: &User, owner: &Id) -> Result<()> {
    if &user.id == owner || user.role == Role::Admin {
        return Ok(());
    }
    Err(Error::NotOwner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mythmap_entities::builders::*;

    #[test]
    fn authorize_by_role() {
        let user = User::build().role(Role::Moderator).finish();
        assert!(authorize_role(&user, Role::User).is_ok());
        assert!(authorize_role(&user, Role::Moderator).is_ok());
        assert!(authorize_role(&user, Role::Admin).is_err());
    }

    #[test]
    fn authorize_owner_and_admins() {
        let owner = User::build().finish();
        let moderator = User::build().role(Role::Moderator).finish();
        let admin = User::build().role(Role::Admin).finish();
        assert!(authorize_owner_or_admin(&owner, &owner.id).is_ok());
        assert!(authorize_owner_or_admin(&admin, &owner.id).is_ok());
        assert!(authorize_owner_or_admin(&moderator, &owner.id).is_err());
    }
}
